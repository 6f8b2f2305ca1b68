use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CaloTrack - local calorie tracker
#[derive(Parser, Debug)]
#[command(name = "calotrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, env = "CALOTRACK_DB_PATH", default_value = "calotrack.sqlite3", global = true)]
    pub db: PathBuf,

    /// Directory for rolling log files (logging stays off when omitted)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print core linkage info
    Ping,

    /// Show or update the body profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Print daily and weekly calorie targets
    Target,

    /// Search the food catalog
    Search {
        /// Name fragment; accents and case are ignored
        #[arg(default_value = "")]
        text: String,

        /// Only user-added foods
        #[arg(long)]
        custom: bool,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Log a catalog food by its search position
    Add {
        /// Position printed by `search`
        index: usize,

        /// Whole number of standard portions
        #[arg(long, conflicts_with = "exact", required_unless_present = "exact")]
        portions: Option<f64>,

        /// Exact quantity in the food's unit
        #[arg(long)]
        exact: Option<f64>,

        /// Day to log on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a food by its total calories
    Manual {
        name: String,

        /// Total kcal for the whole amount
        calories: i64,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        unit: Option<String>,

        /// Also save as a custom catalog food
        #[arg(long)]
        save: bool,

        #[arg(long)]
        date: Option<String>,
    },

    /// Remove a logged entry by its position in `day`
    Rm {
        index: usize,

        #[arg(long)]
        date: Option<String>,
    },

    /// Show a day's log and progress
    Day {
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the week containing a date
    Week {
        #[arg(long)]
        date: Option<String>,
    },

    /// Classify previous weeks against the goal
    History {
        #[arg(long, default_value_t = 4)]
        weeks: usize,
    },

    /// Print a month grid with logged totals
    Calendar {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Print the stored profile
    Show,

    /// Validate and store a new profile
    Set {
        /// Weight in kg
        #[arg(long)]
        weight: String,

        /// Height in cm
        #[arg(long)]
        height: String,

        /// Age in years
        #[arg(long)]
        age: String,

        /// male|female
        #[arg(long, default_value = "male")]
        gender: String,

        /// 1.2|1.375|1.55|1.725|1.9
        #[arg(long, default_value = "1.2")]
        activity: String,

        /// lose|maintain|gain
        #[arg(long, default_value = "maintain")]
        goal: String,
    },
}
