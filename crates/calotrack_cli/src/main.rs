//! CaloTrack command-line front end.
//!
//! # Responsibility
//! - Drive `calotrack_core` use-cases against a local SQLite file.
//! - Keep output plain text, one fact per line.

mod cli;

use calotrack_core::db::open_db;
use calotrack_core::{
    core_version, default_log_level, init_logging, ping, CatalogQuery, CatalogSave, DayKey,
    ManualEntry, MeasureMode, MonthGrid, ProfileForm, SqliteKvStore, TrackerService,
};
use clap::Parser;
use cli::{Cli, Commands, ProfileAction};
use log::error;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    if let Some(log_dir) = &cli.log_dir {
        start_logging(log_dir, cli.log_level.as_deref())?;
    }

    if let Commands::Ping = cli.command {
        println!("calotrack_core ping={}", ping());
        println!("calotrack_core version={}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    let service = TrackerService::new(SqliteKvStore::new(&conn));

    match cli.command {
        Commands::Ping => Ok(()),
        Commands::Profile { action } => profile(&service, action),
        Commands::Target => {
            println!("daily={}", service.daily_target()?);
            println!("weekly={}", service.weekly_target()?);
            Ok(())
        }
        Commands::Search {
            text,
            custom,
            limit,
        } => {
            let query = CatalogQuery {
                text,
                custom_only: custom,
                limit,
            };
            for hit in service.search_foods(&query)? {
                let marker = if hit.entry.is_custom { " *" } else { "" };
                println!(
                    "{:>3}  {} ({} kcal/{}){marker}",
                    hit.index, hit.entry.name, hit.entry.cal_per_unit, hit.entry.unit
                );
            }
            Ok(())
        }
        Commands::Add {
            index,
            portions,
            exact,
            date,
        } => {
            let (mode, value) = match (portions, exact) {
                (Some(count), _) => (MeasureMode::Portions, count),
                (None, Some(quantity)) => (MeasureMode::Exact, quantity),
                (None, None) => return Err("either --portions or --exact is required".into()),
            };
            let date = parse_date(&service, date)?;
            let entry = service.log_catalog_food(date, index, mode, value)?;
            println!(
                "{date}: {} {} {} = {} kcal",
                entry.name, entry.amount, entry.unit, entry.calories
            );
            Ok(())
        }
        Commands::Manual {
            name,
            calories,
            amount,
            unit,
            save,
            date,
        } => {
            let date = parse_date(&service, date)?;
            let manual = ManualEntry {
                name,
                total_calories: calories,
                amount,
                unit,
            };
            let logged = service.log_manual(date, &manual, save)?;
            println!(
                "{date}: {} = {} kcal",
                logged.entry.name, logged.entry.calories
            );
            if let CatalogSave::Skipped(reason) = &logged.catalog {
                println!("not saved to catalog: {reason}");
            }
            Ok(())
        }
        Commands::Rm { index, date } => {
            let date = parse_date(&service, date)?;
            let logs = service.remove_log(date, index)?;
            println!("{date}: {} entries left", logs.day(date).len());
            Ok(())
        }
        Commands::Day { date } => {
            let date = parse_date(&service, date)?;
            day(&service, date)
        }
        Commands::Week { date } => {
            let date = parse_date(&service, date)?;
            let progress = service.week_progress(date)?;
            for bar in &progress.days {
                let marker = if bar.is_today { " <" } else { "" };
                let over = if bar.over_target { " !" } else { "" };
                println!("{} {:>5}{over}{marker}", bar.date, bar.total);
            }
            println!(
                "week {}/{} kcal ({:.0}%)",
                progress.consumed, progress.weekly_target, progress.progress_percent
            );
            Ok(())
        }
        Commands::History { weeks } => {
            for week in service.week_history(weeks)? {
                println!(
                    "{} {:>6}/{} {}",
                    week.monday,
                    week.total,
                    week.target,
                    week.status.as_str()
                );
            }
            Ok(())
        }
        Commands::Calendar { date } => {
            let date = parse_date(&service, date)?;
            calendar(&service, date)
        }
    }
}

fn start_logging(log_dir: &Path, level: Option<&str>) -> CliResult {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let level = level.unwrap_or_else(|| default_log_level());
    init_logging(level, &log_dir.to_string_lossy())?;
    Ok(())
}

fn parse_date(
    service: &TrackerService<SqliteKvStore<'_>>,
    raw: Option<String>,
) -> Result<DayKey, Box<dyn Error>> {
    match raw {
        Some(raw) => Ok(DayKey::parse(raw.trim())?),
        None => Ok(service.today()),
    }
}

fn profile(service: &TrackerService<SqliteKvStore<'_>>, action: ProfileAction) -> CliResult {
    match action {
        ProfileAction::Show => {
            let Some(profile) = service.profile()? else {
                println!("no profile; run `calotrack profile set`");
                return Ok(());
            };
            let form = ProfileForm::from_profile(&profile);
            println!("weight={}", form.weight);
            println!("height={}", form.height);
            println!("age={}", form.age);
            println!("gender={}", form.gender);
            println!("activity={}", form.activity);
            println!("goal={}", form.goal);
            Ok(())
        }
        ProfileAction::Set {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
        } => {
            let form = ProfileForm {
                weight,
                height,
                age,
                gender,
                activity,
                goal,
            };
            service.save_profile(&form)?;
            println!("daily={}", service.daily_target()?);
            Ok(())
        }
    }
}

fn day(service: &TrackerService<SqliteKvStore<'_>>, date: DayKey) -> CliResult {
    let summary = service.day_summary(date)?;
    for (index, entry) in service.day_log(date)?.iter().enumerate() {
        println!(
            "{index:>3}  {} {} {} {:>5} kcal",
            entry.name, entry.amount, entry.unit, entry.calories
        );
    }
    println!(
        "{date}: {}/{} kcal, remaining {} ({:.0}%)",
        summary.consumed, summary.target, summary.remaining, summary.progress_percent
    );
    Ok(())
}

fn calendar(service: &TrackerService<SqliteKvStore<'_>>, date: DayKey) -> CliResult {
    let grid = MonthGrid::containing(date);
    let logs = service.logs()?;
    let today = grid.today_marker(service.today());

    println!("{}-{:02}", grid.year, grid.month);
    println!("  Mo   Tu   We   Th   Fr   Sa   Su");
    let mut line = "     ".repeat(grid.leading_blanks as usize);
    for day in 1..=grid.days_in_month {
        let logged = grid
            .day_key(day)
            .is_some_and(|key| !logs.day(key).is_empty());
        let mark = match (Some(day) == today, logged) {
            (true, _) => '<',
            (false, true) => '*',
            (false, false) => ' ',
        };
        line.push_str(&format!(" {day:>2}{mark} "));
        if (grid.leading_blanks + day) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
    Ok(())
}
