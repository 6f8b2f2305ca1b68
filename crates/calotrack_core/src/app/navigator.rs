//! Screen navigation state machine.
//!
//! # Responsibility
//! - Track the visible screen and the back stack.
//! - Keep routing rules out of UI code.
//!
//! # Invariants
//! - `back` never leaves the navigator without a screen; an empty stack
//!   falls back to [`Screen::Home`].
//! - `Setup` cannot be left through `back` while no profile exists.

use crate::model::day::DayKey;

/// Screens of the tracker app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Home,
    Setup,
    DailyLog(DayKey),
    Calendar,
    Goals,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Home => "home",
            Self::Setup => "setup",
            Self::DailyLog(_) => "daily_log",
            Self::Calendar => "calendar",
            Self::Goals => "goals",
        }
    }
}

/// Current screen plus back stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    has_profile: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Screen::Loading,
            history: Vec::new(),
            has_profile: false,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Leaves `Loading` once persisted state is read; lands on Home with an
    /// empty back stack.
    pub fn finish_loading(&mut self, has_profile: bool) {
        self.has_profile = has_profile;
        if self.current == Screen::Loading {
            self.current = Screen::Home;
            self.history.clear();
        }
    }

    /// Pushes the current screen and shows `screen`.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.current {
            return;
        }
        if self.current != Screen::Loading {
            self.history.push(self.current);
        }
        self.current = screen;
    }

    /// Daily log entry point from Home; always targets `today`.
    pub fn open_daily_log(&mut self, today: DayKey) {
        self.navigate(Screen::DailyLog(today));
    }

    /// Calendar day selection.
    pub fn select_date(&mut self, date: DayKey) {
        self.navigate(Screen::DailyLog(date));
    }

    /// A saved profile unlocks leaving Setup and returns Home.
    pub fn profile_saved(&mut self) {
        self.has_profile = true;
        self.navigate(Screen::Home);
    }

    pub fn can_go_back(&self) -> bool {
        match self.current {
            Screen::Loading | Screen::Home => !self.history.is_empty(),
            Screen::Setup => self.has_profile,
            _ => true,
        }
    }

    /// Pops the back stack; returns the screen now shown.
    pub fn back(&mut self) -> Screen {
        if !self.can_go_back() {
            return self.current;
        }
        self.current = self.history.pop().unwrap_or(Screen::Home);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigator, Screen};
    use crate::model::day::DayKey;

    fn day(value: &str) -> DayKey {
        DayKey::parse(value).unwrap()
    }

    #[test]
    fn loading_lands_on_home_without_history() {
        let mut nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Loading);
        nav.finish_loading(false);
        assert_eq!(nav.current(), Screen::Home);
        assert_eq!(nav.depth(), 0);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn calendar_selection_and_back_walk_the_stack() {
        let mut nav = Navigator::new();
        nav.finish_loading(true);
        nav.navigate(Screen::Calendar);
        nav.select_date(day("2024-05-01"));
        assert_eq!(nav.current(), Screen::DailyLog(day("2024-05-01")));

        assert_eq!(nav.back(), Screen::Calendar);
        assert_eq!(nav.back(), Screen::Home);
        assert_eq!(nav.back(), Screen::Home);
    }

    #[test]
    fn setup_without_profile_cannot_go_back() {
        let mut nav = Navigator::new();
        nav.finish_loading(false);
        nav.navigate(Screen::Setup);
        assert!(!nav.can_go_back());
        assert_eq!(nav.back(), Screen::Setup);

        nav.profile_saved();
        assert_eq!(nav.current(), Screen::Home);
        nav.navigate(Screen::Setup);
        assert_eq!(nav.back(), Screen::Home);
    }

    #[test]
    fn home_daily_log_targets_today() {
        let mut nav = Navigator::new();
        nav.finish_loading(true);
        nav.open_daily_log(day("2024-05-08"));
        assert_eq!(nav.current(), Screen::DailyLog(day("2024-05-08")));
        assert_eq!(nav.current().name(), "daily_log");
    }

    #[test]
    fn back_from_deep_screen_with_empty_stack_falls_back_home() {
        let mut nav = Navigator::new();
        nav.navigate(Screen::Goals);
        assert_eq!(nav.depth(), 0);
        assert_eq!(nav.back(), Screen::Home);
    }
}
