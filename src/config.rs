use log::Level;

/// Period of the countdown refresh.
pub const COUNTDOWN_TICK_MS: u32 = 1_000;

/// Fraction of a section that must be visible before it animates in.
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "50px";

/// Used for the calendar end time when the document only knows the start.
pub const DEFAULT_EVENT_HOURS: i64 = 5;

pub const FLOATING_PARTICLES: usize = 20;

pub const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while running with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
