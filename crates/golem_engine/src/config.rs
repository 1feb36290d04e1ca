//! Engine tuning knobs.

use chrono::{DateTime, Local};

/// Configuration for an [`crate::Engine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capacity of each session history ring (requests, responses, that).
    pub history_limit: usize,
    /// Maximum SRAI/SR recursion depth; exceeding it falls through with the
    /// raw input.
    pub srai_depth_limit: usize,
    /// Pin the clock for `<date>`/`<time>`; `None` uses the system clock.
    pub fixed_now: Option<DateTime<Local>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 15,
            srai_depth_limit: 50,
            fixed_now: None,
        }
    }
}

impl EngineConfig {
    pub(crate) fn now(&self) -> DateTime<Local> {
        self.fixed_now.unwrap_or_else(Local::now)
    }
}
