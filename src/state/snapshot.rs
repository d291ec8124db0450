//! Point-in-time copy of one timer for readers outside the lock

use std::time::Duration;

use serde::Serialize;

use crate::timer::{CountdownState, Timer, TimerStatus};

#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub name: String,
    pub status: TimerStatus,
    pub progress: f64,
    pub completed: bool,
    pub enabled: bool,
    pub alerting: bool,
    pub duration_seconds: f64,
    pub remaining_seconds: u64,
    pub countdown_state: Option<CountdownState>,
    pub countdown_remaining_seconds: Option<u64>,
    pub countdown_text: String,
    /// Clock reading the snapshot was taken at
    #[serde(skip)]
    pub taken_at: Duration,
}

impl TimerSnapshot {
    pub fn capture(timer: &Timer, alerting: bool, taken_at: Duration) -> Self {
        let countdown = timer.countdown();
        Self {
            name: timer.name().to_string(),
            status: timer.status(),
            progress: timer.progress_fraction(),
            completed: timer.is_completed(),
            enabled: timer.is_enabled(),
            alerting,
            duration_seconds: timer.duration().as_secs_f64(),
            remaining_seconds: timer.remaining().as_secs_f64().ceil() as u64,
            countdown_state: countdown.map(|c| c.state()),
            countdown_remaining_seconds: countdown.map(|c| c.remaining_seconds()),
            countdown_text: timer.countdown_text(),
            taken_at,
        }
    }
}
