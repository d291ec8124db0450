//! Nested one-shot countdown that starts once its parent timer completes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Active,
    Finished,
}

/// Whole-second countdown driven by an external 1 Hz tick
///
/// Every operation is defined in every state: activating a countdown that is
/// already running or finished is a no-op, and ticking anything but an active
/// countdown does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSubTimer {
    total_seconds: u64,
    remaining_seconds: u64,
    state: CountdownState,
}

impl CountdownSubTimer {
    pub fn new() -> Self {
        Self {
            total_seconds: 0,
            remaining_seconds: 0,
            state: CountdownState::Idle,
        }
    }

    /// Start counting down from `total_seconds`. Returns whether the
    /// countdown was actually activated.
    pub fn activate(&mut self, total_seconds: u64) -> bool {
        if self.state != CountdownState::Idle {
            return false;
        }
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.state = if total_seconds == 0 {
            CountdownState::Finished
        } else {
            CountdownState::Active
        };
        true
    }

    /// One whole second has passed
    pub fn tick(&mut self) -> CountdownState {
        if self.state == CountdownState::Active {
            self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
            if self.remaining_seconds == 0 {
                self.state = CountdownState::Finished;
            }
        }
        self.state
    }

    pub fn reset(&mut self) {
        self.total_seconds = 0;
        self.remaining_seconds = 0;
        self.state = CountdownState::Idle;
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// `MM:SS` while active or finished, empty while idle
    pub fn display_text(&self) -> String {
        match self.state {
            CountdownState::Idle => String::new(),
            CountdownState::Active => format_mm_ss(self.remaining_seconds),
            CountdownState::Finished => format_mm_ss(0),
        }
    }
}

impl Default for CountdownSubTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format whole seconds as zero-padded "MM:SS"
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
