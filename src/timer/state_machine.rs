//! Per-timer state machine
//!
//! ```text
//!              elapsed >= duration
//!   Running ─────────────────────────► Completed
//!      ▲  ▲                                │
//!      │  └──────────── reset() ───────────┘
//!      │
//!      └──── set_enabled(true) ──── Disabled ◄── set_enabled(false) ── any
//! ```
//!
//! All transitions are computed from the `now` passed in, never from how
//! often `tick` is called, so any polling cadence observes the same
//! completion instant (up to its own quantization).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    countdown::{CountdownState, CountdownSubTimer},
    spec::TimerSpec,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Disabled,
    Completed,
}

/// Which colour the completion flash shows at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Accent,
    Base,
}

/// 2 Hz alternation derived from the timestamp alone
pub fn flash_phase(now: Duration) -> FlashPhase {
    if (now.as_millis() / 500) % 2 == 0 {
        FlashPhase::Accent
    } else {
        FlashPhase::Base
    }
}

/// Result of one `Timer::tick`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub progress: f64,
    pub completed: bool,
    /// True only on the tick that performed the Running → Completed edge
    pub just_completed: bool,
    /// Countdown length activated by this tick, if any
    pub countdown_activated: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Timer {
    spec: TimerSpec,
    started_at: Duration,
    enabled: bool,
    completed: bool,
    completed_at: Option<Duration>,
    /// Elapsed time as of the last tick; what a disabled timer keeps reporting
    observed: Duration,
    countdown: Option<CountdownSubTimer>,
    /// Bumped on every reset so background work can tell stale runs apart
    run: u64,
}

impl Timer {
    pub fn new(spec: TimerSpec, now: Duration) -> Self {
        let countdown = spec.has_countdown().then(CountdownSubTimer::new);
        Self {
            spec,
            started_at: now,
            enabled: true,
            completed: false,
            completed_at: None,
            observed: Duration::ZERO,
            countdown,
            run: 0,
        }
    }

    /// Advance to `now`, performing the completion edge if it is due
    pub fn tick(&mut self, now: Duration) -> Tick {
        if !self.enabled {
            return self.report(false, None);
        }

        let duration = self.spec.duration();
        let elapsed = now.saturating_sub(self.started_at);
        self.observed = elapsed.min(duration);

        if self.completed || elapsed < duration {
            return self.report(false, None);
        }

        self.completed = true;
        self.completed_at = Some(now);
        info!("Timer '{}' completed after {:?}", self.spec.name(), duration);

        let activated = self.countdown.as_mut().and_then(|countdown| {
            let total = duration.as_secs() / 2;
            countdown.activate(total).then_some(total)
        });
        if let Some(total) = activated {
            debug!("Timer '{}' countdown activated for {}s", self.spec.name(), total);
        }

        self.report(true, activated)
    }

    fn report(&self, just_completed: bool, countdown_activated: Option<u64>) -> Tick {
        Tick {
            progress: self.progress_fraction(),
            completed: self.completed,
            just_completed,
            countdown_activated,
        }
    }

    /// Re-arm from zero. The enabled flag is left as it is, so a disabled
    /// timer stays disabled with nothing elapsed. Returns the new run id.
    pub fn reset(&mut self, now: Duration) -> u64 {
        self.started_at = now;
        self.completed = false;
        self.completed_at = None;
        self.observed = Duration::ZERO;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.reset();
        }
        self.run = self.run.wrapping_add(1);
        self.run
    }

    /// Toggle the enabled flag; always followed by a full reset
    pub fn set_enabled(&mut self, enabled: bool, now: Duration) -> u64 {
        self.enabled = enabled;
        self.reset(now)
    }

    /// Advance the countdown by one second if it still belongs to `run`.
    /// `None` means the run is stale or this timer owns no countdown.
    pub fn tick_countdown(&mut self, run: u64) -> Option<CountdownState> {
        if run != self.run {
            return None;
        }
        let completed = self.completed;
        let countdown = self.countdown.as_mut()?;
        if completed {
            Some(countdown.tick())
        } else {
            Some(countdown.state())
        }
    }

    pub fn progress_fraction(&self) -> f64 {
        let fraction = self.observed.as_secs_f64() / self.spec.duration().as_secs_f64();
        fraction.clamp(0.0, 1.0)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn status(&self) -> TimerStatus {
        if !self.enabled {
            TimerStatus::Disabled
        } else if self.completed {
            TimerStatus::Completed
        } else {
            TimerStatus::Running
        }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn duration(&self) -> Duration {
        self.spec.duration()
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<Duration> {
        self.completed_at
    }

    pub fn elapsed(&self) -> Duration {
        self.observed
    }

    pub fn remaining(&self) -> Duration {
        self.spec.duration().saturating_sub(self.observed)
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn countdown(&self) -> Option<&CountdownSubTimer> {
        self.countdown.as_ref()
    }

    /// Countdown text, empty when there is no countdown or it is idle
    pub fn countdown_text(&self) -> String {
        self.countdown
            .as_ref()
            .map(CountdownSubTimer::display_text)
            .unwrap_or_default()
    }
}
