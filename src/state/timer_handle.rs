//! Shared owner of one timer: its state machine, alert loop and countdown driver

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use super::TimerSnapshot;
use crate::{
    clock::Clock,
    error::{Error, Result},
    services::{ToneBackend, ToneCadence},
    tasks::{countdown_ticker_task, AlertPlayer},
    timer::{CountdownState, Timer, TimerSpec},
};

/// One timer plus the background work hanging off it
///
/// The alert signal is always updated while the timer lock is held, so a
/// reset racing a poll cannot stop the alert of the run that follows it.
#[derive(Debug)]
pub struct TimerHandle {
    name: String,
    key: String,
    timer: Mutex<Timer>,
    clock: Arc<dyn Clock>,
    alert: AlertPlayer,
}

impl TimerHandle {
    pub fn new(
        spec: TimerSpec,
        clock: Arc<dyn Clock>,
        backend: ToneBackend,
        cadence: ToneCadence,
    ) -> Self {
        let name = spec.name().to_string();
        let key = spec.key();
        let timer = Timer::new(spec, clock.now());
        Self {
            alert: AlertPlayer::new(name.clone(), backend, cadence),
            name,
            key,
            timer: Mutex::new(timer),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Timer>> {
        self.timer.lock().map_err(|_| Error::LockPoisoned("timer state"))
    }

    /// Advance the timer to the clock's current time, starting the alert and
    /// the countdown on the completion edge
    pub fn poll(self: &Arc<Self>) -> Result<TimerSnapshot> {
        let now = self.clock.now();
        let mut timer = self.lock()?;
        let tick = timer.tick(now);
        let run = timer.run();

        if tick.just_completed {
            self.alert.start(run)?;
            if tick.countdown_activated.is_some() {
                tokio::spawn(countdown_ticker_task(Arc::clone(self), run));
            }
        }

        Ok(TimerSnapshot::capture(&timer, self.alert.is_playing(), now))
    }

    /// Re-arm from zero and silence any alert
    pub fn reset(&self) -> Result<TimerSnapshot> {
        let now = self.clock.now();
        let mut timer = self.lock()?;
        timer.reset(now);
        self.alert.stop();
        info!("Timer '{}' reset", self.name);

        Ok(TimerSnapshot::capture(&timer, self.alert.is_playing(), now))
    }

    /// Toggle enabled; this always resets the timer as well
    pub fn set_enabled(&self, enabled: bool) -> Result<TimerSnapshot> {
        let now = self.clock.now();
        let mut timer = self.lock()?;
        timer.set_enabled(enabled, now);
        self.alert.stop();
        info!(
            "Timer '{}' {}",
            self.name,
            if enabled { "enabled" } else { "disabled" }
        );

        Ok(TimerSnapshot::capture(&timer, self.alert.is_playing(), now))
    }

    pub fn tick_countdown(&self, run: u64) -> Result<Option<CountdownState>> {
        Ok(self.lock()?.tick_countdown(run))
    }

    /// Current state without advancing the timer
    pub fn snapshot(&self) -> Result<TimerSnapshot> {
        let now = self.clock.now();
        let timer = self.lock()?;
        Ok(TimerSnapshot::capture(&timer, self.alert.is_playing(), now))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn alert(&self) -> &AlertPlayer {
        &self.alert
    }

    /// Panic while holding the timer lock, leaving it poisoned
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let timer = &self.timer;
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = timer.lock();
            panic!("poisoning timer lock");
        }));
    }
}
