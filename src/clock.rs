//! Clock sources
//!
//! Timestamps are `Duration`s since the Unix epoch. `SystemClock` anchors a
//! monotonic instant to the wall clock once at startup, so readings never go
//! backwards but still line up with wall-clock seconds (the completion flash
//! depends on that).

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use chrono::Utc;
use tokio::time::Instant;

/// Source of the current time for timer state machines
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Duration;
}

/// Monotonic clock aligned to wall-clock time at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    wall_origin: Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        let micros = Utc::now().timestamp_micros().max(0) as u64;
        Self {
            origin: Instant::now(),
            wall_origin: Duration::from_micros(micros),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.wall_origin + self.origin.elapsed()
    }
}

/// Hand-driven clock with millisecond resolution
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now_ms: AtomicU64::new(start.as_millis() as u64),
        }
    }

    pub fn set(&self, now: Duration) {
        self.now_ms.store(now.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now_ms.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Duration::from_secs(5));
        assert_eq!(clock.now(), Duration::from_secs(5));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(5250));
        clock.set(Duration::ZERO);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        tokio::time::advance(Duration::from_millis(40)).await;
        let second = clock.now();
        assert!(second >= first + Duration::from_millis(40));
    }
}
