//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::{CommandBuffer, KeyEvent, TimerHandle, TimerSnapshot};
use crate::{
    clock::Clock,
    error::{Error, Result},
    presentation::Theme,
    services::{ToneBackend, ToneCadence},
    timer::TimerSpec,
};

/// Outcome of feeding typed characters through the shortcut buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyOutcome {
    /// Names of timers that were reset, in order
    pub reset: Vec<String>,
    /// What is left in the buffer afterwards
    pub buffer: String,
}

/// Owner of every timer, the theme and the shortcut buffer
#[derive(Debug)]
pub struct AppState {
    /// Timers in display order
    timers: Vec<Arc<TimerHandle>>,
    /// Lower-cased name to index into `timers`
    index: HashMap<String, usize>,
    shortcuts: Mutex<CommandBuffer>,
    theme: Mutex<Theme>,
    clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Latest snapshots from the poll loop
    pub snapshot_tx: watch::Sender<Vec<TimerSnapshot>>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Vec<TimerSnapshot>>,
}

/// Everything needed to build an [`AppState`]
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub timers: Vec<TimerSpec>,
    pub backend: ToneBackend,
    pub cadence: ToneCadence,
    pub theme: Theme,
    pub host: String,
    pub port: u16,
}

impl AppState {
    /// Create the app, rejecting duplicate timer names
    pub fn new(options: AppOptions, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut timers = Vec::with_capacity(options.timers.len());
        let mut index = HashMap::new();

        for spec in options.timers {
            let key = spec.key();
            if index.contains_key(&key) {
                return Err(Error::DuplicateName(spec.name().to_string()));
            }
            index.insert(key, timers.len());
            timers.push(Arc::new(TimerHandle::new(
                spec,
                Arc::clone(&clock),
                options.backend.clone(),
                options.cadence,
            )));
        }

        let shortcuts = CommandBuffer::new(timers.iter().map(|timer| timer.name()));
        let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());

        Ok(Self {
            timers,
            index,
            shortcuts: Mutex::new(shortcuts),
            theme: Mutex::new(options.theme),
            clock,
            start_time: Instant::now(),
            port: options.port,
            host: options.host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        })
    }

    pub fn timers(&self) -> &[Arc<TimerHandle>] {
        &self.timers
    }

    /// Case-insensitive lookup
    pub fn timer(&self, name: &str) -> Result<&Arc<TimerHandle>> {
        self.index
            .get(&name.to_lowercase())
            .map(|&i| &self.timers[i])
            .ok_or_else(|| Error::UnknownTimer(name.to_string()))
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Tick every timer and publish the snapshots. A timer that fails to
    /// poll is logged and left out; the others are unaffected.
    pub fn poll_all(&self) -> Vec<TimerSnapshot> {
        let snapshots: Vec<TimerSnapshot> = self
            .timers
            .iter()
            .filter_map(|timer| match timer.poll() {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    error!("Failed to poll timer '{}': {}", timer.name(), e);
                    None
                }
            })
            .collect();

        self.snapshot_tx.send_replace(snapshots.clone());
        snapshots
    }

    /// Current snapshots without advancing any timer
    pub fn snapshots(&self) -> Result<Vec<TimerSnapshot>> {
        self.timers.iter().map(|timer| timer.snapshot()).collect()
    }

    pub fn reset_timer(&self, name: &str) -> Result<TimerSnapshot> {
        let snapshot = self.timer(name)?.reset()?;
        self.record_action(format!("reset {}", snapshot.name));
        Ok(snapshot)
    }

    pub fn set_timer_enabled(&self, name: &str, enabled: bool) -> Result<TimerSnapshot> {
        let snapshot = self.timer(name)?.set_enabled(enabled)?;
        self.record_action(format!(
            "{} {}",
            if enabled { "enable" } else { "disable" },
            snapshot.name
        ));
        Ok(snapshot)
    }

    /// Feed characters through the shortcut buffer, resetting every timer
    /// whose name gets spelled out
    pub fn type_keys(&self, keys: &str) -> Result<KeyOutcome> {
        let mut matched = Vec::new();
        let buffer = {
            let mut shortcuts = self
                .shortcuts
                .lock()
                .map_err(|_| Error::LockPoisoned("shortcut buffer"))?;
            for c in keys.chars() {
                if let KeyEvent::Matched(key) = shortcuts.push(c) {
                    matched.push(key);
                }
            }
            shortcuts.buffer().to_string()
        };

        let mut reset = Vec::with_capacity(matched.len());
        for key in matched {
            let snapshot = self.reset_timer(&key)?;
            reset.push(snapshot.name);
        }

        Ok(KeyOutcome { reset, buffer })
    }

    pub fn theme(&self) -> Result<Theme> {
        self.theme
            .lock()
            .map(|theme| *theme)
            .map_err(|_| Error::LockPoisoned("theme"))
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let mut theme = self.theme.lock().map_err(|_| Error::LockPoisoned("theme"))?;
        *theme = theme.toggled();
        let new_theme = *theme;
        drop(theme);

        info!("Theme switched to {}", new_theme);
        self.record_action(format!("theme {}", new_theme));
        Ok(new_theme)
    }

    fn record_action(&self, action: String) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Stop every alert loop and wait for them to exit
    pub async fn shutdown(&self) {
        for timer in &self.timers {
            timer.alert().shutdown().await;
        }
        if self.timers.iter().any(|timer| timer.alert().is_playing()) {
            warn!("Alert loops still running after shutdown");
        }
        info!("All alerts stopped");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{clock::ManualClock, config::default_timers};

    pub(crate) fn test_state(clock: Arc<ManualClock>) -> AppState {
        AppState::new(
            AppOptions {
                timers: default_timers().unwrap(),
                backend: ToneBackend::Silent,
                cadence: ToneCadence::default(),
                theme: Theme::Light,
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            clock,
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = AppState::new(
            AppOptions {
                timers: vec![
                    TimerSpec::new("Work", 60.0, false).unwrap(),
                    TimerSpec::new("WORK", 30.0, false).unwrap(),
                ],
                backend: ToneBackend::Silent,
                cadence: ToneCadence::default(),
                theme: Theme::Light,
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            Arc::new(ManualClock::default()),
        );
        assert_eq!(result.unwrap_err(), Error::DuplicateName("WORK".to_string()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let state = test_state(Arc::new(ManualClock::default()));
        assert_eq!(state.timer("WORK").unwrap().name(), "Work");
        assert_eq!(state.timer("tips").unwrap().name(), "Tips");
        assert!(matches!(state.timer("lunch"), Err(Error::UnknownTimer(_))));
        let names: Vec<_> = state.timers().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["Tips", "Work", "Overtime"]);
    }

    #[tokio::test]
    async fn test_typed_name_resets_timer() {
        let clock = Arc::new(ManualClock::default());
        let state = test_state(Arc::clone(&clock));
        clock.set(Duration::from_secs(120));
        state.poll_all();
        assert!(state.timer("work").unwrap().snapshot().unwrap().progress > 0.0);

        let outcome = state.type_keys("wor").unwrap();
        assert!(outcome.reset.is_empty());
        assert_eq!(outcome.buffer, "wor");

        let outcome = state.type_keys("k").unwrap();
        assert_eq!(outcome.reset, ["Work"]);
        assert_eq!(outcome.buffer, "");
        assert_eq!(state.timer("work").unwrap().snapshot().unwrap().progress, 0.0);
        // Others untouched
        assert!(state.timer("tips").unwrap().snapshot().unwrap().progress > 0.0);
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset Work"));
    }

    #[tokio::test]
    async fn test_poll_all_publishes_snapshots() {
        let clock = Arc::new(ManualClock::default());
        let state = test_state(Arc::clone(&clock));
        let rx = state.snapshot_tx.subscribe();
        clock.set(Duration::from_secs(300));

        let snapshots = state.poll_all();
        assert_eq!(snapshots.len(), 3);
        assert!(snapshots[0].completed);
        assert!(!snapshots[1].completed);
        assert_eq!(rx.borrow().len(), 3);

        state.shutdown().await;
    }

    #[tokio::test]
    async fn test_poisoned_timer_does_not_block_others() {
        let clock = Arc::new(ManualClock::default());
        let state = test_state(Arc::clone(&clock));
        let rx = state.snapshot_tx.subscribe();
        state.timer("work").unwrap().poison();
        clock.set(Duration::from_secs(60));

        let snapshots = state.poll_all();
        let names: Vec<_> = snapshots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Tips", "Overtime"]);
        assert_eq!(rx.borrow().len(), 2);
        assert!(snapshots.iter().all(|s| s.progress > 0.0));

        assert_eq!(
            state.reset_timer("work").unwrap_err(),
            Error::LockPoisoned("timer state")
        );
        assert!(state.reset_timer("tips").is_ok());
    }

    #[test]
    fn test_toggle_theme() {
        let state = test_state(Arc::new(ManualClock::default()));
        assert_eq!(state.theme().unwrap(), Theme::Light);
        assert_eq!(state.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(state.toggle_theme().unwrap(), Theme::Light);
    }
}
