//! Validated timer configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Name, duration and countdown ownership for one timer
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
    name: String,
    duration: Duration,
    countdown: bool,
}

impl TimerSpec {
    /// Build a spec, rejecting empty names and durations that are zero,
    /// negative or not finite.
    pub fn new(name: impl Into<String>, seconds: f64, countdown: bool) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(Error::InvalidDuration { name, seconds });
        }
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|_| Error::InvalidDuration { name: name.clone(), seconds })?;
        if duration.is_zero() {
            return Err(Error::InvalidDuration { name, seconds });
        }

        Ok(Self {
            name,
            duration,
            countdown,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key, case-insensitive
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        let spec = TimerSpec::new("Work", 600.0, true).unwrap();
        assert_eq!(spec.name(), "Work");
        assert_eq!(spec.key(), "work");
        assert_eq!(spec.duration(), Duration::from_secs(600));
        assert!(spec.has_countdown());
    }

    #[test]
    fn test_rejects_bad_durations() {
        for seconds in [0.0, -5.0, f64::NAN, f64::INFINITY, 1e-12] {
            assert!(matches!(
                TimerSpec::new("Tips", seconds, false),
                Err(Error::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(TimerSpec::new("  ", 60.0, false), Err(Error::EmptyName));
    }
}
