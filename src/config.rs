//! Configuration and CLI argument handling

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::{error::Result, presentation::Theme, timer::TimerSpec};

/// Audio backend selection for alert tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioChoice {
    /// SoX if available, otherwise the terminal bell
    Auto,
    Sox,
    Bell,
    Silent,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tacoshack-timers")]
#[command(about = "Independent countdown timers with repeating completion alerts")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port for the local control API
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address for the local control API
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Serve the local control API
    #[arg(long)]
    pub http: bool,

    /// Polling interval in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(10..))]
    pub poll_ms: u64,

    /// Alert tone backend
    #[arg(long, value_enum, default_value = "auto")]
    pub audio: AudioChoice,

    /// Start with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Do not draw the status line on stdout
    #[arg(long)]
    pub no_dashboard: bool,

    /// Do not read timer-name shortcuts from the terminal
    #[arg(long)]
    pub no_keyboard: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn theme(&self) -> Theme {
        if self.dark { Theme::Dark } else { Theme::Light }
    }
}

/// The fixed timer presets: Tips, Work (with countdown) and Overtime
pub fn default_timers() -> Result<Vec<TimerSpec>> {
    Ok(vec![
        TimerSpec::new("Tips", 5.0 * 60.0, false)?,
        TimerSpec::new("Work", 10.0 * 60.0, true)?,
        TimerSpec::new("Overtime", 30.0 * 60.0, false)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tacoshack-timers"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.audio, AudioChoice::Auto);
        assert_eq!(config.theme(), Theme::Light);
        assert_eq!(config.log_level(), "info");
        assert!(!config.http);
    }

    #[test]
    fn test_http_is_opt_in() {
        let config = Config::try_parse_from(["tacoshack-timers", "--http", "-p", "8080"]).unwrap();
        assert!(config.http);
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(Config::try_parse_from(["tacoshack-timers", "--no-http"]).is_err());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "tacoshack-timers",
            "--dark",
            "--audio",
            "silent",
            "--poll-ms",
            "250",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.theme(), Theme::Dark);
        assert_eq!(config.audio, AudioChoice::Silent);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_poll_interval_lower_bound() {
        assert!(Config::try_parse_from(["tacoshack-timers", "--poll-ms", "5"]).is_err());
    }

    #[test]
    fn test_presets() {
        let timers = default_timers().unwrap();
        let summary: Vec<_> = timers
            .iter()
            .map(|t| (t.name(), t.duration().as_secs(), t.has_countdown()))
            .collect();
        assert_eq!(
            summary,
            [("Tips", 300, false), ("Work", 600, true), ("Overtime", 1800, false)]
        );
    }
}
