//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::presentation::{Palette, Theme, TimerView};

/// Response for actions on a single timer
#[derive(Debug, Clone, Serialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl TimerResponse {
    pub fn new(message: String, timer: TimerView) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Full status of every timer
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timers: Vec<TimerView>,
    pub theme: Theme,
    pub palette: Palette,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Body of POST /keys
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysRequest {
    pub keys: String,
}

/// Result of feeding shortcut keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub reset: Vec<String>,
    pub buffer: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of toggling the theme
#[derive(Debug, Clone, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub palette: Palette,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
