//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use super::responses::{
    HealthResponse, KeysRequest, KeysResponse, StatusResponse, ThemeResponse, TimerResponse,
};
use crate::{
    error::Error,
    presentation::TimerView,
    state::{AppState, TimerSnapshot},
};

fn error_status(context: &str, e: Error) -> StatusCode {
    match e {
        Error::UnknownTimer(name) => {
            warn!("{}: no timer named '{}'", context, name);
            StatusCode::NOT_FOUND
        }
        other => {
            error!("{}: {}", context, other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn view(state: &AppState, snapshot: &TimerSnapshot) -> Result<TimerView, StatusCode> {
    let theme = state
        .theme()
        .map_err(|e| error_status("Failed to read theme", e))?;
    Ok(TimerView::render(snapshot, theme.palette()))
}

/// Handle GET /timers/:name - Return one timer
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TimerView>, StatusCode> {
    let snapshot = state
        .timer(&name)
        .and_then(|timer| timer.snapshot())
        .map_err(|e| error_status("Failed to read timer", e))?;
    Ok(Json(view(&state, &snapshot)?))
}

/// Handle POST /timers/:name/reset - Restart a timer from zero
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TimerResponse>, StatusCode> {
    let snapshot = state
        .reset_timer(&name)
        .map_err(|e| error_status("Failed to reset timer", e))?;
    info!("Reset endpoint called for '{}'", snapshot.name);
    let message = format!("{} restarted", snapshot.name);
    Ok(Json(TimerResponse::new(message, view(&state, &snapshot)?)))
}

/// Handle POST /timers/:name/enable - Enable (and restart) a timer
pub async fn enable_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TimerResponse>, StatusCode> {
    set_enabled(state, name, true)
}

/// Handle POST /timers/:name/disable - Disable (and clear) a timer
pub async fn disable_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TimerResponse>, StatusCode> {
    set_enabled(state, name, false)
}

fn set_enabled(
    state: Arc<AppState>,
    name: String,
    enabled: bool,
) -> Result<Json<TimerResponse>, StatusCode> {
    let snapshot = state
        .set_timer_enabled(&name, enabled)
        .map_err(|e| error_status("Failed to toggle timer", e))?;
    let message = format!(
        "{} {}",
        snapshot.name,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(Json(TimerResponse::new(message, view(&state, &snapshot)?)))
}

/// Handle POST /keys - Feed characters to the shortcut buffer
pub async fn keys_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KeysRequest>,
) -> Result<Json<KeysResponse>, StatusCode> {
    let outcome = state
        .type_keys(&request.keys)
        .map_err(|e| error_status("Failed to handle keys", e))?;
    if !outcome.reset.is_empty() {
        info!("Keys endpoint reset {:?}", outcome.reset);
    }
    Ok(Json(KeysResponse {
        reset: outcome.reset,
        buffer: outcome.buffer,
        timestamp: Utc::now(),
    }))
}

/// Handle POST /theme/toggle - Switch between light and dark
pub async fn theme_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ThemeResponse>, StatusCode> {
    let theme = state
        .toggle_theme()
        .map_err(|e| error_status("Failed to toggle theme", e))?;
    Ok(Json(ThemeResponse {
        theme,
        palette: *theme.palette(),
    }))
}

/// Handle GET /status - Return every timer
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshots = state
        .snapshots()
        .map_err(|e| error_status("Failed to read timers", e))?;
    let theme = state
        .theme()
        .map_err(|e| error_status("Failed to read theme", e))?;
    let palette = theme.palette();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timers: snapshots
            .iter()
            .map(|snapshot| TimerView::render(snapshot, palette))
            .collect(),
        theme,
        palette: *palette,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
