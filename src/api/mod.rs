//! HTTP API module
//!
//! A local control surface for the timers: everything a front end needs to
//! draw them and act on them.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/timers/:name", get(timer_handler))
        .route("/timers/:name/reset", post(reset_handler))
        .route("/timers/:name/enable", post(enable_handler))
        .route("/timers/:name/disable", post(disable_handler))
        .route("/keys", post(keys_handler))
        .route("/theme/toggle", post(theme_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{clock::ManualClock, state::app_state::tests::test_state};

    fn app() -> (Arc<ManualClock>, Arc<AppState>, Router) {
        let clock = Arc::new(ManualClock::default());
        let state = Arc::new(test_state(Arc::clone(&clock)));
        let router = create_router(Arc::clone(&state));
        (clock, state, router)
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_status_lists_timers() {
        let (clock, state, router) = app();
        clock.set(Duration::from_secs(60));
        state.poll_all();

        let (status, body) = send(router, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        let timers = body["timers"].as_array().unwrap();
        assert_eq!(timers.len(), 3);
        assert_eq!(timers[0]["name"], "Tips");
        assert_eq!(timers[0]["status"], "running");
        assert_eq!(body["theme"], "light");
    }

    #[tokio::test]
    async fn test_reset_and_unknown_timer() {
        let (clock, state, router) = app();
        clock.set(Duration::from_secs(120));
        state.poll_all();

        let (status, body) = send(router.clone(), "POST", "/timers/WORK/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["name"], "Work");
        assert_eq!(body["timer"]["progress"], 0.0);

        let (status, _) = send(router, "POST", "/timers/lunch/reset", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_disable_then_enable() {
        let (_clock, _state, router) = app();
        let (status, body) = send(router.clone(), "POST", "/timers/tips/disable", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["status"], "disabled");

        let (_, body) = send(router, "POST", "/timers/tips/enable", None).await;
        assert_eq!(body["timer"]["status"], "running");
    }

    #[tokio::test]
    async fn test_keys_reset_timer() {
        let (_clock, _state, router) = app();
        let (status, body) =
            send(router, "POST", "/keys", Some(r#"{"keys": "ov/work"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reset"], serde_json::json!(["Work"]));
        assert_eq!(body["buffer"], "");
    }

    #[tokio::test]
    async fn test_theme_toggle_and_health() {
        let (_clock, state, router) = app();
        let (_, body) = send(router.clone(), "POST", "/theme/toggle", None).await;
        assert_eq!(body["theme"], "dark");
        assert_eq!(body["palette"]["accent"], "#10a37f");
        assert_eq!(state.theme().unwrap(), crate::presentation::Theme::Dark);

        let (status, body) = send(router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
