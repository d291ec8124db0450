//! Tacoshack Timers - independent countdown timers with repeating alerts
//!
//! Each timer is a small state machine computed from the clock on demand.
//! Completing a timer starts a cancellable tone loop and, for timers that
//! own one, a nested countdown. A polling loop drives the state and any
//! number of front ends (terminal line, HTTP API) read from it.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod presentation;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
