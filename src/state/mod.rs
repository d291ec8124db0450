//! State management module
//!
//! This module contains the per-timer owners and the app-wide state built
//! on top of them.

pub mod app_state;
pub mod command_buffer;
pub mod snapshot;
pub mod timer_handle;

// Re-export main types
pub use app_state::{AppOptions, AppState, KeyOutcome};
pub use command_buffer::{CommandBuffer, KeyEvent};
pub use snapshot::TimerSnapshot;
pub use timer_handle::TimerHandle;
