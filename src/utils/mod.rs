//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod signals;
pub mod terminal;

// Re-export main functions
pub use signals::shutdown_signal;
pub use terminal::{stdin_is_terminal, CrlfWriter, RawModeGuard};
