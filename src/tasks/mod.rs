//! Background tasks module
//!
//! This module contains the tasks that run alongside the timer state: tone
//! playback, countdown ticking, polling and the terminal front end.

pub mod alert_player;
pub mod countdown_ticker;
pub mod dashboard;
pub mod keyboard;
pub mod poll_loop;

// Re-export main types and functions
pub use alert_player::AlertPlayer;
pub use countdown_ticker::countdown_ticker_task;
pub use dashboard::dashboard_task;
pub use keyboard::{keyboard_task, KeyboardExit};
pub use poll_loop::poll_loop_task;
