//! Timer core
//!
//! Pure state: nothing in here spawns tasks or touches audio.

pub mod countdown;
pub mod spec;
pub mod state_machine;

pub use countdown::{format_mm_ss, CountdownState, CountdownSubTimer};
pub use spec::TimerSpec;
pub use state_machine::{flash_phase, FlashPhase, Tick, Timer, TimerStatus};
