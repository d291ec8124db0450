//! External service integration module
//!
//! Everything that reaches outside the process (currently only audio output)
//! lives here.

pub mod tone;

pub use tone::{check_sox_available, ToneBackend, ToneCadence};
