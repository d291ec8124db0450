//! Error types shared across the crate

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("timer '{name}' has an invalid duration of {seconds}s (must be positive)")]
    InvalidDuration { name: String, seconds: f64 },
    #[error("timer name must not be empty")]
    EmptyName,
    #[error("a timer named '{0}' already exists")]
    DuplicateName(String),
    #[error("no timer named '{0}'")]
    UnknownTimer(String),
    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
