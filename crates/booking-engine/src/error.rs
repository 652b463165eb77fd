//! Error types for schedule validation and instant resolution.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid time window on {day}: {start} must be before {end}")]
    InvalidWindow {
        day: &'static str,
        start: String,
        end: String,
    },

    #[error("Invalid wall-clock time: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
