//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while driving a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Experiment cannot be played: {what}")]
    NotPlayable { what: &'static str },

    #[error("Core error: {message}")]
    Core { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pl_core::PlError> for SimError {
    fn from(e: pl_core::PlError) -> Self {
        SimError::Core {
            message: e.to_string(),
        }
    }
}
