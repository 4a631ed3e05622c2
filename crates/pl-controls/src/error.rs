//! Error types for parameter control.

use thiserror::Error;

/// Result type for parameter control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while applying parameter edits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The model has no parameter with this key.
    #[error("Unknown parameter: {key}")]
    UnknownParam { key: String },

    /// The parameter is derived from the simulation and cannot be edited.
    #[error("Parameter is read-only: {key}")]
    ReadOnly { key: String },

    /// NaN or infinite input.
    #[error("Non-finite value for {key}: {value}")]
    NonFinite { key: String, value: f64 },
}
