//! Error types for the pl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI and the GUI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unknown experiment: {0}")]
    UnknownExperiment(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parameter error: {0}")]
    Control(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pl-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pl_controls::ControlError> for AppError {
    fn from(err: pl_controls::ControlError) -> Self {
        AppError::Control(err.to_string())
    }
}

impl From<pl_sim::SimError> for AppError {
    fn from(err: pl_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<pl_results::ResultsError> for AppError {
    fn from(err: pl_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<pl_core::PlError> for AppError {
    fn from(err: pl_core::PlError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
