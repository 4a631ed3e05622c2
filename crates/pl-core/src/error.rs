use thiserror::Error;

pub type PlResult<T> = Result<T, PlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
