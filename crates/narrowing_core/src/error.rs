//! Error type shared by every fallible operation in the core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NarrowingError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NarrowingError {
    #[error("precision must be non-negative, got {0}")]
    NegativePrecision(i64),

    #[error("precision must be a whole number, got {0}")]
    NonIntegerPrecision(f64),

    #[error("precision {requested} exceeds the supported maximum of {max} digits")]
    PrecisionTooLarge { requested: i64, max: usize },

    #[error("precision {requested} is outside the configured range {min}..={max}")]
    PrecisionOutOfRange { requested: i64, min: usize, max: usize },

    #[error("speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
