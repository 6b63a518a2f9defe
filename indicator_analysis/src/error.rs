//! Error types for the indicator_analysis crate

use series_math::MathError;
use thiserror::Error;

/// Custom error types for the indicator_analysis crate
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No observations were available for the requested series or range
    #[error("no data available for series {0}")]
    NoData(String),

    /// An observation value could not be parsed as a finite number
    #[error("Malformed value: {0}")]
    MalformedValue(String),

    /// An observation date is not a `YYYY-MM-DD` calendar date
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the numeric primitives
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading an input file
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl From<toml::de::Error> for AnalyticsError {
    fn from(err: toml::de::Error) -> Self {
        AnalyticsError::Config(err.to_string())
    }
}

impl From<csv::Error> for AnalyticsError {
    fn from(err: csv::Error) -> Self {
        AnalyticsError::Csv(err.to_string())
    }
}
