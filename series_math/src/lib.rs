//! # Series Math
//!
//! Numeric primitives shared by the indicator analyses.
//! This crate works on plain `&[f64]` slices and knows nothing about dates,
//! series identifiers or the data provider.

use thiserror::Error;

pub mod returns;
pub mod rolling;
pub mod statistics;

pub use crate::returns::percent_returns;
pub use crate::rolling::{rolling_complete, rolling_window, RollingAggregate};
pub use crate::statistics::{
    descriptive_stats, linear_trend, mean, median, pearson_correlation, population_std_dev,
    DescriptiveStats,
};

/// Number of decimal places every published figure is rounded to
pub const OUTPUT_PRECISION: u32 = 4;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Round `value` half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Round to [`OUTPUT_PRECISION`] places.
pub fn round4(value: f64) -> f64 {
    round_to(value, OUTPUT_PRECISION)
}
