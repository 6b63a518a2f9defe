//! # Indicator Analysis
//!
//! Analytics over economic indicator series as delivered by the data
//! provider: ordered `(date, value)` observations identified by a series id
//! such as `UNRATE` or `DGS10`.
//!
//! ## Features
//!
//! - Alignment of several series on the union of their dates, with forward-fill
//! - Pairwise Pearson correlation matrix
//! - Trend forecast with confidence bounds and cadence-aware future dates
//! - Simple moving averages over several windows
//! - Rolling volatility of percentage returns
//! - Descriptive statistics and the ingestion transform (forward-fill,
//!   `ma_5`/`ma_20`, percent change)
//!
//! Every analysis is a pure function of its inputs. Failures are reported as
//! [`AnalyticsError`] and converted to an `{"error": "..."}` envelope with
//! [`AnalysisOutcome`] at the JSON boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use indicator_analysis::data::{parse_observations, RawObservation};
//! use indicator_analysis::moving_average::moving_averages;
//!
//! let raw = vec![
//!     RawObservation::new("2024-01-01", "100"),
//!     RawObservation::new("2024-01-02", "102"),
//!     RawObservation::new("2024-01-03", "."),
//!     RawObservation::new("2024-01-04", "104"),
//! ];
//! let observations = parse_observations("SP500", &raw);
//!
//! let result = moving_averages("SP500", &observations, &[2]).unwrap();
//! assert_eq!(result.window(2).unwrap().values.len(), 2);
//! ```

pub mod align;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod correlation;
pub mod data;
pub mod error;
pub mod forecast;
pub mod moving_average;
pub mod outcome;
pub mod source;
pub mod summary;
pub mod transform;
pub mod volatility;

pub use crate::align::{align, AlignedDataset};
pub use crate::catalog::{known_info, Frequency, SeriesInfo};
pub use crate::config::AnalysisConfig;
pub use crate::correlation::{correlate, CorrelationResult};
pub use crate::data::{DataPoint, Observation, RawObservation, RawSeriesMap, SeriesMap};
pub use crate::error::{AnalyticsError, Result};
pub use crate::forecast::{forecast, ForecastResult, ForecastSettings, NoiseMode};
pub use crate::moving_average::{moving_averages, MovingAverageResult};
pub use crate::outcome::AnalysisOutcome;
pub use crate::summary::summarize;
pub use crate::transform::{transform, TransformOutput};
pub use crate::volatility::{volatility, VolatilityResult};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the library
pub const NAME: &str = env!("CARGO_PKG_NAME");
