//! # Macro Lens
//!
//! `macro_lens` bundles the economic indicator analytics of this workspace:
//! [`series_math`] for the numeric primitives and [`indicator_analysis`] for
//! the dated, per-series analyses built on top of them.
//!
//! ## Example
//!
//! ```
//! use macro_lens::indicator_analysis::data::{parse_observations, RawObservation};
//! use macro_lens::indicator_analysis::volatility;
//!
//! let raw = vec![
//!     RawObservation::new("2024-01-01", "100"),
//!     RawObservation::new("2024-01-02", "102"),
//!     RawObservation::new("2024-01-03", "101"),
//! ];
//! let observations = parse_observations("SP500", &raw);
//!
//! let result = volatility("SP500", &observations, 2).unwrap();
//! assert_eq!(result.returns.len(), 2);
//! assert_eq!(result.volatility.len(), 1);
//! ```

pub use indicator_analysis;
pub use series_math;

pub use indicator_analysis::{AnalysisOutcome, AnalyticsError};
pub use series_math::{DescriptiveStats, MathError};
