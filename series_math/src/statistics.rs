//! Descriptive statistics, correlation and trend estimation
//!
//! All dispersion measures use the population variant (divide by `n`).

use crate::round4;
use serde::{Deserialize, Serialize};

/// Summary statistics of a single series.
///
/// An empty input yields `count == 0` with every other field `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Statistics of an empty series
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            median: None,
            min: None,
            max: None,
            std_dev: None,
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation: `sqrt(mean((x - mean)^2))`
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|&value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    Some(variance.sqrt())
}

/// Median using the usual odd/even-length definition
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Compute count, mean, median, min, max and population std-dev, rounded
/// to four decimal places.
pub fn descriptive_stats(values: &[f64]) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::empty();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    DescriptiveStats {
        count: values.len(),
        mean: mean(values).map(round4),
        median: median(values).map(round4),
        min: Some(round4(min)),
        max: Some(round4(max)),
        std_dev: population_std_dev(values).map(round4),
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&value| value == values[0])
}

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns `None` when there are fewer than two paired points, when the
/// lengths differ, when a value is not finite, or when either series has
/// zero variance. The coefficient is rounded to four places.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y.iter()).any(|value| !value.is_finite()) {
        return None;
    }
    // Exact check first: a constant series can still show a tiny non-zero
    // variance after floating point summation.
    if is_constant(x) || is_constant(y) {
        return None;
    }

    let x_mean = mean(x)?;
    let y_mean = mean(y)?;
    let covariance = x
        .iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - x_mean) * (b - y_mean))
        .sum::<f64>()
        / x.len() as f64;

    let x_std = population_std_dev(x)?;
    let y_std = population_std_dev(y)?;
    if x_std == 0.0 || y_std == 0.0 {
        return None;
    }

    let coefficient = (covariance / (x_std * y_std)).clamp(-1.0, 1.0);
    Some(round4(coefficient))
}

/// Average per-step change used to extrapolate a series.
///
/// With five or more points the slope of the last five points is used,
/// `(v[n-1] - v[n-5]) / 4`. With two to four points the full-span slope
/// `(v[n-1] - v[0]) / (n - 1)` is used. Shorter inputs have no trend.
pub fn linear_trend(values: &[f64]) -> f64 {
    let n = values.len();
    if n >= 5 {
        (values[n - 1] - values[n - 5]) / 4.0
    } else if n >= 2 {
        (values[n - 1] - values[0]) / (n - 1) as f64
    } else {
        0.0
    }
}
