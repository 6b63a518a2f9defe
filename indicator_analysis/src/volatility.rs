//! Rolling volatility: standard deviation of percentage returns

use crate::data::{sorted_by_date, values, DataPoint, Observation};
use crate::error::{AnalyticsError, Result};
use serde::Serialize;
use series_math::{percent_returns, rolling_complete, round4, RollingAggregate};

/// Window used when the caller does not ask for one
pub const DEFAULT_VOLATILITY_WINDOW: usize = 30;

/// Returns and rolling volatility of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityResult {
    pub series_id: String,
    pub window: usize,
    /// Percentage return of each observation against the previous one
    pub returns: Vec<DataPoint>,
    /// Population std-dev of each complete window of returns, dated at the
    /// window's last return
    pub volatility: Vec<DataPoint>,
}

/// Rolling volatility of `observations` over `window` returns.
///
/// A zero previous value produces a return of `0`. Windows that are not yet
/// full are omitted.
pub fn volatility(
    series_id: &str,
    observations: &[Observation],
    window: usize,
) -> Result<VolatilityResult> {
    if observations.is_empty() {
        return Err(AnalyticsError::NoData(series_id.to_string()));
    }
    if window == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "Volatility window must be positive".to_string(),
        ));
    }

    let sorted = sorted_by_date(observations);
    let returns = percent_returns(&values(&sorted));
    // returns[j] compares sorted[j + 1] with sorted[j]
    let return_dates: Vec<_> = sorted.iter().skip(1).map(|obs| obs.date).collect();

    let rolling = rolling_complete(&returns, window, RollingAggregate::StdDev)?;

    log::debug!(
        "{}: {} returns, {} volatility points with window {}",
        series_id,
        returns.len(),
        rolling.len(),
        window
    );

    Ok(VolatilityResult {
        series_id: series_id.to_string(),
        window,
        returns: return_dates
            .iter()
            .zip(returns.iter())
            .map(|(&date, &ret)| DataPoint::new(date, round4(ret)))
            .collect(),
        volatility: rolling
            .into_iter()
            .enumerate()
            .map(|(k, std_dev)| DataPoint::new(return_dates[k + window - 1], round4(std_dev)))
            .collect(),
    })
}
