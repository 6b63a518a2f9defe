//! Simple moving averages over one or more trailing windows

use crate::data::{sorted_by_date, values, DataPoint, Observation};
use crate::error::{AnalyticsError, Result};
use serde::Serialize;
use series_math::{rolling_complete, round4, RollingAggregate};

/// Windows computed when the caller does not ask for specific ones
pub const DEFAULT_WINDOWS: [usize; 3] = [5, 20, 50];

/// Rolling means for one window size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageSeries {
    pub window: usize,
    /// Column label, e.g. `ma_20`
    pub label: String,
    /// One point per complete window, dated at the window's last observation
    pub values: Vec<DataPoint>,
}

/// Moving averages of a series for every requested window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageResult {
    pub series_id: String,
    pub data: Vec<DataPoint>,
    pub moving_averages: Vec<MovingAverageSeries>,
}

impl MovingAverageResult {
    /// The series computed for `window`, if it was requested
    pub fn window(&self, window: usize) -> Option<&MovingAverageSeries> {
        self.moving_averages.iter().find(|series| series.window == window)
    }
}

/// Trailing simple moving averages of `observations` for each of `windows`.
///
/// Incomplete windows are omitted: a window of `w` over `n >= w` points gives
/// `n - w + 1` values, and a window longer than the series gives none.
pub fn moving_averages(
    series_id: &str,
    observations: &[Observation],
    windows: &[usize],
) -> Result<MovingAverageResult> {
    if observations.is_empty() {
        return Err(AnalyticsError::NoData(series_id.to_string()));
    }
    if windows.is_empty() {
        return Err(AnalyticsError::InvalidParameter(
            "At least one moving average window is required".to_string(),
        ));
    }
    if let Some(&window) = windows.iter().find(|&&window| window == 0) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "Moving average window must be positive, got {}",
            window
        )));
    }

    let sorted = sorted_by_date(observations);
    let history = values(&sorted);

    let mut moving_averages = Vec::with_capacity(windows.len());
    for &window in windows {
        let means = rolling_complete(&history, window, RollingAggregate::Mean)?;
        let points = means
            .into_iter()
            .enumerate()
            .map(|(k, mean)| DataPoint::new(sorted[k + window - 1].date, round4(mean)))
            .collect();

        moving_averages.push(MovingAverageSeries {
            window,
            label: format!("ma_{}", window),
            values: points,
        });
    }

    log::debug!(
        "{}: moving averages for windows {:?} over {} observations",
        series_id,
        windows,
        sorted.len()
    );

    Ok(MovingAverageResult {
        series_id: series_id.to_string(),
        data: sorted
            .iter()
            .map(|obs| DataPoint::new(obs.date, round4(obs.value)))
            .collect(),
        moving_averages,
    })
}
