//! Trailing rolling-window aggregation
//!
//! Contains streaming accumulators for the two aggregates the analyses need:
//! - Rolling mean (simple moving average)
//! - Rolling population standard deviation
//!
//! and the [`rolling_window`] / [`rolling_complete`] drivers that run an
//! accumulator over a whole slice.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Aggregate applied to each trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingAggregate {
    Mean,
    StdDev,
}

/// Streaming simple moving average over the last `window` values
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingMean {
    /// Create a new rolling mean with the specified window
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::new(),
        })
    }

    /// Push a new value, evicting the oldest one once the window is full
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.window {
            self.values.pop_front();
        }
    }

    /// Whether `window` values have been seen
    pub fn is_full(&self) -> bool {
        self.values.len() == self.window
    }

    /// Current mean of the window
    pub fn value(&self) -> Result<f64> {
        if !self.is_full() {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for rolling mean. Need {} values, have {}.",
                self.window,
                self.values.len()
            )));
        }

        // Recomputed from the window: a running total drifts once large values leave it
        Ok(self.values.iter().sum::<f64>() / self.window as f64)
    }

    /// Get the window size
    pub fn window(&self) -> usize {
        self.window
    }

    /// Reset the accumulator, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

/// Streaming population standard deviation over the last `window` values
#[derive(Debug, Clone)]
pub struct RollingStdDev {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingStdDev {
    /// Create a new rolling standard deviation with the specified window
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::new(),
        })
    }

    /// Push a new value, evicting the oldest one once the window is full
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.window {
            self.values.pop_front();
        }
    }

    /// Whether `window` values have been seen
    pub fn is_full(&self) -> bool {
        self.values.len() == self.window
    }

    /// Current population standard deviation of the window
    pub fn value(&self) -> Result<f64> {
        if !self.is_full() {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for rolling standard deviation. Need {} values, have {}.",
                self.window,
                self.values.len()
            )));
        }

        let mean = self.values.iter().sum::<f64>() / self.window as f64;
        let variance: f64 = self
            .values
            .iter()
            .map(|&value| {
                let diff = value - mean;
                diff * diff
            })
            .sum::<f64>()
            / self.window as f64;

        Ok(variance.sqrt())
    }

    /// Get the window size
    pub fn window(&self) -> usize {
        self.window
    }

    /// Reset the accumulator, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

enum Accumulator {
    Mean(RollingMean),
    StdDev(RollingStdDev),
}

impl Accumulator {
    fn new(window: usize, aggregate: RollingAggregate) -> Result<Self> {
        Ok(match aggregate {
            RollingAggregate::Mean => Accumulator::Mean(RollingMean::new(window)?),
            RollingAggregate::StdDev => Accumulator::StdDev(RollingStdDev::new(window)?),
        })
    }

    fn push(&mut self, value: f64) -> Option<f64> {
        match self {
            Accumulator::Mean(mean) => {
                mean.update(value);
                mean.value().ok()
            }
            Accumulator::StdDev(std_dev) => {
                std_dev.update(value);
                std_dev.value().ok()
            }
        }
    }
}

/// Apply `aggregate` to every trailing window of `window` values.
///
/// The output has the same length as `values`; position `i` is `None` while
/// `i < window - 1` and the aggregate of `values[i + 1 - window..=i]` after.
pub fn rolling_window(
    values: &[f64],
    window: usize,
    aggregate: RollingAggregate,
) -> Result<Vec<Option<f64>>> {
    let mut accumulator = Accumulator::new(window, aggregate)?;
    if window > values.len() {
        return Ok(vec![None; values.len()]);
    }
    Ok(values.iter().map(|&value| accumulator.push(value)).collect())
}

/// Like [`rolling_window`] but only the complete windows are kept, so the
/// output has `values.len() - window + 1` entries (or none when the input is
/// shorter than the window). Entry `k` covers `values[k..k + window]`.
pub fn rolling_complete(
    values: &[f64],
    window: usize,
    aggregate: RollingAggregate,
) -> Result<Vec<f64>> {
    Ok(rolling_window(values, window, aggregate)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_mean_calculation() {
        let mut sma = RollingMean::new(3).unwrap();

        // Not enough data yet
        assert!(sma.value().is_err());

        sma.update(2.0);
        sma.update(4.0);
        assert!(sma.value().is_err());

        sma.update(6.0);
        assert_eq!(sma.value().unwrap(), 4.0); // (2 + 4 + 6) / 3 = 4

        // The window slides, dropping the oldest value
        sma.update(8.0);
        assert_eq!(sma.value().unwrap(), 6.0); // (4 + 6 + 8) / 3 = 6
    }

    #[test]
    fn test_rolling_std_dev_calculation() {
        let mut std_dev = RollingStdDev::new(3).unwrap();

        std_dev.update(10.0);
        std_dev.update(20.0);
        std_dev.update(30.0);

        // sqrt(((10-20)^2 + (20-20)^2 + (30-20)^2) / 3)
        let expected = (200.0f64 / 3.0).sqrt();
        assert_relative_eq!(std_dev.value().unwrap(), expected, epsilon = 1e-12);

        std_dev.reset();
        assert!(std_dev.value().is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(RollingMean::new(0).is_err());
        assert!(RollingStdDev::new(0).is_err());
        assert!(matches!(
            rolling_window(&[1.0, 2.0], 0, RollingAggregate::Mean),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rolling_window_keeps_leading_nulls() {
        let out = rolling_window(&[1.0, 2.0, 3.0, 4.0], 2, RollingAggregate::Mean).unwrap();
        assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
    }

    #[test]
    fn test_rolling_complete_drops_incomplete_windows() {
        let values = [100.0, 102.0, 101.0, 105.0, 110.0];

        let full = rolling_complete(&values, 5, RollingAggregate::Mean).unwrap();
        assert_eq!(full.len(), 1);
        assert_relative_eq!(full[0], 103.6, epsilon = 1e-9);

        let short = rolling_complete(&values, 6, RollingAggregate::Mean).unwrap();
        assert!(short.is_empty());
    }

    #[test]
    fn test_rolling_std_dev_window_of_one_is_zero() {
        let out = rolling_complete(&[3.0, 9.0, -4.0], 1, RollingAggregate::StdDev).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rolling_mean_ignores_evicted_magnitudes() {
        let mut values = vec![1e16];
        values.extend(std::iter::repeat(0.1).take(10));

        let out = rolling_complete(&values, 2, RollingAggregate::Mean).unwrap();
        assert_eq!(out.len(), 10);
        assert_relative_eq!(out[9], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_window_yields_no_complete_windows() {
        let values = [1.0, 2.0, 3.0];

        let padded = rolling_window(&values, usize::MAX, RollingAggregate::Mean).unwrap();
        assert_eq!(padded, vec![None, None, None]);
        assert!(rolling_complete(&values, usize::MAX, RollingAggregate::StdDev)
            .unwrap()
            .is_empty());

        let mut std_dev = RollingStdDev::new(usize::MAX).unwrap();
        std_dev.update(1.0);
        assert!(std_dev.value().is_err());
    }
}
