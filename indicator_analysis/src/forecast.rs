//! Trend-extrapolation forecasts with widening confidence bounds
//!
//! The forecast is a linear trend continued from the last observation plus a
//! uniform noise term of up to 10% of the last value. It is a lightweight
//! projection, not a fitted statistical model: the requested model name is
//! recorded in the output but every name resolves to the same method.

use crate::calendar::future_dates;
use crate::catalog::Frequency;
use crate::data::{sorted_by_date, values, DataPoint, Observation};
use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use series_math::{linear_trend, round4};

/// Model name used when the caller does not ask for one
pub const DEFAULT_MODEL: &str = "arima";

/// Forecast horizon used when the caller does not ask for one
pub const DEFAULT_PERIODS: usize = 10;

/// Noise amplitude as a fraction of the absolute last value
pub const NOISE_FRACTION: f64 = 0.1;

/// Forecasting methods the core can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Last value plus `trend * step` plus bounded uniform noise
    TrendExtrapolation,
}

impl ForecastMethod {
    /// Method used for a requested model name.
    ///
    /// Only trend extrapolation exists, so every name maps to it.
    pub fn for_model(_model: &str) -> Self {
        ForecastMethod::TrendExtrapolation
    }

    /// Project `periods` steps past the end of `history`.
    ///
    /// Returns unrounded `(value, lower, upper)` triples for steps `1..=periods`.
    pub fn project<R: Rng>(
        &self,
        history: &[f64],
        periods: usize,
        noise: NoiseMode,
        rng: &mut R,
    ) -> Vec<(f64, f64, f64)> {
        match self {
            ForecastMethod::TrendExtrapolation => {
                let last = history.last().copied().unwrap_or(0.0);
                let trend = linear_trend(history);
                let volatility = 2.0 * trend.abs();
                let amplitude = NOISE_FRACTION * last.abs();

                (1..=periods)
                    .map(|step| {
                        let step = step as f64;
                        let value = last + trend * step + noise.sample(amplitude, rng);
                        let spread = volatility * step;
                        (value, value - spread, value + spread)
                    })
                    .collect()
            }
        }
    }
}

/// Whether forecasts include the random noise term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Uniform noise in `[-amplitude, amplitude]`
    #[default]
    Uniform,
    /// No noise; forecasts become a pure function of the input
    Disabled,
}

impl NoiseMode {
    fn sample<R: Rng>(&self, amplitude: f64, rng: &mut R) -> f64 {
        match self {
            NoiseMode::Uniform if amplitude > 0.0 => rng.gen_range(-amplitude..=amplitude),
            _ => 0.0,
        }
    }
}

/// Noise settings for [`forecast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForecastSettings {
    pub noise: NoiseMode,
    /// Seed for the noise generator; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

/// One projected step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Historical data, projection and the trend that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub series_id: String,
    /// Model name as requested
    pub model: String,
    pub method: ForecastMethod,
    pub frequency: Frequency,
    pub trend: f64,
    pub historical: Vec<DataPoint>,
    pub forecast: Vec<ForecastPoint>,
}

/// Forecast `periods` steps of a series.
///
/// Noise is drawn from a generator seeded with `settings.seed` when one is
/// given, otherwise from the thread-local generator.
pub fn forecast(
    series_id: &str,
    observations: &[Observation],
    periods: usize,
    model: &str,
    settings: &ForecastSettings,
) -> Result<ForecastResult> {
    match settings.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            forecast_with_rng(series_id, observations, periods, model, settings.noise, &mut rng)
        }
        None => {
            let mut rng = rand::thread_rng();
            forecast_with_rng(series_id, observations, periods, model, settings.noise, &mut rng)
        }
    }
}

/// [`forecast`] with a caller-supplied noise generator
pub fn forecast_with_rng<R: Rng>(
    series_id: &str,
    observations: &[Observation],
    periods: usize,
    model: &str,
    noise: NoiseMode,
    rng: &mut R,
) -> Result<ForecastResult> {
    if observations.is_empty() {
        return Err(AnalyticsError::NoData(series_id.to_string()));
    }
    if periods == 0 {
        return Err(AnalyticsError::InvalidParameter(
            "Forecast periods must be positive".to_string(),
        ));
    }

    let sorted = sorted_by_date(observations);
    let history = values(&sorted);
    let last_date = sorted[sorted.len() - 1].date;

    let method = ForecastMethod::for_model(model);
    let frequency = Frequency::for_series(series_id);
    let dates = future_dates(last_date, periods, frequency)?;
    let projection = method.project(&history, periods, noise, rng);

    log::debug!(
        "{}: forecasting {} {} periods from {} observations",
        series_id,
        periods,
        frequency,
        history.len()
    );

    let forecast = dates
        .into_iter()
        .zip(projection)
        .map(|(date, (value, lower, upper))| ForecastPoint {
            date,
            value: round4(value),
            lower: round4(lower),
            upper: round4(upper),
        })
        .collect();

    Ok(ForecastResult {
        series_id: series_id.to_string(),
        model: model.to_string(),
        method,
        frequency,
        trend: round4(linear_trend(&history)),
        historical: sorted
            .iter()
            .map(|obs| DataPoint::new(obs.date, round4(obs.value)))
            .collect(),
        forecast,
    })
}
