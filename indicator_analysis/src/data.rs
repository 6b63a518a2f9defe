//! Observation types and parsing of provider data
//!
//! The data provider delivers observations as `{date, value}` string pairs.
//! Points whose value or date cannot be parsed are skipped with a logged
//! warning; the provider's `"."` placeholder for a missing value is skipped
//! quietly.

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder the provider emits for a missing value
pub const MISSING_VALUE_MARKER: &str = ".";

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Observation as delivered by the data provider.
///
/// Extra provider fields such as `realtime_start` are ignored when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }

    /// Parse into a typed [`Observation`]
    pub fn parse(&self) -> Result<Observation> {
        Ok(Observation {
            date: parse_date(&self.date)?,
            value: parse_value(&self.value)?,
        })
    }

    /// Whether the value is the provider's missing-value placeholder
    pub fn is_missing(&self) -> bool {
        self.value.trim() == MISSING_VALUE_MARKER
    }
}

/// A single dated data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Series identifier to observations, in request order
pub type SeriesMap = IndexMap<String, Vec<Observation>>;

/// Raw provider observations keyed by series identifier
pub type RawSeriesMap = IndexMap<String, Vec<RawObservation>>;

/// A dated output value, rounded by the analysis that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|err| AnalyticsError::MalformedDate(format!("{:?}: {}", input, err)))
}

/// Parse a decimal value string into a finite number
pub fn parse_value(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnalyticsError::MalformedValue(format!("{:?}", input))),
    }
}

/// Parse raw observations, skipping points that fail to parse
pub fn parse_observations(series_id: &str, raw: &[RawObservation]) -> Vec<Observation> {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for observation in raw {
        if observation.is_missing() {
            skipped += 1;
            continue;
        }
        match observation.parse() {
            Ok(obs) => parsed.push(obs),
            Err(err) => {
                log::warn!(
                    "{}: skipping observation dated {:?}: {}",
                    series_id,
                    observation.date,
                    err
                );
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::debug!(
            "{}: parsed {} observations, skipped {}",
            series_id,
            parsed.len(),
            skipped
        );
    }

    parsed
}

/// Parse every series of a raw map, keeping the map order
pub fn parse_series_map(raw: &RawSeriesMap) -> SeriesMap {
    raw.iter()
        .map(|(id, observations)| (id.clone(), parse_observations(id, observations)))
        .collect()
}

/// Copy of `observations` sorted ascending by date.
///
/// The sort is stable, so observations sharing a date keep their input order.
pub fn sorted_by_date(observations: &[Observation]) -> Vec<Observation> {
    let mut sorted = observations.to_vec();
    sorted.sort_by_key(|obs| obs.date);
    sorted
}

/// The values of `observations`, in order
pub fn values(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|obs| obs.value).collect()
}

/// Keep observations inside the inclusive `[start, end]` range
pub fn filter_range(
    observations: &[Observation],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Observation> {
    observations
        .iter()
        .filter(|obs| start.map_or(true, |start| obs.date >= start))
        .filter(|obs| end.map_or(true, |end| obs.date <= end))
        .copied()
        .collect()
}

/// Pick `ids` out of `series` in the requested order.
///
/// An empty `ids` list selects every series. Unknown identifiers map to an
/// empty observation list so the analyses can report them as missing data.
pub fn select_series(series: &SeriesMap, ids: &[String]) -> SeriesMap {
    if ids.is_empty() {
        return series.clone();
    }

    ids.iter()
        .map(|id| (id.clone(), series.get(id).cloned().unwrap_or_default()))
        .collect()
}
