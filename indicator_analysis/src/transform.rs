//! Ingestion transform: clean provider observations into enriched records
//!
//! Unlike the analyses, which drop unparsable points, the transform keeps
//! the provider's row layout: a missing or malformed value is replaced by
//! the last good value before it.

use crate::catalog::{known_info, SeriesInfo};
use crate::data::{parse_date, parse_value, RawObservation};
use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use series_math::{percent_returns, rolling_window, round4, RollingAggregate};

/// Short moving average window added to transformed records
pub const SHORT_WINDOW: usize = 5;

/// Long moving average window added to transformed records
pub const LONG_WINDOW: usize = 20;

/// One cleaned observation with derived columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub ma_5: Option<f64>,
    pub ma_20: Option<f64>,
    /// Percent change against the previous record, `None` on the first one
    pub pct_change: Option<f64>,
}

/// Transformed series ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformOutput {
    pub series_id: String,
    pub metadata: SeriesInfo,
    pub records: Vec<TransformedRecord>,
}

/// Clean and enrich the raw observations of one series.
///
/// Records are sorted by date and forward-filled. Records before the first
/// parsable value are dropped. The `ma_5` and `ma_20` columns are only
/// computed when there are more than five records.
pub fn transform(series_id: &str, raw: &[RawObservation]) -> Result<TransformOutput> {
    let mut dated: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(raw.len());
    for observation in raw {
        let date = match parse_date(&observation.date) {
            Ok(date) => date,
            Err(err) => {
                log::warn!("{}: dropping record: {}", series_id, err);
                continue;
            }
        };
        let value = if observation.is_missing() {
            None
        } else {
            match parse_value(&observation.value) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::warn!("{}: {} on {}, forward-filling", series_id, err, date);
                    None
                }
            }
        };
        dated.push((date, value));
    }
    dated.sort_by_key(|(date, _)| *date);

    let mut last = None;
    let filled: Vec<(NaiveDate, f64)> = dated
        .into_iter()
        .filter_map(|(date, value)| {
            if value.is_some() {
                last = value;
            }
            last.map(|value| (date, value))
        })
        .collect();

    if filled.is_empty() {
        return Err(AnalyticsError::NoData(series_id.to_string()));
    }

    let values: Vec<f64> = filled.iter().map(|(_, value)| *value).collect();
    let (ma_short, ma_long) = if values.len() > SHORT_WINDOW {
        (
            rolling_window(&values, SHORT_WINDOW, RollingAggregate::Mean)?,
            rolling_window(&values, LONG_WINDOW, RollingAggregate::Mean)?,
        )
    } else {
        (vec![None; values.len()], vec![None; values.len()])
    };
    let returns = percent_returns(&values);

    let records = filled
        .iter()
        .enumerate()
        .map(|(i, &(date, value))| TransformedRecord {
            date,
            value: round4(value),
            ma_5: ma_short[i].map(round4),
            ma_20: ma_long[i].map(round4),
            pct_change: i.checked_sub(1).map(|prev| round4(returns[prev])),
        })
        .collect();

    Ok(TransformOutput {
        series_id: series_id.to_string(),
        metadata: known_info(series_id).unwrap_or_default(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(points: &[(&str, &str)]) -> Vec<RawObservation> {
        points.iter().map(|(d, v)| RawObservation::new(*d, *v)).collect()
    }

    #[test]
    fn test_forward_fill_and_percent_change() {
        let output = transform(
            "UNRATE",
            &raw(&[
                ("2024-03-01", "."),
                ("2024-01-01", "4.0"),
                ("2024-02-01", "5.0"),
            ]),
        )
        .unwrap();

        let values: Vec<f64> = output.records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![4.0, 5.0, 5.0]);
        assert_eq!(output.records[0].pct_change, None);
        assert_eq!(output.records[1].pct_change, Some(25.0));
        assert_eq!(output.records[2].pct_change, Some(0.0));
        // Too short for moving averages
        assert!(output.records.iter().all(|r| r.ma_5.is_none() && r.ma_20.is_none()));
        assert_eq!(output.metadata.name.as_deref(), Some("Unemployment Rate"));
    }

    #[test]
    fn test_leading_missing_values_are_dropped() {
        let output = transform(
            "SERIES",
            &raw(&[("2024-01-01", "."), ("2024-01-02", "bad"), ("2024-01-03", "2.0")]),
        )
        .unwrap();

        assert_eq!(output.records.len(), 1);
        assert_eq!(output.metadata, SeriesInfo::default());
    }

    #[test]
    fn test_moving_average_columns() {
        let points: Vec<(String, String)> = (1..=6)
            .map(|day| (format!("2024-01-{:02}", day), format!("{}", day * 10)))
            .collect();
        let raw: Vec<RawObservation> = points
            .iter()
            .map(|(d, v)| RawObservation::new(d.as_str(), v.as_str()))
            .collect();

        let output = transform("SERIES", &raw).unwrap();

        assert_eq!(output.records[3].ma_5, None);
        assert_eq!(output.records[4].ma_5, Some(30.0));
        assert_eq!(output.records[5].ma_5, Some(40.0));
        assert!(output.records.iter().all(|r| r.ma_20.is_none()));
    }

    #[test]
    fn test_nothing_parsable() {
        let err = transform("SERIES", &raw(&[("2024-01-01", ".")])).unwrap_err();
        assert!(matches!(err, AnalyticsError::NoData(_)));
    }
}
