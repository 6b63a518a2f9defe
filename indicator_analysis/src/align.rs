//! Alignment of several series on a shared date axis

use crate::data::{sorted_by_date, SeriesMap};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Several series laid out on the sorted union of their dates.
///
/// Every column in `values` has exactly `dates.len()` entries. A `None`
/// entry means the series had not started yet at that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedDataset {
    pub dates: Vec<NaiveDate>,
    pub values: IndexMap<String, Vec<Option<f64>>>,
    /// Positions where every series has a value
    pub valid_indices: Vec<usize>,
}

impl AlignedDataset {
    /// Number of dates on the shared axis
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Series identifiers in input order
    pub fn series_ids(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// The aligned column of one series
    pub fn column(&self, series_id: &str) -> Option<&[Option<f64>]> {
        self.values.get(series_id).map(Vec::as_slice)
    }

    /// Values of one series restricted to [`Self::valid_indices`]
    pub fn valid_column(&self, series_id: &str) -> Option<Vec<f64>> {
        let column = self.values.get(series_id)?;
        Some(
            self.valid_indices
                .iter()
                .filter_map(|&i| column[i])
                .collect(),
        )
    }
}

/// Align `series` on the sorted union of their dates.
///
/// Each series is walked with its own cursor: a date with an observation
/// takes that value, a date without one carries the most recent earlier
/// value forward, and dates before the first observation stay `None`. When a
/// series repeats a date the observation that comes last in the input wins.
pub fn align(series: &SeriesMap) -> AlignedDataset {
    let dates: Vec<NaiveDate> = series
        .values()
        .flat_map(|observations| observations.iter().map(|obs| obs.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut values = IndexMap::with_capacity(series.len());
    for (series_id, observations) in series {
        let sorted = sorted_by_date(observations);
        let mut cursor = 0;
        let mut current = None;

        let column: Vec<Option<f64>> = dates
            .iter()
            .map(|date| {
                while cursor < sorted.len() && sorted[cursor].date <= *date {
                    current = Some(sorted[cursor].value);
                    cursor += 1;
                }
                current
            })
            .collect();

        values.insert(series_id.clone(), column);
    }

    let valid_indices = (0..dates.len())
        .filter(|&i| values.values().all(|column: &Vec<Option<f64>>| column[i].is_some()))
        .collect();

    log::debug!(
        "aligned {} series on {} dates",
        series.len(),
        dates.len()
    );

    AlignedDataset {
        dates,
        values,
        valid_indices,
    }
}
