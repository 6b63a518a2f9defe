//! Per-series descriptive statistics

use crate::data::{values, SeriesMap};
use indexmap::IndexMap;
use series_math::{descriptive_stats, DescriptiveStats};

/// Descriptive statistics of each series over its own observations.
///
/// Series without observations report `count == 0` and null statistics.
pub fn summarize(series: &SeriesMap) -> IndexMap<String, DescriptiveStats> {
    series
        .iter()
        .map(|(id, observations)| (id.clone(), descriptive_stats(&values(observations))))
        .collect()
}
