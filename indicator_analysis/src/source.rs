//! Loading provider observations from JSON or CSV input

use crate::data::{RawObservation, RawSeriesMap};
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One row of a `series_id,date,value` CSV file
#[derive(Debug, Deserialize)]
struct CsvRow {
    series_id: String,
    date: String,
    value: String,
}

/// Load observations from `path`.
///
/// Files ending in `.csv` are read as `series_id,date,value` rows; anything
/// else is read as a JSON object mapping series ids to observation lists.
pub fn load_path(path: impl AsRef<Path>) -> Result<RawSeriesMap> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let series = if is_csv {
        load_csv_reader(reader)?
    } else {
        load_json_reader(reader)?
    };

    log::debug!("loaded {} series from {}", series.len(), path.display());
    Ok(series)
}

/// Read a JSON object of `seriesId -> [{date, value}]`
pub fn load_json_reader<R: Read>(reader: R) -> Result<RawSeriesMap> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read `series_id,date,value` rows; series keep their first-appearance order
pub fn load_csv_reader<R: Read>(reader: R) -> Result<RawSeriesMap> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut series = RawSeriesMap::new();
    for row in csv_reader.deserialize() {
        let row: CsvRow = row?;
        series
            .entry(row.series_id)
            .or_default()
            .push(RawObservation::new(row.date, row.value));
    }
    Ok(series)
}
