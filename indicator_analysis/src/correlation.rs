//! Pairwise Pearson correlation between aligned series

use crate::align::align;
use crate::catalog::SeriesInfo;
use crate::data::SeriesMap;
use indexmap::IndexMap;
use serde::Serialize;
use series_math::pearson_correlation;

/// Square correlation matrix keyed by series identifier
pub type CorrelationMatrix = IndexMap<String, IndexMap<String, Option<f64>>>;

/// Correlation matrix plus the metadata of every correlated series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// `matrix[a][b]` is the coefficient of `a` against `b`, `None` when
    /// there are too few common dates or a series is constant
    pub matrix: CorrelationMatrix,
    pub series: IndexMap<String, SeriesInfo>,
    /// Number of dates on which every series had a value
    pub observations: usize,
}

impl CorrelationResult {
    /// Coefficient of `a` against `b`
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.matrix.get(a).and_then(|row| row.get(b)).copied().flatten()
    }
}

/// Correlate every pair of `series`.
///
/// The series are aligned with forward-fill and only the dates on which all
/// of them have a value take part. Diagonal cells are always `1.0`; each
/// off-diagonal pair is computed once and mirrored, so the matrix is
/// symmetric. Fewer than two series is not an error: a single series yields
/// a one-cell matrix and no series yields an empty one.
pub fn correlate(
    series: &SeriesMap,
    metadata: &IndexMap<String, SeriesInfo>,
) -> CorrelationResult {
    let aligned = align(series);
    let ids: Vec<String> = aligned.series_ids().cloned().collect();
    let columns: Vec<Vec<f64>> = ids
        .iter()
        .map(|id| aligned.valid_column(id).unwrap_or_default())
        .collect();

    let n = ids.len();
    let mut grid = vec![vec![None; n]; n];
    for i in 0..n {
        grid[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let coefficient = pearson_correlation(&columns[i], &columns[j]);
            grid[i][j] = coefficient;
            grid[j][i] = coefficient;
        }
    }

    let matrix = ids
        .iter()
        .zip(grid)
        .map(|(row_id, row)| {
            let cells = ids.iter().cloned().zip(row).collect::<IndexMap<_, _>>();
            (row_id.clone(), cells)
        })
        .collect();

    let series_info = ids
        .iter()
        .map(|id| (id.clone(), metadata.get(id).cloned().unwrap_or_default()))
        .collect();

    if n > 1 && aligned.valid_indices.len() < 2 {
        log::warn!(
            "only {} common dates across {} series; correlations are undefined",
            aligned.valid_indices.len(),
            n
        );
    }

    CorrelationResult {
        matrix,
        series: series_info,
        observations: aligned.valid_indices.len(),
    }
}
