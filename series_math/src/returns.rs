//! Period-over-period returns

/// Percentage change between consecutive values.
///
/// `returns[i - 1] = (v[i] - v[i - 1]) / v[i - 1] * 100` for `i >= 1`, so the
/// output is one shorter than the input. A zero previous value yields a
/// return of `0` instead of an infinite or NaN result.
pub fn percent_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }

    values
        .windows(2)
        .map(|w| {
            if w[0] == 0.0 {
                0.0
            } else {
                (w[1] - w[0]) / w[0] * 100.0
            }
        })
        .collect()
}
