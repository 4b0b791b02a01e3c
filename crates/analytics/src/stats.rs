//! Column statistics. Missing values are `NaN` throughout.

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// `NaN` with fewer than two observations. A run of identical values yields
/// exactly zero rather than rounding noise.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    if values.iter().all(|v| *v == values[0]) {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Trailing standard deviation over the `window` observations strictly
/// before each row.
///
/// Row `t` uses rows `t - window ..= t - 1` and never row `t` itself. Rows
/// with fewer than `window` predecessors, or with a missing value anywhere in
/// their window, are missing.
pub fn lagged_rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|t| {
            if window == 0 || t < window {
                return f64::NAN;
            }
            let lookback = &values[t - window..t];
            if lookback.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                sample_std(lookback)
            }
        })
        .collect()
}

/// The non-missing values of a column.
pub fn present(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}
