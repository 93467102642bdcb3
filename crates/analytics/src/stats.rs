//! Small descriptive-statistics helpers.
//!
//! Both functions return NaN for an empty population; callers decide how an
//! undefined result is presented.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Quantile `q` (in `[0, 1]`) with linear interpolation between order statistics.
///
/// For sorted values the position is `q * (n - 1)`; the result interpolates
/// between the values at the floor and ceiling of that position. The input
/// order does not matter.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
