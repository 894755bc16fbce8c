//! Reference vector mean.
//!
//! Models the built-in mean of a high-level statistical environment: sum
//! divided by length, followed by a correction pass over the residuals when
//! the first estimate is finite. The harness benchmarks `mean` against it.

/// Mean of a slice of values. Empty input yields NaN.
pub fn reference_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let n = values.len() as f64;
    let estimate = values.iter().sum::<f64>() / n;

    if !estimate.is_finite() {
        return estimate;
    }

    let correction = values.iter().map(|x| x - estimate).sum::<f64>() / n;
    estimate + correction
}
