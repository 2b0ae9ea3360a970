/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Renders a score with exactly two decimals.
///
/// Rounds the exact binary value to the nearest hundredth, ties to even.
pub fn format_usage(score: f64) -> String {
    format!("{:.2}", score)
}

/// Numeric value of a score after two-decimal rounding.
pub fn rounded_usage(score: f64) -> f64 {
    format_usage(score).parse().unwrap_or(score)
}
