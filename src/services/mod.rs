pub mod abstractive;
pub mod sentiment;
pub mod tabular;
pub mod text;

/// Rounds `value` to `places` decimal places using its exact decimal
/// expansion, so `0.2495` (stored just below the tie) rounds down.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
