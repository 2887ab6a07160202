/// Percentage of `values` that are `<= target` (right-side insertion point of
/// `target` in the sorted values, over the count). `None` when `values` is empty.
pub fn percentile_rank_of(values: &[f64], target: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let insertion = sorted.partition_point(|v| *v <= target);
    Some(insertion as f64 / sorted.len() as f64 * 100.0)
}

/// Percentile rank of the last value against the whole series (itself included).
pub fn latest_percentile_rank(values: &[f64]) -> Option<f64> {
    let latest = *values.last()?;
    percentile_rank_of(values, latest)
}
