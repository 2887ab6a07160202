use argminmax::ArgMinMax;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// (min, max) of a slice, or `None` when empty.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    Some((get_min(vec), get_max(vec)))
}

/// Value extent padded by `pad_pct` of its span, always including zero.
/// A flat series gets a fixed +/- 0.05 band so the axis never collapses.
pub fn padded_extent_with_zero(vec: &[f64], pad_pct: f64) -> (f64, f64) {
    let (lo, hi) = match get_min_max(vec) {
        Some((lo, hi)) => (lo.min(0.0), hi.max(0.0)),
        None => (0.0, 0.0),
    };
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 0.05, hi + 0.05);
    }
    (lo - span * pad_pct, hi + span * pad_pct)
}

/// Roughly `count` evenly spaced "nice" tick values covering [lo, hi].
pub fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !(hi > lo) || count == 0 {
        return vec![lo];
    }
    let raw_step = (hi - lo) / count as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        assert_eq!(get_min_max(&[0.3, -1.5, 2.0]), Some((-1.5, 2.0)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn test_padded_extent_includes_zero() {
        let (lo, hi) = padded_extent_with_zero(&[0.5, 1.5], 0.1);
        assert!(lo < 0.0);
        assert!(hi > 1.5);
    }

    #[test]
    fn test_flat_extent_is_not_degenerate() {
        let (lo, hi) = padded_extent_with_zero(&[0.0, 0.0], 0.1);
        assert!(hi - lo > 0.09);
    }

    #[test]
    fn test_nice_ticks() {
        // span 1.14 over 5 ticks -> step 0.25
        let ticks = nice_ticks(-0.23, 0.91, 5);
        let expected = [0.0, 0.25, 0.5, 0.75];
        assert_eq!(ticks.len(), expected.len());
        for (t, e) in ticks.iter().zip(expected) {
            assert!((t - e).abs() < 1e-12, "tick {} != {}", t, e);
        }
    }
}
