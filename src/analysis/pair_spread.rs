use itertools::{EitherOrBoth, Itertools};

use crate::domain::PairSpec;
use crate::models::{PairSpreadSeries, RollingReturnSeries};

/// Target minus base on the dates both series share (inner join, sorted merge).
/// Volatile pairs are clipped to `[-clip_bound, clip_bound]`.
pub fn pair_spread(
    pair: &PairSpec,
    target: &RollingReturnSeries,
    base: &RollingReturnSeries,
    clip_bound: f64,
) -> PairSpreadSeries {
    let target_iter = target.dates.iter().zip(target.values.iter());
    let base_iter = base.dates.iter().zip(base.values.iter());

    let (dates, raw): (Vec<_>, Vec<_>) = target_iter
        .merge_join_by(base_iter, |(t_date, _), (b_date, _)| t_date.cmp(b_date))
        .filter_map(|either| match either {
            EitherOrBoth::Both((date, t_val), (_, b_val)) => Some((*date, t_val - b_val)),
            _ => None,
        })
        .unzip();

    let mut clipped = 0;
    let values = if pair.volatility.clips_spread() {
        raw.into_iter()
            .map(|v| {
                let c = clip(v, clip_bound);
                if c != v {
                    clipped += 1;
                }
                c
            })
            .collect()
    } else {
        raw
    };

    PairSpreadSeries {
        pair: pair.clone(),
        window: target.window,
        dates,
        values,
        clipped,
    }
}

/// Clamp to the closed range `[-bound, bound]`.
pub fn clip(value: f64, bound: f64) -> f64 {
    value.clamp(-bound, bound)
}
