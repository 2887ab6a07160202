use crate::analysis::PairError;
use crate::models::{PriceSeries, RollingReturnSeries};

/// Per-period log returns `ln(close[t] / close[t-1])` for t >= 1.
/// The first close has no predecessor, so the output is one shorter.
pub fn log_returns(prices: &PriceSeries) -> Result<Vec<f64>, PairError> {
    if let Some(idx) = prices
        .closes
        .iter()
        .position(|close| !(close.is_finite() && *close > 0.0))
    {
        return Err(PairError::NonPositivePrice {
            symbol: prices.symbol.clone(),
            date: prices.dates[idx],
            close: prices.closes[idx],
        });
    }

    Ok(prices
        .closes
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect())
}

/// Compounded return over the trailing `window` periods, at every date where
/// all `window` log returns exist: `exp(sum(logret[t-W+1..=t])) - 1`.
///
/// Log return `i` belongs to date `i + 1`, so the first defined value lands on
/// date index `window` and the result holds `len - window` entries.
pub fn rolling_returns(prices: &PriceSeries, window: usize) -> Result<RollingReturnSeries, PairError> {
    if window < 2 {
        return Err(PairError::InvalidWindow(window));
    }

    let log_rets = log_returns(prices)?;

    let values: Vec<f64> = log_rets
        .windows(window)
        .map(|slice| slice.iter().sum::<f64>().exp() - 1.0)
        .collect();

    let dates = if values.is_empty() {
        Vec::new()
    } else {
        prices.dates[window..].to_vec()
    };
    debug_assert_eq!(dates.len(), values.len());

    Ok(RollingReturnSeries {
        symbol: prices.symbol.clone(),
        window,
        dates,
        values,
    })
}

/// Like `rolling_returns` but an empty result is an error for the caller's pair.
pub fn rolling_returns_checked(
    prices: &PriceSeries,
    window: usize,
) -> Result<RollingReturnSeries, PairError> {
    let series = rolling_returns(prices, window)?;
    if series.is_empty() {
        return Err(PairError::InsufficientHistory {
            symbol: prices.symbol.clone(),
            observations: prices.len(),
            window,
        });
    }
    Ok(series)
}
