use rayon::prelude::*;

use crate::analysis::PairError;
use crate::analysis::pair_spread::pair_spread;
use crate::analysis::percentile::latest_percentile_rank;
use crate::analysis::rolling_return::rolling_returns_checked;
use crate::config::MonitorConfig;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::PairSpec;
use crate::models::{PairSpreadSeries, PriceTable};

/// Everything the renderer needs for one charted pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub spread: PairSpreadSeries,
    /// Percentile rank of the latest spread value, in [0, 100]
    pub percentile: f64,
}

impl PairReport {
    pub fn latest_spread(&self) -> f64 {
        self.spread.values.last().copied().unwrap_or(f64::NAN)
    }

    /// e.g. `QQQ − GLD (250-Day) | pct 87.3%`
    pub fn title(&self) -> String {
        format!(
            "{} ({}-Day) | pct {:.1}%",
            self.spread.pair.label(),
            self.spread.window,
            self.percentile
        )
    }
}

/// One grid slot. `slot` is the pair's position in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    pub slot: usize,
    pub pair: PairSpec,
    pub result: Result<PairReport, PairError>,
}

impl PairOutcome {
    pub fn is_ready(&self) -> bool {
        self.result.is_ok()
    }
}

/// Rolling returns, spread and percentile for a single pair.
pub fn analyze_pair(
    pair: &PairSpec,
    prices: &PriceTable,
    window: usize,
    clip_bound: f64,
) -> Result<PairReport, PairError> {
    let target_prices = prices
        .get(&pair.target)
        .ok_or_else(|| PairError::MissingSymbol(pair.target.clone()))?;
    let base_prices = prices
        .get(&pair.base)
        .ok_or_else(|| PairError::MissingSymbol(pair.base.clone()))?;

    let target_rolling = rolling_returns_checked(target_prices, window)?;
    let base_rolling = rolling_returns_checked(base_prices, window)?;

    let spread = pair_spread(pair, &target_rolling, &base_rolling, clip_bound);
    let percentile = latest_percentile_rank(&spread.values).ok_or(PairError::EmptySpread)?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pair_details {
        log::info!(
            "{}: rolling {} / {}, spread {} ({} clipped)",
            pair,
            target_rolling.len(),
            base_rolling.len(),
            spread.len(),
            spread.clipped
        );
    }

    Ok(PairReport { spread, percentile })
}

/// Analyze every configured pair. Pairs are independent and run in parallel;
/// the output keeps configuration order, one outcome per pair.
pub fn analyze_all_pairs(config: &MonitorConfig, prices: &PriceTable) -> Vec<PairOutcome> {
    config
        .pairs
        .par_iter()
        .enumerate()
        .map(|(slot, pair)| PairOutcome {
            slot,
            pair: pair.clone(),
            result: analyze_pair(pair, prices, config.window, config.volatile_clip),
        })
        .collect()
}

/// One log line per pair, skipped pairs at warn level.
pub fn log_run_summary(outcomes: &[PairOutcome]) {
    let ready = outcomes.iter().filter(|o| o.is_ready()).count();
    log::info!("{} of {} pairs charted", ready, outcomes.len());

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                if let Some((date, spread)) = report.spread.latest() {
                    log::info!(
                        "[{}] {}: {} points, latest {} spread {:+.4}, pct {:.1}%",
                        outcome.slot,
                        outcome.pair.label(),
                        report.spread.len(),
                        date,
                        spread,
                        report.percentile
                    );
                }
            }
            Err(e) => log::warn!("[{}] {} skipped: {}", outcome.slot, outcome.pair.label(), e),
        }
    }
}
