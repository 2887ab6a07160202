//! Run configuration: which pairs to compare, over what window and dates.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PairSpec, VolatilityClass};
use crate::utils::TimeUtils;

/// Compile-time defaults for a run.
pub struct MonitorDefaults {
    /// Rolling window size in trading days (250 ≈ one year)
    pub window: usize,
    pub pairs: &'static [(&'static str, &'static str, VolatilityClass)],
    pub start_date: &'static str,
    /// Exclusive end of the fetch range
    pub end_date: &'static str,
    pub grid_rows: usize,
    /// Spreads of volatile pairs are clipped to [-bound, bound]
    pub volatile_clip: f64,
}

pub const DEFAULT_MONITOR: MonitorDefaults = MonitorDefaults {
    window: 250,
    pairs: &[
        ("TQQQ", "GLD", VolatilityClass::Standard), // leveraged growth vs safe-haven
        ("QQQ", "GLD", VolatilityClass::Standard),  // risk-on vs safe-haven
        ("QQQ", "SPY", VolatilityClass::Standard),  // growth vs value
        ("QQQ", "BRK-B", VolatilityClass::Standard), // growth vs quality value
        ("NVDA", "QQQ", VolatilityClass::Standard), // AI & innovation vs broad market
        ("SMH", "QQQ", VolatilityClass::Standard),  // semiconductors vs tech index
        ("USO", "TLT", VolatilityClass::Standard),  // real economy vs bonds
        ("TIP", "TLT", VolatilityClass::Standard),  // inflation expectation vs nominal rate
        ("DX-Y.NYB", "GLD", VolatilityClass::Standard), // dollar vs gold
    ],
    start_date: "2016-01-01",
    end_date: "2025-10-20",
    grid_rows: 3,
    volatile_clip: 2.0,
};

/// The runtime configuration every stage reads from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub window: usize,
    pub pairs: Vec<PairSpec>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_grid_rows")]
    pub grid_rows: usize,
    #[serde(default = "default_volatile_clip")]
    pub volatile_clip: f64,
}

fn default_grid_rows() -> usize {
    DEFAULT_MONITOR.grid_rows
}

fn default_volatile_clip() -> f64 {
    DEFAULT_MONITOR.volatile_clip
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let pairs = DEFAULT_MONITOR
            .pairs
            .iter()
            .map(|(target, base, volatility)| PairSpec {
                target: target.to_string(),
                base: base.to_string(),
                volatility: *volatility,
            })
            .collect();

        Self {
            window: DEFAULT_MONITOR.window,
            pairs,
            // Constants above are known-good literals
            start_date: NaiveDate::parse_from_str(
                DEFAULT_MONITOR.start_date,
                TimeUtils::STANDARD_TIME_FORMAT,
            )
            .unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::parse_from_str(
                DEFAULT_MONITOR.end_date,
                TimeUtils::STANDARD_TIME_FORMAT,
            )
            .unwrap_or(NaiveDate::MAX),
            grid_rows: DEFAULT_MONITOR.grid_rows,
            volatile_clip: DEFAULT_MONITOR.volatile_clip,
        }
    }
}

impl MonitorConfig {
    /// Load a JSON config file. Missing optional fields take their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: MonitorConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Reject configurations no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if self.window < 2 {
            bail!("Rolling window must be at least 2 (got {})", self.window);
        }
        if self.pairs.is_empty() {
            bail!("No pairs configured");
        }
        if self.start_date >= self.end_date {
            bail!(
                "Start date {} must be before end date {}",
                self.start_date,
                self.end_date
            );
        }
        if self.grid_rows == 0 {
            bail!("Grid must have at least one row");
        }
        if !(self.volatile_clip.is_finite() && self.volatile_clip > 0.0) {
            bail!(
                "Volatile clip bound must be a positive number (got {})",
                self.volatile_clip
            );
        }
        for pair in &self.pairs {
            if pair.target.trim().is_empty() || pair.base.trim().is_empty() {
                bail!("Pair has an empty symbol: {:?}", pair);
            }
        }
        Ok(())
    }
}
