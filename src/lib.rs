#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod render;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

// Re-export commonly used types
pub use analysis::{PairOutcome, analyze_all_pairs, log_run_summary};
pub use config::MonitorConfig;
pub use data::{FetchRequest, fetch_price_table};
pub use domain::{PairSpec, VolatilityClass, resolve_symbols};
pub use models::PriceTable;
pub use render::GridLayout;
pub use ui::SpreadMonitorApp;

use crate::config::PERSISTENCE;
use crate::data::timeseries::cache_file::CacheFile;
use crate::utils::time_utils::parse_date;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file with window, pairs and date range (overrides the built-in defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rolling window length in trading days
    #[arg(long)]
    pub window: Option<usize>,

    /// First date to fetch (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Date to fetch up to (YYYY-MM-DD, exclusive)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Write the figure to this SVG file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Do not open the figure window
    #[arg(long, default_value_t = false)]
    pub no_window: bool,

    /// Use API as primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Oldest acceptable price cache, in seconds
    #[arg(long, default_value_t = PERSISTENCE.prices.acceptable_age_secs)]
    pub cache_max_age_secs: i64,

    /// Price cache location
    #[arg(long)]
    pub cache_file: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the JSON config file, then individual flags.
    pub fn build_monitor_config(&self) -> Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::load_from_path(path)?,
            None => MonitorConfig::default(),
        };
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(start) = self.start {
            config.start_date = start;
        }
        if let Some(end) = self.end {
            config.end_date = end;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(CacheFile::default_cache_path)
    }
}

/// Main application entry point - creates the figure window
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    outcomes: &[PairOutcome],
    layout: GridLayout,
    window: usize,
    data_source: &'static str,
) -> Box<dyn eframe::App> {
    let app = SpreadMonitorApp::new(cc, outcomes, layout, window, data_source);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["spread-monitor"]);
        let config = cli.build_monitor_config().unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert!(!cli.no_window);
        assert_eq!(cli.cache_max_age_secs, PERSISTENCE.prices.acceptable_age_secs);
        assert_eq!(cli.cache_path(), CacheFile::default_cache_path());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "spread-monitor",
            "--window",
            "120",
            "--start",
            "2020-01-01",
            "--end",
            "2021-06-30",
            "--output",
            "out/grid.svg",
            "--no-window",
        ]);
        let config = cli.build_monitor_config().unwrap();
        assert_eq!(config.window, 120);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2021, 6, 30).unwrap());
        assert_eq!(config.pairs, MonitorConfig::default().pairs);
        assert_eq!(cli.output, Some(PathBuf::from("out/grid.svg")));
        assert!(cli.no_window);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let cli = Cli::parse_from(["spread-monitor", "--window", "1"]);
        assert!(cli.build_monitor_config().is_err());

        let cli = Cli::parse_from(["spread-monitor", "--start", "2026-01-01", "--end", "2025-01-01"]);
        assert!(cli.build_monitor_config().is_err());

        assert!(Cli::try_parse_from(["spread-monitor", "--start", "01/01/2020"]).is_err());
    }
}
