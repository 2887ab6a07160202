use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::path::PathBuf;

use spread_monitor::config::{PERSISTENCE, PROVIDER, demo_price_cache_filename};
use spread_monitor::data::timeseries::cache_file::CacheFile;
use spread_monitor::models::{PriceSeries, PriceTable};
use spread_monitor::{MonitorConfig, resolve_symbols};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    build_demo_cache()
}

/// Writes a cache of synthetic daily closes for the default pair set, so the
/// monitor can be tried without network access:
/// `spread-monitor --cache-file price_data/demo_prices_1d_v1.bin --cache-max-age-secs 31536000`
/// The cache carries its creation time, so without a larger
/// `--cache-max-age-secs` it counts as stale after the default day.
fn build_demo_cache() -> Result<()> {
    let config = MonitorConfig::default();
    let symbols: BTreeSet<String> = resolve_symbols(&config.pairs);
    let days = business_days(config.start_date, config.end_date);

    let series: Vec<PriceSeries> = symbols
        .iter()
        .map(|symbol| synthetic_series(symbol, &days))
        .collect();
    log::info!(
        "Generated {} symbols x {} business days ({} .. {})",
        series.len(),
        days.len(),
        config.start_date,
        config.end_date
    );

    let table = PriceTable::new(
        "Synthetic demo closes",
        config.start_date,
        config.end_date,
        series,
    );
    let output_cache = CacheFile::new(table, PERSISTENCE.prices.version);

    let output_path = PathBuf::from(PERSISTENCE.prices.directory)
        .join(demo_price_cache_filename(PROVIDER.interval));
    output_cache.save_to_path(&output_path)?;

    log::info!(
        "✅ Demo cache written to {:?} with {} symbols.",
        output_path,
        output_cache.data.len()
    );
    log::info!(
        "Run: spread-monitor --cache-file {} --cache-max-age-secs 31536000",
        output_path.display()
    );
    Ok(())
}

/// Weekdays in `[start, end)`
fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day < end {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Drift plus two slow cycles, shaped per symbol so every pair differs.
fn synthetic_series(symbol: &str, days: &[NaiveDate]) -> PriceSeries {
    let seed = symbol.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    let phase = (seed % 628) as f64 / 100.0;
    let drift = ((seed % 13) as f64 - 4.0) * 0.00008;
    let start_price = 20.0 + (seed % 400) as f64;

    let observations = days
        .iter()
        .enumerate()
        .map(|(t, date)| {
            let t = t as f64;
            let cycle = 0.15 * (t / 180.0 + phase).sin() + 0.05 * (t / 37.0 + 2.0 * phase).sin();
            (*date, start_price * (drift * t + cycle).exp())
        })
        .collect();
    PriceSeries::from_observations(symbol, observations)
}
