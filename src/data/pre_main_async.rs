// Async code to run in main before any rendering starts

use std::path::Path;

use anyhow::{Context, Result};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::timeseries::serde_version::{SerdeVersion, check_local_data_validity};
use crate::data::timeseries::yahoo_version::YahooVersion;
use crate::data::timeseries::{CreatePriceTable, FetchRequest, get_price_table_async};
use crate::models::PriceTable;

/// Load every requested symbol's closes, from the local cache or the provider.
pub async fn fetch_price_table(
    request: &FetchRequest,
    prefer_api: bool,
    cache_acceptable_age_secs: i64,
    cache_path: &Path,
) -> Result<(PriceTable, &'static str)> {
    // If `check_local_data_validity` fails the only choice is the API.
    // Otherwise both are available and `prefer_api` picks the order.
    let providers: Vec<Box<dyn CreatePriceTable + Send + Sync>> = match (
        prefer_api,
        check_local_data_validity(
            cache_path,
            cache_acceptable_age_secs,
            PERSISTENCE.prices.version,
            request,
        ),
    ) {
        (false, Ok(_)) => vec![
            Box::new(SerdeVersion {
                path: cache_path.to_path_buf(),
            }),
            Box::new(YahooVersion),
        ], // local first
        (true, Ok(_)) => vec![
            Box::new(YahooVersion),
            Box::new(SerdeVersion {
                path: cache_path.to_path_buf(),
            }),
        ], // API first
        (_, Err(e)) => {
            log::warn!("⚠️  Local cache not usable: {:#}", e);
            log::warn!("⚠️  Falling back to the price API...");
            vec![Box::new(YahooVersion)] // API only
        }
    };

    let (table, signature) = get_price_table_async(&providers, request)
        .await
        .context("Failed to retrieve price data")?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Successfully retrieved price data using: {}.", signature);
    }
    log::info!(
        "Loaded {} of {} symbols ({}) from {}",
        table.len(),
        request.symbols.len(),
        table.name,
        signature
    );
    let missing = table.missing(&request.symbols);
    if !missing.is_empty() {
        log::warn!("No prices for {:?}; pairs using them will be skipped", missing);
    }
    Ok((table, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::timeseries::cache_file::CacheFile;
    use crate::models::PriceSeries;
    use chrono::NaiveDate;

    #[test]
    fn test_valid_cache_is_used_first() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let request = FetchRequest {
            symbols: ["GLD", "QQQ"].iter().map(|s| s.to_string()).collect(),
            start_date: start,
            end_date: end,
        };
        let table = PriceTable::new(
            "cached",
            start,
            end,
            vec![
                PriceSeries::from_observations("GLD", vec![(start, 150.0)]),
                PriceSeries::from_observations("QQQ", vec![(start, 210.0)]),
            ],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.bin");
        CacheFile::new(table.clone(), PERSISTENCE.prices.version)
            .save_to_path(&path)
            .unwrap();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let (loaded, signature) = rt
            .block_on(fetch_price_table(&request, false, 3600, &path))
            .unwrap();

        assert_eq!(signature, "Local Cache");
        assert_eq!(loaded.name, "cached");
        assert_eq!(loaded, table);
    }
}
