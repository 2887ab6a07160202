#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::utils::time_utils::how_many_seconds_ago;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::data::timeseries::{CreatePriceTable, FetchRequest, cache_file::CacheFile};
use crate::models::PriceTable;

/// Signature of the loader whose output is worth caching
pub const API_SIGNATURE: &str = "Yahoo API";

/// A cache is usable when it has the right format version, was made for the
/// same symbols and date range, and is not older than `recency_required_secs`.
pub fn check_local_data_validity(
    path: &Path,
    recency_required_secs: i64,
    version_required: f64,
    request: &FetchRequest,
) -> Result<()> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Checking validity of local cache at {:?}...", path);
    }
    let cache = CacheFile::load_from_path(path)?;
    validate_cache(&cache, recency_required_secs, version_required, request)
}

pub fn validate_cache(
    cache: &CacheFile,
    recency_required_secs: i64,
    version_required: f64,
    request: &FetchRequest,
) -> Result<()> {
    // Check version
    if cache.version != version_required {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            version_required
        );
    }

    // Check date range
    if !cache.data.covers_range(request.start_date, request.end_date) {
        bail!(
            "Cache range mismatch: file has {:?}..{:?}, expected {}..{}",
            cache.data.start_date,
            cache.data.end_date,
            request.start_date,
            request.end_date
        );
    }

    // Check symbols
    if cache.requested != request.symbols {
        let missing: Vec<&String> = request.symbols.difference(&cache.requested).collect();
        bail!("Cache symbol mismatch: missing {:?}", missing);
    }

    // Check recency
    let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
    if seconds_ago > recency_required_secs {
        bail!(
            "Cache too old: created {} seconds ago (limit: {} seconds)",
            seconds_ago,
            recency_required_secs
        );
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "✅ Cache valid: v{}, {}s old (limit {}s), {} symbols",
            cache.version,
            seconds_ago,
            recency_required_secs,
            cache.data.len()
        );
    }

    Ok(())
}

/// Write downloaded prices to the binary cache file.
/// Only API downloads are written back; anything loaded from disk is skipped.
/// The cache only vouches for symbols the table has a definite answer for, so
/// a symbol lost to a network error makes the cache invalid for that request.
pub fn write_price_table_locally(
    signature: &'static str,
    table: &PriceTable,
    path: &Path,
) -> Result<()> {
    if signature != API_SIGNATURE {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!("Skipping cache write (data not from {})", API_SIGNATURE);
        }
        return Ok(());
    }

    let cache = CacheFile::new(table.clone(), crate::config::PERSISTENCE.prices.version);
    cache.save_to_path(path)?;
    log::info!("Price cache written to {}", path.display());
    Ok(())
}

/// Async wrapper for write_price_table_locally
pub async fn write_price_table_async(
    signature: &'static str,
    table: PriceTable,
    path: PathBuf,
) -> Result<()> {
    tokio::task::spawn_blocking(move || write_price_table_locally(signature, &table, &path))
        .await
        .context("Cache write task panicked")?
}

pub struct SerdeVersion {
    pub path: PathBuf,
}

#[async_trait]
impl CreatePriceTable for SerdeVersion {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn create_price_table(&self, request: &FetchRequest) -> Result<PriceTable> {
        let full_path = self.path.clone();

        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_serde.then(|| {
            log::info!("Reading cache from: {:?}...", full_path);
            std::time::Instant::now()
        });

        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&full_path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load cache file")?;

        if !cache.data.covers_range(request.start_date, request.end_date) {
            bail!("Cache was built for a different date range");
        }

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "✅ Cache loaded: {} symbols in {:.2}s",
                cache.data.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(cache.data)
    }
}
