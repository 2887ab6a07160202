use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::{PERSISTENCE, PROVIDER, price_cache_filename};
use crate::models::PriceTable;
use crate::utils::time_utils::utc_now_ms;

/// Serialized cache wrapper for downloaded prices.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub interval: String,
    /// Symbols with a definite answer: fetched, or reported as having no data.
    /// Symbols whose download failed are left out so the next run retries them.
    pub requested: BTreeSet<String>,
    pub data: PriceTable,
}

impl CacheFile {
    pub fn new(data: PriceTable, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: utc_now_ms(),
            interval: PROVIDER.interval.to_string(),
            requested: data.settled_symbols(),
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: CacheFile = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        if let Some(bad) = cache.data.iter().find(|series| !series.is_well_formed()) {
            bail!(
                "Corrupt cache {:?}: series {} has {} dates for {} closes or unordered dates",
                path,
                bad.symbol,
                bad.dates.len(),
                bad.closes.len()
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn default_cache_path() -> PathBuf {
        PathBuf::from(PERSISTENCE.prices.directory).join(price_cache_filename(PROVIDER.interval))
    }
}
