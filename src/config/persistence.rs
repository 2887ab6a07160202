//! File persistence and serialization configuration

pub struct PriceCacheConfig {
    /// Directory path for storing downloaded price data
    pub directory: &'static str,
    /// Base filename for price cache files (without extension)
    pub filename_without_ext: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
    /// Maximum age of a cache file before the API is preferred (seconds)
    pub acceptable_age_secs: i64,
}

pub struct PersistenceConfig {
    pub prices: PriceCacheConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    prices: PriceCacheConfig {
        directory: "price_data",
        filename_without_ext: "prices",
        version: 1.0,
        // 24 hours (60 * 60 * 24)
        acceptable_age_secs: 86_400,
    },
};

/// Example: "prices_1d_v1.bin"
pub fn price_cache_filename(interval: &str) -> String {
    format!(
        "{}_{}_v{}.bin",
        PERSISTENCE.prices.filename_without_ext, interval, PERSISTENCE.prices.version
    )
}

/// Same as `price_cache_filename` but with a `demo_` prefix
pub fn demo_price_cache_filename(interval: &str) -> String {
    format!("demo_{}", price_cache_filename(interval))
}
