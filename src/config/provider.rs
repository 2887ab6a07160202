//! Daily price provider (Yahoo Finance chart endpoint) configuration.

/// Runtime settings for the HTTP client
pub struct ProviderApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for ProviderApiConfig {
    fn default() -> Self {
        Self {
            base_url: PROVIDER.base_url.to_string(),
            timeout_ms: PROVIDER.client.timeout_ms,
            retries: PROVIDER.client.retries,
            backoff_ms: PROVIDER.client.backoff_ms,
        }
    }
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// The Master Configuration Struct
pub struct ProviderConfig {
    pub base_url: &'static str,
    /// Candle interval requested from the chart endpoint
    pub interval: &'static str,
    /// Some endpoints refuse requests without a browser-like agent
    pub user_agent: &'static str,
    /// Maximum number of simultaneous symbol downloads per batch
    pub simultaneous_calls_ceiling: usize,
    pub client: ClientDefaults,
}

pub const PROVIDER: ProviderConfig = ProviderConfig {
    base_url: "https://query1.finance.yahoo.com",
    interval: "1d",
    user_agent: "Mozilla/5.0 (X11; Linux x86_64) spread-monitor/0.1",
    simultaneous_calls_ceiling: 8,
    client: ClientDefaults {
        timeout_ms: 15_000,
        retries: 3,
        backoff_ms: 2_000,
    },
};
