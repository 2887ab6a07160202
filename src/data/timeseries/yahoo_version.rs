pub mod chart_response;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use reqwest::{StatusCode, Url};
use tokio::{task::JoinHandle, time::Instant, time::sleep};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{PROVIDER, ProviderApiConfig};
use crate::data::timeseries::{CreatePriceTable, FetchRequest};
use crate::models::{PriceSeries, PriceTable};
use crate::utils::time_utils::date_to_epoch_sec;
pub use chart_response::{ChartResponseError, parse_chart_response};

/// HTTP client for the daily chart endpoint.
pub struct YahooClient {
    client: reqwest::Client,
    config: ProviderApiConfig,
}

impl YahooClient {
    pub fn new(config: ProviderApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(PROVIDER.user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: ProviderApiConfig) -> Self {
        Self { client, config }
    }

    /// `{base}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d&events=history`
    /// `period2` is exclusive, so `end` is the first day *not* fetched.
    pub fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .with_context(|| format!("Invalid provider base url: {}", self.config.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Provider base url cannot take a path"))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("period1", &date_to_epoch_sec(start).to_string())
            .append_pair("period2", &date_to_epoch_sec(end).to_string())
            .append_pair("interval", PROVIDER.interval)
            .append_pair("events", "history");
        Ok(url)
    }

    /// Download daily closes for one symbol, retrying throttling and server errors.
    pub async fn fetch_daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let url = self.chart_url(symbol, start, end)?;

        let mut attempt = 0;
        let body = loop {
            attempt += 1;
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    let throttled = status == StatusCode::TOO_MANY_REQUESTS;
                    if status.is_success() || (status.is_client_error() && !throttled) {
                        // 4xx bodies still carry the provider's error object
                        break response
                            .text()
                            .await
                            .with_context(|| format!("{}: failed reading response body", symbol))?;
                    }
                    if attempt > self.config.retries {
                        bail!("{}: giving up after {} attempts (HTTP {})", symbol, attempt, status);
                    }
                    log::warn!("{}: HTTP {} (attempt {}), backing off", symbol, status, attempt);
                }
                Err(e) => {
                    if attempt > self.config.retries {
                        return Err(e).with_context(|| {
                            format!("{}: request failed after {} attempts", symbol, attempt)
                        });
                    }
                    log::warn!("{}: request error (attempt {}): {}", symbol, attempt, e);
                }
            }
            sleep(Duration::from_millis(self.config.backoff_ms * attempt as u64)).await;
        };

        let series = parse_chart_response(symbol, &body).with_context(|| symbol.to_string())?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_details {
            log::info!(
                "{}: {} closes ({:?} .. {:?}) from {}",
                symbol,
                series.len(),
                series.first_date(),
                series.last_date(),
                url
            );
        }

        Ok(series)
    }
}

pub struct YahooVersion;

#[async_trait]
impl CreatePriceTable for YahooVersion {
    fn signature(&self) -> &'static str {
        "Yahoo API"
    }

    async fn create_price_table(&self, request: &FetchRequest) -> Result<PriceTable> {
        let start_time = Instant::now();
        let client = Arc::new(YahooClient::new(ProviderApiConfig::default())?);

        let fetched = price_data_load(client, request).await?;

        let elapsed_time = start_time.elapsed();
        log::info!(
            "Fetched {} of {} symbols in {:?} ({} unavailable)",
            fetched.series.len(),
            request.symbols.len(),
            elapsed_time,
            fetched.unavailable.len()
        );

        Ok(PriceTable::new(
            "Yahoo daily closes",
            request.start_date,
            request.end_date,
            fetched.series,
        )
        .with_unavailable(fetched.unavailable))
    }
}

/// Outcome of a multi-symbol download.
/// Symbols that failed for transient reasons (network, throttling, server
/// errors) appear in neither field.
#[derive(Debug, Default)]
pub struct FetchedPrices {
    pub series: Vec<PriceSeries>,
    /// The provider answered, but with no data (unknown ticker, empty range)
    pub unavailable: BTreeSet<String>,
}

/// True when the provider itself said the symbol has nothing to offer
fn is_definitive_absence(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<ChartResponseError>(),
        Some(ChartResponseError::Provider { .. })
    )
}

/// Fetch every requested symbol, a batch of concurrent downloads at a time.
/// Failed or empty symbols are logged and left out; only a total wipe-out is an error.
pub async fn price_data_load(
    client: Arc<YahooClient>,
    request: &FetchRequest,
) -> Result<FetchedPrices> {
    let symbols: Vec<String> = request.symbols.iter().cloned().collect();
    let mut fetched = FetchedPrices {
        series: Vec::with_capacity(symbols.len()),
        unavailable: BTreeSet::new(),
    };

    for batch in symbols.chunks(PROVIDER.simultaneous_calls_ceiling) {
        log::info!("--- Fetching batch of {} symbols ---", batch.len());

        let handles: Vec<JoinHandle<(String, Result<PriceSeries>)>> = batch
            .iter()
            .map(|symbol| {
                let client = Arc::clone(&client);
                let symbol = symbol.clone();
                let (start, end) = (request.start_date, request.end_date);
                tokio::spawn(async move {
                    let result = client.fetch_daily_closes(&symbol, start, end).await;
                    (symbol, result)
                })
            })
            .collect();

        for joined in join_all(handles).await {
            let (symbol, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    log::error!("Fetch task panicked: {:?}", e);
                    continue;
                }
            };
            match result {
                Ok(series) if series.is_empty() => {
                    log::warn!("{}: provider returned no data in range", symbol);
                    fetched.unavailable.insert(symbol);
                }
                Ok(series) => {
                    log::info!("{}: {} daily closes", symbol, series.len());
                    fetched.series.push(series);
                }
                Err(e) if is_definitive_absence(&e) => {
                    log::warn!("{}: not available from provider: {:#}", symbol, e);
                    fetched.unavailable.insert(symbol);
                }
                Err(e) => log::warn!("{}: fetch failed: {:#}", symbol, e),
            }
        }
    }

    if fetched.series.is_empty() {
        bail!("No symbol could be fetched");
    }
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const QQQ_CHART: &str = r#"{"chart":{"result":[{"meta":{"gmtoffset":-14400},
        "timestamp":[1577975400,1578061800],
        "indicators":{"quote":[{"close":[214.4,212.6]}]}}],"error":null}}"#;

    const NOT_FOUND: &str = r#"{"chart":{"result":null,
        "error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

    fn request(symbols: &[&str]) -> FetchRequest {
        FetchRequest {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        }
    }

    fn quick_config(base_url: String) -> ProviderApiConfig {
        ProviderApiConfig {
            base_url,
            timeout_ms: 2_000,
            retries: 0,
            backoff_ms: 0,
        }
    }

    fn local_client(base_url: String) -> Arc<YahooClient> {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Arc::new(YahooClient::with_client(client, quick_config(base_url)))
    }

    /// Minimal chart server: QQQ has data, ZZZZ is unknown, anything else is a 500
    async fn serve_charts(listener: TcpListener) {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head);
                let (status, body) = if head.contains("/chart/QQQ?") {
                    ("200 OK", QQQ_CHART)
                } else if head.contains("/chart/ZZZZ?") {
                    ("404 Not Found", NOT_FOUND)
                } else {
                    ("500 Internal Server Error", "")
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    }

    #[test]
    fn test_chart_url() {
        let client = YahooClient::new(ProviderApiConfig::default()).unwrap();
        let url = client
            .chart_url(
                "DX-Y.NYB",
                NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/DX-Y.NYB?period1=1451606400&period2=1760918400&interval=1d&events=history"
        );
    }

    #[test]
    fn test_partial_fetch_classifies_symbols() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let fetched = rt
            .block_on(async {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                let base_url = format!("http://{}", listener.local_addr().unwrap());
                tokio::spawn(serve_charts(listener));
                price_data_load(local_client(base_url), &request(&["DOWN", "QQQ", "ZZZZ"])).await
            })
            .unwrap();

        let loaded: Vec<&str> = fetched.series.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(loaded, vec!["QQQ"]);
        assert_eq!(fetched.series[0].len(), 2);
        // A 500 is transient: DOWN is neither loaded nor marked unavailable
        assert_eq!(
            fetched.unavailable,
            ["ZZZZ".to_string()].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_all_symbols_failing_is_an_error() {
        // Nothing listens on the discard port
        let client = local_client("http://127.0.0.1:9".to_string());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt
            .block_on(price_data_load(client, &request(&["GLD", "QQQ"])))
            .unwrap_err();
        assert!(err.to_string().contains("No symbol could be fetched"));
    }
}
