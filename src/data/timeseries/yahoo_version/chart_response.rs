use std::fmt;

use serde::Deserialize;

use crate::models::PriceSeries;
use crate::utils::time_utils::epoch_sec_to_exchange_date;

// Shape of the chart endpoint's JSON. Only the fields we read are modelled.

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize, Debug)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
    #[serde(default)]
    adjclose: Vec<AdjCloseBlock>,
}

#[derive(Deserialize, Debug)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug)]
struct AdjCloseBlock {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// Custom error type for chart responses for better error messages.
#[derive(Debug, PartialEq)]
pub enum ChartResponseError {
    /// The provider answered with an error object (e.g. unknown symbol)
    Provider { code: String, description: String },
    NoResult,
    LengthMismatch { timestamps: usize, closes: usize },
    InvalidJson(String),
}

impl fmt::Display for ChartResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChartResponseError::Provider { code, description } => {
                write!(f, "Provider error {}: {}", code, description)
            }
            ChartResponseError::NoResult => write!(f, "Response contained no result"),
            ChartResponseError::LengthMismatch { timestamps, closes } => write!(
                f,
                "Response has {} timestamps but {} closes",
                timestamps, closes
            ),
            ChartResponseError::InvalidJson(msg) => write!(f, "Invalid response JSON: {}", msg),
        }
    }
}

impl std::error::Error for ChartResponseError {}

/// Turn a chart response body into a `PriceSeries`.
///
/// Adjusted closes are used when the response carries them; otherwise raw
/// closes. Null observations are dropped. Dates are the exchange's local date.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<PriceSeries, ChartResponseError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| ChartResponseError::InvalidJson(e.to_string()))?;

    if let Some(err) = envelope.chart.error {
        return Err(ChartResponseError::Provider {
            code: err.code,
            description: err.description,
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or(ChartResponseError::NoResult)?;

    let ChartResult {
        meta,
        timestamp,
        indicators,
    } = result;

    let adjusted = indicators
        .adjclose
        .into_iter()
        .next()
        .map(|block| block.adjclose)
        .filter(|closes| closes.len() == timestamp.len());
    let closes = match adjusted {
        Some(closes) => closes,
        None => indicators
            .quote
            .into_iter()
            .next()
            .map(|block| block.close)
            .unwrap_or_default(),
    };

    if closes.len() != timestamp.len() {
        return Err(ChartResponseError::LengthMismatch {
            timestamps: timestamp.len(),
            closes: closes.len(),
        });
    }

    let observations = timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close?;
            let date = epoch_sec_to_exchange_date(*ts, meta.gmtoffset)?;
            Some((date, close))
        })
        .collect();

    Ok(PriceSeries::from_observations(symbol, observations))
}
