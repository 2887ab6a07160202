use chrono::NaiveDate;
use std::fmt;

/// Why a single pair could not be charted. Local to that pair; the run goes on.
#[derive(Debug, Clone, PartialEq)]
pub enum PairError {
    /// The provider returned nothing for this symbol (or the download failed)
    MissingSymbol(String),
    /// Fewer closes than the window needs
    InsufficientHistory {
        symbol: String,
        observations: usize,
        window: usize,
    },
    /// Both rolling series exist but share no dates
    EmptySpread,
    /// A close that is zero, negative or not a number
    NonPositivePrice {
        symbol: String,
        date: NaiveDate,
        close: f64,
    },
    InvalidWindow(usize),
}

impl PairError {
    /// Short text for the chart placeholder
    pub fn placeholder_text(&self) -> String {
        match self {
            PairError::MissingSymbol(symbol) => format!("no data for {}", symbol),
            PairError::InsufficientHistory { .. } | PairError::EmptySpread => {
                crate::config::PLOT_CONFIG.insufficient_data_text.to_string()
            }
            PairError::NonPositivePrice { symbol, .. } => format!("invalid price data for {}", symbol),
            PairError::InvalidWindow(window) => format!("invalid window {}", window),
        }
    }
}

impl fmt::Display for PairError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PairError::MissingSymbol(symbol) => write!(f, "No price data available for {}", symbol),
            PairError::InsufficientHistory {
                symbol,
                observations,
                window,
            } => write!(
                f,
                "{} has {} closes, needs more than {} for a rolling return",
                symbol, observations, window
            ),
            PairError::EmptySpread => write!(f, "Rolling returns share no dates"),
            PairError::NonPositivePrice {
                symbol,
                date,
                close,
            } => write!(f, "{} has non-positive close {} on {}", symbol, close, date),
            PairError::InvalidWindow(window) => {
                write!(f, "Rolling window must be at least 2 (got {})", window)
            }
        }
    }
}

impl std::error::Error for PairError {}
