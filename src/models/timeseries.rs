use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::PairSpec;

// ============================================================================
// PriceSeries: daily closes for one instrument
// ============================================================================

/// Daily closing prices for one symbol. Dates are strictly ascending and
/// `dates.len() == closes.len()`. Never mutated once built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
}

impl PriceSeries {
    /// Build from unordered observations. Sorts by date; a repeated date keeps
    /// the observation that came last.
    pub fn from_observations(symbol: impl Into<String>, observations: Vec<(NaiveDate, f64)>) -> Self {
        let mut observations = observations;
        // Stable sort keeps arrival order within a date, so the last one wins below
        observations.sort_by_key(|(date, _)| *date);

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(observations.len());
        let mut closes: Vec<f64> = Vec::with_capacity(observations.len());
        for (date, close) in observations {
            if dates.last() == Some(&date) {
                if let Some(last) = closes.last_mut() {
                    *last = close;
                }
            } else {
                dates.push(date);
                closes.push(close);
            }
        }

        Self {
            symbol: symbol.into(),
            dates,
            closes,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// One close per date and dates strictly ascending. Always true for series
    /// built by `from_observations`; checked when reading them back from disk.
    pub fn is_well_formed(&self) -> bool {
        self.dates.len() == self.closes.len() && self.dates.windows(2).all(|w| w[0] < w[1])
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

// ============================================================================
// RollingReturnSeries: compounded return over a trailing window
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RollingReturnSeries {
    pub symbol: String,
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl RollingReturnSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// PairSpreadSeries: target rolling return minus base rolling return
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PairSpreadSeries {
    pub pair: PairSpec,
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    /// How many values were pulled back to the clip bound
    pub clipped: usize,
}

impl PairSpreadSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent (date, spread)
    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_from_observations_sorts_and_dedups() {
        let series = PriceSeries::from_observations(
            "QQQ",
            vec![(d(3), 103.0), (d(1), 101.0), (d(2), 102.0), (d(3), 103.5)],
        );
        assert_eq!(series.dates, vec![d(1), d(2), d(3)]);
        assert_eq!(series.closes, vec![101.0, 102.0, 103.5]);
        assert_eq!(series.first_date(), Some(d(1)));
        assert_eq!(series.last_date(), Some(d(3)));
        assert!(series.is_well_formed());
    }

    #[test]
    fn test_malformed_series_detected() {
        let short = PriceSeries {
            symbol: "QQQ".to_string(),
            dates: vec![d(1), d(2)],
            closes: vec![1.0],
        };
        assert!(!short.is_well_formed());

        let unordered = PriceSeries {
            symbol: "QQQ".to_string(),
            dates: vec![d(2), d(1)],
            closes: vec![1.0, 2.0],
        };
        assert!(!unordered.is_well_formed());
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::from_observations("NONE", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
    }
}
