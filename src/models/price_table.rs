use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Read-only lookup of every fetched symbol. Built once before any pair is
/// processed and shared behind an `Arc` afterwards.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PriceTable {
    pub name: String, // Metadata e.g. "Yahoo daily closes"
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    series: BTreeMap<String, PriceSeries>,
    /// Symbols the provider answered for with no data (unknown ticker, empty range)
    unavailable: BTreeSet<String>,
}

impl PriceTable {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        series: impl IntoIterator<Item = PriceSeries>,
    ) -> Self {
        Self {
            name: name.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
            series: series
                .into_iter()
                .map(|s| (s.symbol.clone(), s))
                .collect(),
            unavailable: BTreeSet::new(),
        }
    }

    pub fn with_unavailable(mut self, unavailable: BTreeSet<String>) -> Self {
        self.unavailable = unavailable;
        self
    }

    /// Symbols with a definite answer: fetched, or known to have no data.
    /// A symbol whose download merely failed is in neither set.
    pub fn settled_symbols(&self) -> BTreeSet<String> {
        self.series
            .keys()
            .chain(self.unavailable.iter())
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSeries> {
        self.series.values()
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Symbols in `wanted` this table has no series for
    pub fn missing<'a>(&self, wanted: &'a BTreeSet<String>) -> Vec<&'a str> {
        wanted
            .iter()
            .filter(|s| !self.contains(s))
            .map(String::as_str)
            .collect()
    }

    /// Whether this table was fetched for exactly this date range
    pub fn covers_range(&self, start_date: NaiveDate, end_date: NaiveDate) -> bool {
        self.start_date == Some(start_date) && self.end_date == Some(end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_missing() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let table = PriceTable::new(
            "test",
            start,
            end,
            vec![
                PriceSeries::from_observations("QQQ", vec![(start, 1.0)]),
                PriceSeries::from_observations("GLD", vec![(start, 2.0)]),
            ],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("GLD").map(|s| s.closes[0]), Some(2.0));
        assert!(table.get("SPY").is_none());

        let wanted: BTreeSet<String> = ["GLD", "QQQ", "SPY"].iter().map(|s| s.to_string()).collect();
        assert_eq!(table.missing(&wanted), vec!["SPY"]);
        assert!(table.covers_range(start, end));
        assert!(!table.covers_range(start, start));
    }

    #[test]
    fn test_settled_symbols_include_unavailable() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let table = PriceTable::new(
            "test",
            start,
            end,
            vec![PriceSeries::from_observations("QQQ", vec![(start, 1.0)])],
        )
        .with_unavailable(["ZZZZ".to_string()].into_iter().collect());

        let settled: Vec<String> = table.settled_symbols().into_iter().collect();
        assert_eq!(settled, vec!["QQQ".to_string(), "ZZZZ".to_string()]);
        assert!(!table.contains("ZZZZ"));
    }
}
