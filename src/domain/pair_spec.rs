use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumString};

/// How aggressively a pair's spread may move. Declared per pair in the
/// configuration; the symbol text is never inspected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VolatilityClass {
    #[default]
    Standard,
    /// Extreme movers (e.g. crypto). Spreads are clipped to the configured bound.
    Volatile,
}

impl VolatilityClass {
    pub fn clips_spread(&self) -> bool {
        matches!(self, VolatilityClass::Volatile)
    }
}

/// One configured (target, base) comparison.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairSpec {
    pub target: String,
    pub base: String,
    #[serde(default)]
    pub volatility: VolatilityClass,
}

impl PairSpec {
    pub fn new(target: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            base: base.into(),
            volatility: VolatilityClass::Standard,
        }
    }

    pub fn volatile(mut self) -> Self {
        self.volatility = VolatilityClass::Volatile;
        self
    }

    /// Display label, e.g. `QQQ − GLD`
    pub fn label(&self) -> String {
        format!("{} − {}", self.target, self.base)
    }

    pub fn symbols(&self) -> [&str; 2] {
        [&self.target, &self.base]
    }
}

impl std::fmt::Display for PairSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} vs {} [{}]", self.target, self.base, self.volatility)
    }
}

/// Every symbol referenced by `pairs`, once each, in lexicographic order.
/// Drives fetch iteration only; display order stays with `pairs`.
pub fn resolve_symbols(pairs: &[PairSpec]) -> BTreeSet<String> {
    // BTreeSet maintains sorted order and ensures uniqueness
    pairs
        .iter()
        .flat_map(|pair| pair.symbols())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_resolve_symbols_dedups_and_sorts() {
        let pairs = vec![
            PairSpec::new("TQQQ", "GLD"),
            PairSpec::new("QQQ", "GLD"),
            PairSpec::new("NVDA", "QQQ"),
            PairSpec::new("QQQ", "SPY"),
        ];
        let symbols: Vec<String> = resolve_symbols(&pairs).into_iter().collect();
        assert_eq!(symbols, vec!["GLD", "NVDA", "QQQ", "SPY", "TQQQ"]);
    }

    #[test]
    fn test_resolve_symbols_empty() {
        assert!(resolve_symbols(&[]).is_empty());
    }

    #[test]
    fn test_volatility_class_parsing() {
        assert_eq!(
            VolatilityClass::from_str("Volatile").unwrap(),
            VolatilityClass::Volatile
        );
        assert_eq!(
            VolatilityClass::from_str("standard").unwrap(),
            VolatilityClass::Standard
        );
        assert!(VolatilityClass::from_str("wild").is_err());
        assert_eq!(VolatilityClass::Volatile.to_string(), "volatile");
    }

    #[test]
    fn test_pair_spec_deserializes_with_default_class() {
        let pair: PairSpec = serde_json::from_str(r#"{"target":"QQQ","base":"GLD"}"#).unwrap();
        assert_eq!(pair.volatility, VolatilityClass::Standard);

        let pair: PairSpec =
            serde_json::from_str(r#"{"target":"BTC-USD","base":"GLD","volatility":"volatile"}"#)
                .unwrap();
        assert!(pair.volatility.clips_spread());
        assert_eq!(pair.label(), "BTC-USD − GLD");
    }
}
