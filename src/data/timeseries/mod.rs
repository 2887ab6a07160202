pub mod cache_file;
pub mod serde_version;
pub mod yahoo_version;

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::PriceTable;

/// What to download: each symbol once, over `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbols: BTreeSet<String>,
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
}

#[async_trait]
pub trait CreatePriceTable {
    // Either create a price table OR return an anyhow::error
    async fn create_price_table(&self, request: &FetchRequest) -> Result<PriceTable>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each loader in turn and keep the first table that loads.
pub async fn get_price_table_async(
    implementations: &[Box<dyn CreatePriceTable + Send + Sync>],
    request: &FetchRequest,
) -> Result<(PriceTable, &'static str)> {
    for imp in implementations {
        match imp.create_price_table(request).await {
            Ok(data) => {
                let signature = imp.signature();
                return Ok((data, signature));
            }
            Err(e) => {
                log::warn!("{} could not provide prices: {:#}", imp.signature(), e);
                // Continue to the next implementation
            }
        }
    }
    Err(anyhow!("All price loaders failed to create data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSeries;

    struct Failing;
    struct Fixed(PriceTable);

    #[async_trait]
    impl CreatePriceTable for Failing {
        async fn create_price_table(&self, _request: &FetchRequest) -> Result<PriceTable> {
            Err(anyhow!("nope"))
        }
        fn signature(&self) -> &'static str {
            "Failing"
        }
    }

    #[async_trait]
    impl CreatePriceTable for Fixed {
        async fn create_price_table(&self, _request: &FetchRequest) -> Result<PriceTable> {
            Ok(self.0.clone())
        }
        fn signature(&self) -> &'static str {
            "Fixed"
        }
    }

    fn request() -> FetchRequest {
        FetchRequest {
            symbols: ["QQQ".to_string()].into_iter().collect(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_falls_through_to_next_loader() {
        let req = request();
        let table = PriceTable::new(
            "fixed",
            req.start_date,
            req.end_date,
            vec![PriceSeries::from_observations("QQQ", vec![(req.start_date, 1.0)])],
        );
        let loaders: Vec<Box<dyn CreatePriceTable + Send + Sync>> =
            vec![Box::new(Failing), Box::new(Fixed(table.clone()))];

        let rt = tokio::runtime::Runtime::new().unwrap();
        let (loaded, signature) = rt.block_on(get_price_table_async(&loaders, &req)).unwrap();
        assert_eq!(signature, "Fixed");
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_all_loaders_failing_is_an_error() {
        let loaders: Vec<Box<dyn CreatePriceTable + Send + Sync>> = vec![Box::new(Failing)];
        let rt = tokio::runtime::Runtime::new().unwrap();
        assert!(rt.block_on(get_price_table_async(&loaders, &request())).is_err());
    }
}
