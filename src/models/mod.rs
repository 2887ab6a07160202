// Data models
pub mod price_table;
pub mod timeseries;

// Re-export commonly used types
pub use price_table::PriceTable;
pub use timeseries::{PairSpreadSeries, PriceSeries, RollingReturnSeries};
