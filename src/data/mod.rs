// Price loading and caching
pub mod pre_main_async;
pub mod timeseries;

// Re-export commonly used types
pub use pre_main_async::fetch_price_table;
pub use timeseries::FetchRequest;
pub use timeseries::serde_version::write_price_table_async;
