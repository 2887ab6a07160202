//! Configuration module for the spread monitor.

pub mod monitor;
pub mod provider;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use monitor::{DEFAULT_MONITOR, MonitorConfig};
pub use persistence::{PERSISTENCE, demo_price_cache_filename, price_cache_filename};
pub use plot::PLOT_CONFIG;
pub use provider::{PROVIDER, ProviderApiConfig};
