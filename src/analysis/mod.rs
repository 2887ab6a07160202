// Spread computation: rolling returns -> pair spread -> percentile rank
pub mod pair_analysis;
pub mod pair_error;
pub mod pair_spread;
pub mod percentile;
pub mod rolling_return;

// Re-export commonly used types
pub use pair_analysis::{PairOutcome, PairReport, analyze_all_pairs, analyze_pair, log_run_summary};
pub use pair_error::PairError;
