// Domain types and value objects
pub mod pair_spec;

// Re-export commonly used types
pub use pair_spec::{PairSpec, VolatilityClass, resolve_symbols};
