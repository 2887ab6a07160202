//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit cache read/write/validation details.
    pub print_serde: bool,
    /// Emit one line per symbol download (url, observations, first/last date).
    pub print_fetch_details: bool,
    /// Emit rolling/spread lengths for every pair as it is computed.
    pub print_pair_details: bool,
    /// Emit grid layout decisions while rendering.
    pub print_layout: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_serde: false,
    print_fetch_details: false,
    print_pair_details: false,
    print_layout: false,
};
