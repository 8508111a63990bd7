//! System-wide constants for the Curio settlement core.

/// Default minimum verifier stake, in minor currency units.
pub const DEFAULT_MINIMUM_STAKE: u64 = 1_000_000;

/// Trust score increment per completed sale.
pub const TRUST_INCREMENT: u64 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Curio";
