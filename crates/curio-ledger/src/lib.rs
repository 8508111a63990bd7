//! # curio-ledger
//!
//! Append-only provenance history and seller trust accounting.
//!
//! Two stores live here, both mutated exclusively by the settlement
//! engine's transition functions:
//!
//! 1. **`ProvenanceLog`**: per-asset, append-only audit trail of every
//!    successful state-changing operation, with a SHA-256 chain digest
//!    for tamper evidence
//! 2. **`TrustLedger`**: monotonic per-seller reputation counters,
//!    incremented once per completed sale

pub mod provenance;
pub mod trust;

pub use provenance::ProvenanceLog;
pub use trust::TrustLedger;
