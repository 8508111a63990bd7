//! # curio-registry
//!
//! Listing directory, staking-gated verifier registry, and centralized
//! authorization predicates.
//!
//! ## Architecture
//!
//! This crate sits between the shared types and the settlement engine:
//! 1. **`AssetDirectory`**: the boundary trait to the asset-identity
//!    collaborator (ownership queries, operator approval, transfer)
//! 2. **`ListingBook`**: maps assets to their active listing and archives
//!    superseded records
//! 3. **`VerifierRegistry`**: admits verifiers by minimum stake and
//!    applies the configured re-registration policy
//! 4. **`authz`**: fail-closed authorization predicates evaluated before
//!    every transition

pub mod assets;
pub mod authz;
pub mod listings;
pub mod verifiers;

pub use assets::AssetDirectory;
pub use listings::ListingBook;
pub use verifiers::{StakeAdmission, VerifierRegistry};

#[cfg(any(test, feature = "test-helpers"))]
pub use assets::InMemoryAssets;
