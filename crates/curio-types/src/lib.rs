//! # curio-types
//!
//! Shared types, errors, and configuration for the **Curio** settlement core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AssetId`], [`AccountId`], [`ListingId`]
//! - **Listing model**: [`Listing`], [`Milestone`]
//! - **Verifier model**: [`Verifier`], [`StakePolicy`]
//! - **History model**: [`HistoryRecord`], [`HistoryAction`]
//! - **Balance model**: [`BalanceEntry`]
//! - **Configuration**: [`MarketConfig`]
//! - **Errors**: [`CurioError`] with `CM_ERR_` prefix codes
//! - **Constants**: system-wide defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod ids;
pub mod listing;
pub mod verifier;

// Re-export all primary types at crate root for ergonomic imports:
//   use curio_types::{Listing, Milestone, HistoryRecord, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use ids::*;
pub use listing::*;
pub use verifier::*;

// Constants are accessed via `curio_types::constants::FOO`
// (not re-exported to avoid name collisions).
