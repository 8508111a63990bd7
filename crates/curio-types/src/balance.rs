//! Balance tracking types for the Curio escrow model.
//!
//! Every account has an `available` balance (usable for purchases, stakes,
//! and withdrawal) and a `frozen` balance (held in custody as escrowed
//! payment or verifier stake). The market settles in a single currency,
//! denominated in minor units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single account's balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Available for new purchases, stakes, or withdrawal.
    pub available: Decimal,
    /// Held in settlement custody (escrowed payment or verifier stake).
    pub frozen: Decimal,
}

impl BalanceEntry {
    /// Create a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Decimal::ZERO,
            frozen: Decimal::ZERO,
        }
    }

    /// Total balance (available + frozen).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.frozen
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available.is_zero() && self.frozen.is_zero()
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}
