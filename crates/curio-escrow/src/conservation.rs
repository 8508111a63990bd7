//! Funds conservation invariant checker.
//!
//! Mathematical invariant enforced after every settlement:
//! ```text
//! Σ(available + frozen) == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Settlement only moves funds between accounts and custody states; it
//! never mints or burns. If this invariant ever breaks, something has gone
//! catastrophically wrong and the embedding application must halt.

use curio_types::{CurioError, Result};
use rust_decimal::Decimal;

/// Tracks system-wide deposit/withdrawal totals and validates conservation.
pub struct FundsConservation {
    /// Total deposits since genesis.
    deposits: Decimal,
    /// Total withdrawals since genesis.
    withdrawals: Decimal,
}

impl FundsConservation {
    /// Create a new conservation tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: Decimal::ZERO,
            withdrawals: Decimal::ZERO,
        }
    }

    /// Record a deposit.
    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    /// Record a withdrawal.
    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawals += amount;
    }

    /// Expected total supply: deposits - withdrawals.
    #[must_use]
    pub fn expected_supply(&self) -> Decimal {
        self.deposits - self.withdrawals
    }

    /// Verify that the actual supply (sum of all account balances) matches
    /// the expected supply.
    ///
    /// # Errors
    /// Returns `Internal` if actual ≠ expected.
    pub fn verify(&self, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(CurioError::Internal(format!(
                "funds conservation violated: actual supply {actual_supply} != expected \
                 {expected} (deposits={}, withdrawals={})",
                self.deposits, self.withdrawals,
            )));
        }
        Ok(())
    }

    /// Total deposits since genesis.
    #[must_use]
    pub fn total_deposits(&self) -> Decimal {
        self.deposits
    }

    /// Total withdrawals since genesis.
    #[must_use]
    pub fn total_withdrawals(&self) -> Decimal {
        self.withdrawals
    }
}

impl Default for FundsConservation {
    fn default() -> Self {
        Self::new()
    }
}
