//! Balance management for settlement custody.
//!
//! Tracks per-account balances with available/frozen accounting in the
//! market's single settlement currency. All mutations are atomic: either
//! the full operation succeeds or the balance is unchanged.

use std::collections::HashMap;

use curio_types::{AccountId, BalanceEntry, CurioError, Result};
use rust_decimal::Decimal;

/// The source of truth for all account balance state.
///
/// The settlement engine calls into it to freeze escrowed payments and
/// verifier stakes, and to execute the fund release at delivery.
pub struct BalanceManager {
    balances: HashMap<AccountId, BalanceEntry>,
}

impl BalanceManager {
    /// Create a new empty balance manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Deposit funds (increases available balance).
    pub fn deposit(&mut self, account: AccountId, amount: Decimal) {
        let entry = self.balances.entry(account).or_default();
        entry.available += amount;
    }

    /// Withdraw available funds. Frozen funds cannot be withdrawn.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount.
    pub fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        let entry =
            self.balances
                .get_mut(&account)
                .ok_or(CurioError::InsufficientBalance {
                    needed: amount,
                    available: Decimal::ZERO,
                })?;

        if entry.available < amount {
            return Err(CurioError::InsufficientBalance {
                needed: amount,
                available: entry.available,
            });
        }

        entry.available -= amount;
        Ok(())
    }

    /// Freeze funds (available → frozen). Used when escrowing a payment
    /// or taking a verifier stake into custody.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount.
    pub fn freeze(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        let entry =
            self.balances
                .get_mut(&account)
                .ok_or(CurioError::InsufficientBalance {
                    needed: amount,
                    available: Decimal::ZERO,
                })?;

        if entry.available < amount {
            return Err(CurioError::InsufficientBalance {
                needed: amount,
                available: entry.available,
            });
        }

        entry.available -= amount;
        entry.frozen += amount;
        Ok(())
    }

    /// Unfreeze funds (frozen → available). Used when a replaced stake is
    /// released back to its owner.
    ///
    /// # Errors
    /// Returns `InsufficientEscrow` if frozen < amount.
    pub fn unfreeze(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        let entry = self
            .balances
            .get_mut(&account)
            .ok_or(CurioError::InsufficientEscrow)?;

        if entry.frozen < amount {
            return Err(CurioError::InsufficientEscrow);
        }

        entry.frozen -= amount;
        entry.available += amount;
        Ok(())
    }

    /// Consume frozen funds (for settlement). Frozen balance decreases,
    /// nothing is added back to available.
    ///
    /// # Errors
    /// Returns `InsufficientEscrow` if frozen < amount.
    pub fn consume_frozen(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        let entry = self
            .balances
            .get_mut(&account)
            .ok_or(CurioError::InsufficientEscrow)?;

        if entry.frozen < amount {
            return Err(CurioError::InsufficientEscrow);
        }

        entry.frozen -= amount;
        Ok(())
    }

    /// Credit available balance (for settlement — the receiving side).
    pub fn credit(&mut self, account: AccountId, amount: Decimal) {
        let entry = self.balances.entry(account).or_default();
        entry.available += amount;
    }

    /// Get the balance for an account.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> BalanceEntry {
        self.balances.get(&account).cloned().unwrap_or_default()
    }

    /// Total currency held across all accounts (available + frozen).
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().map(BalanceEntry::total).sum()
    }
}

impl Default for BalanceManager {
    fn default() -> Self {
        Self::new()
    }
}
