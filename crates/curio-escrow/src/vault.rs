//! Escrow vault — payment holds attached to listings.
//!
//! Between `buy_item` and `confirm_delivery` the escrowed payment is
//! exclusively owned by the settlement engine; no other component may read
//! or mutate it. A hold is created exactly once per purchase and destroyed
//! exactly once by the fund release at delivery.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use curio_types::{AccountId, AssetId, CurioError, ListingId, Result};
use rust_decimal::Decimal;

/// One escrowed payment, attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowHold {
    /// The listing record this payment funds.
    pub listing_id: ListingId,
    /// Who paid.
    pub buyer: AccountId,
    /// The escrowed amount, in minor units. Equals the listing price.
    pub amount: Decimal,
    /// When the payment entered custody.
    pub held_at: DateTime<Utc>,
}

/// Custody table for escrowed payments, keyed by asset.
pub struct EscrowVault {
    holds: HashMap<AssetId, EscrowHold>,
}

impl EscrowVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self {
            holds: HashMap::new(),
        }
    }

    /// Take a payment into custody for an asset's listing.
    ///
    /// # Errors
    /// Returns `Internal` if a hold already exists for the asset — the
    /// milestone machine makes that unreachable, so reaching it means
    /// custody and listing state have diverged.
    pub fn hold(
        &mut self,
        asset_id: AssetId,
        listing_id: ListingId,
        buyer: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        if self.holds.contains_key(&asset_id) {
            return Err(CurioError::Internal(format!(
                "escrow already held for {asset_id}"
            )));
        }
        self.holds.insert(
            asset_id,
            EscrowHold {
                listing_id,
                buyer,
                amount,
                held_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Release the hold for an asset, removing it from custody.
    ///
    /// # Errors
    /// Returns `InsufficientEscrow` if no hold exists.
    pub fn release(&mut self, asset_id: AssetId) -> Result<EscrowHold> {
        self.holds
            .remove(&asset_id)
            .ok_or(CurioError::InsufficientEscrow)
    }

    /// The hold for an asset, if any.
    #[must_use]
    pub fn get(&self, asset_id: AssetId) -> Option<&EscrowHold> {
        self.holds.get(&asset_id)
    }

    /// Whether a payment is currently held for an asset.
    #[must_use]
    pub fn is_held(&self, asset_id: AssetId) -> bool {
        self.holds.contains_key(&asset_id)
    }

    /// The amount currently held for an asset. Zero if none.
    #[must_use]
    pub fn amount_held(&self, asset_id: AssetId) -> Decimal {
        self.holds
            .get(&asset_id)
            .map_or(Decimal::ZERO, |h| h.amount)
    }

    /// Total funds in custody across all holds.
    #[must_use]
    pub fn total_held(&self) -> Decimal {
        self.holds.values().map(|h| h.amount).sum()
    }

    /// Number of active holds.
    #[must_use]
    pub fn count(&self) -> usize {
        self.holds.len()
    }
}

impl Default for EscrowVault {
    fn default() -> Self {
        Self::new()
    }
}
