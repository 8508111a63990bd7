//! # Listing — the settlement state machine record
//!
//! A `Listing` tracks one sale attempt of one asset from announcement to
//! settled delivery. Its `Milestone` advances through a strict sequence:
//!
//! ```text
//!   ┌────────┐ buy ┌───────────┐ verify ┌────────────────┐ verify ┌──────────────┐ confirm ┌───────────┐
//!   │ LISTED ├────▶│ PURCHASED ├───────▶│ AUTHENTICATION ├───────▶│ RESTORATION  ├────────▶│ DELIVERED │
//!   └────────┘     └───────────┘        │    APPROVED    │        │   APPROVED   │         └───────────┘
//!                                       └────────────────┘        └──────────────┘
//! ```
//!
//! ## Safety Properties
//!
//! - **Monotonic**: a milestone never moves backwards, and every advance
//!   goes through a single validated operation
//! - **Single-buyer**: `buyer` is set exactly once, at purchase
//! - **Terminal**: `DELIVERED` implies `is_sold` and clears `is_active`,
//!   so a settled listing can never be purchased again

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId, CurioError, ListingId};

/// One step in the ordered verification sequence a sale passes through.
///
/// Transitions are **monotonic** and single-step: `advance` only accepts
/// the immediate successor of the current milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    /// Announced for sale; awaiting a buyer.
    Listed,
    /// Payment escrowed; awaiting authenticity attestation.
    Purchased,
    /// A verifier attested authenticity; awaiting restoration attestation.
    AuthenticationApproved,
    /// A verifier attested physical condition; awaiting delivery.
    RestorationApproved,
    /// Buyer confirmed delivery; funds released. **Terminal.**
    Delivered,
}

impl Milestone {
    /// Return the next milestone in the sequence, or `None` from the
    /// terminal state.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Listed => Some(Self::Purchased),
            Self::Purchased => Some(Self::AuthenticationApproved),
            Self::AuthenticationApproved => Some(Self::RestorationApproved),
            Self::RestorationApproved => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Can this milestone advance directly to the given target?
    #[must_use]
    pub fn can_advance_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Whether this is the terminal milestone.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed => write!(f, "LISTED"),
            Self::Purchased => write!(f, "PURCHASED"),
            Self::AuthenticationApproved => write!(f, "AUTHENTICATION_APPROVED"),
            Self::RestorationApproved => write!(f, "RESTORATION_APPROVED"),
            Self::Delivered => write!(f, "DELIVERED"),
        }
    }
}

/// The record of one sale attempt for one asset.
///
/// Exactly one listing per asset may be active at a time; re-listing after
/// a completed sale creates a fresh record with a new [`ListingId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier of this listing record.
    pub id: ListingId,
    /// The asset being sold.
    pub asset_id: AssetId,
    /// The seller (owner of record at listing time).
    pub seller: AccountId,
    /// The buyer, recorded at purchase. `None` until then.
    pub buyer: Option<AccountId>,
    /// Sale price in minor currency units (positive integer value).
    pub price: Decimal,
    /// Current position in the verification sequence.
    pub milestone: Milestone,
    /// Whether the sale has settled.
    pub is_sold: bool,
    /// Whether the listing is open (accepting protocol actions).
    pub is_active: bool,
    /// When the listing was created.
    pub listed_at: DateTime<Utc>,
}

impl Listing {
    /// Create a fresh listing at the `Listed` milestone.
    #[must_use]
    pub fn new(asset_id: AssetId, seller: AccountId, price: Decimal) -> Self {
        Self {
            id: ListingId::new(),
            asset_id,
            seller,
            buyer: None,
            price,
            milestone: Milestone::Listed,
            is_sold: false,
            is_active: true,
            listed_at: Utc::now(),
        }
    }

    /// Advance the milestone by exactly one step.
    ///
    /// Advancing to `Delivered` also marks the listing sold and inactive,
    /// keeping the `is_sold ⇒ !is_active` invariant in one place.
    ///
    /// # Errors
    /// Returns `WrongMilestone` unless `to` is the immediate successor of
    /// the current milestone.
    pub fn advance(&mut self, to: Milestone) -> crate::Result<()> {
        if !self.milestone.can_advance_to(to) {
            return Err(CurioError::WrongMilestone {
                expected: to,
                actual: self.milestone,
            });
        }
        self.milestone = to;
        if to == Milestone::Delivered {
            self.is_sold = true;
            self.is_active = false;
        }
        Ok(())
    }

    /// Record the buyer at purchase time and advance to `Purchased`.
    ///
    /// # Errors
    /// Returns `WrongMilestone` unless the listing is at `Listed`.
    pub fn record_purchase(&mut self, buyer: AccountId) -> crate::Result<()> {
        self.advance(Milestone::Purchased)?;
        self.buyer = Some(buyer);
        Ok(())
    }
}
