//! History record types for the Curio provenance trail.
//!
//! Every successful state-changing operation on an asset appends a
//! [`HistoryRecord`] that can be read back in call order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// The kind of action a history record documents.
///
/// The `Display` strings are the wire tags the client renders; they match
/// the milestone an action produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryAction {
    /// The asset was listed for sale by its owner.
    Listed,
    /// A buyer escrowed payment for the asset.
    Purchased,
    /// A verifier attested the asset's authenticity.
    AuthenticationApproved,
    /// A verifier attested the asset's physical restoration.
    RestorationApproved,
    /// The buyer confirmed delivery and funds were released.
    Delivered,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed => write!(f, "Listed"),
            Self::Purchased => write!(f, "Purchased"),
            Self::AuthenticationApproved => write!(f, "AuthenticationApproved"),
            Self::RestorationApproved => write!(f, "RestorationApproved"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

/// One entry in an asset's append-only provenance trail.
///
/// Records are never mutated or removed; read order equals append order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// When the action was applied.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub action: HistoryAction,
    /// Who performed the action (seller, buyer, or verifier).
    pub actor: AccountId,
    /// The listing price or released amount at the time of the action,
    /// in minor currency units.
    pub price: Decimal,
}

impl HistoryRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn now(action: HistoryAction, actor: AccountId, price: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            actor,
            price,
        }
    }
}
