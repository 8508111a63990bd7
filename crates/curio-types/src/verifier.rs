//! Verifier types for the staking-gated attestation registry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AccountId;

/// How a repeated registration by an already-registered verifier is applied.
///
/// The protocol interface permits re-registration but does not pin its
/// stake semantics, so the choice is a configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakePolicy {
    /// The new deposit tops up the recorded stake. Default: with no
    /// unstake operation, the recorded stake never shrinks.
    Accumulate,
    /// The new deposit replaces the recorded stake; the previously held
    /// amount is released back to the verifier's available balance.
    Replace,
}

impl Default for StakePolicy {
    fn default() -> Self {
        Self::Accumulate
    }
}

impl std::fmt::Display for StakePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accumulate => write!(f, "ACCUMULATE"),
            Self::Replace => write!(f, "REPLACE"),
        }
    }
}

/// A registered third-party attestor.
///
/// Registration never expires: the interface exposes no unregistration or
/// stake withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verifier {
    /// The verifier's identity.
    pub address: AccountId,
    /// Total stake held in custody for this verifier, in minor units.
    pub stake_amount: Decimal,
    /// Whether the verifier is currently authorized to attest.
    pub is_registered: bool,
    /// When the verifier first registered.
    pub registered_at: DateTime<Utc>,
}

impl Verifier {
    /// Create a freshly registered verifier record.
    #[must_use]
    pub fn new(address: AccountId, stake_amount: Decimal) -> Self {
        Self {
            address,
            stake_amount,
            is_registered: true,
            registered_at: Utc::now(),
        }
    }
}
