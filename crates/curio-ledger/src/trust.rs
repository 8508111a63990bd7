//! Seller trust accounting.
//!
//! A monotonic counter per seller, created lazily at zero and incremented
//! by the settlement engine once per completed sale. No exposed operation
//! ever decrements a score.

use std::collections::HashMap;

use curio_types::{AccountId, constants};

/// Monotonic per-seller reputation counters.
pub struct TrustLedger {
    scores: HashMap<AccountId, u64>,
}

impl TrustLedger {
    /// Create an empty trust ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Credit a completed sale to the seller. Returns the new score.
    pub fn record_sale(&mut self, seller: AccountId) -> u64 {
        let score = self.scores.entry(seller).or_insert(0);
        *score += constants::TRUST_INCREMENT;
        *score
    }

    /// The seller's trust score. Zero for sellers never seen.
    #[must_use]
    pub fn trust_score_of(&self, seller: AccountId) -> u64 {
        self.scores.get(&seller).copied().unwrap_or(0)
    }

    /// Number of sellers with a recorded score.
    #[must_use]
    pub fn seller_count(&self) -> usize {
        self.scores.len()
    }
}

impl Default for TrustLedger {
    fn default() -> Self {
        Self::new()
    }
}
