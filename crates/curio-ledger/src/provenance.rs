//! Append-only provenance log, keyed by asset.
//!
//! Every successful state-changing operation appends one record; records
//! are never mutated or removed, and read order equals append order. Each
//! asset additionally carries a SHA-256 chain digest — every append folds
//! the new record into the previous digest, so any tampering with stored
//! history is detectable by recomputing the chain.

use std::collections::HashMap;

use curio_types::{AccountId, AssetId, HistoryAction, HistoryRecord};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Domain separator for the history chain digest.
const CHAIN_PREFIX: &[u8] = b"curio:history:v1:";

/// The genesis digest for an asset with no history.
const EMPTY_DIGEST: [u8; 32] = [0u8; 32];

/// Per-asset append-only history with chained digests.
pub struct ProvenanceLog {
    /// Records per asset, in append order.
    records: HashMap<AssetId, Vec<HistoryRecord>>,
    /// Chain digest head per asset.
    digests: HashMap<AssetId, [u8; 32]>,
}

impl ProvenanceLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            digests: HashMap::new(),
        }
    }

    /// Append a record for an asset. Infallible; ordering is call order.
    pub fn append(
        &mut self,
        asset_id: AssetId,
        action: HistoryAction,
        actor: AccountId,
        price: Decimal,
    ) {
        let record = HistoryRecord::now(action, actor, price);
        let prev = self
            .digests
            .get(&asset_id)
            .copied()
            .unwrap_or(EMPTY_DIGEST);
        self.digests
            .insert(asset_id, Self::fold(prev, asset_id, &record));
        self.records.entry(asset_id).or_default().push(record);
    }

    /// Full ordered history for an asset. Empty for unknown assets — an
    /// asset with no listing history is not an error.
    #[must_use]
    pub fn history_of(&self, asset_id: AssetId) -> &[HistoryRecord] {
        self.records.get(&asset_id).map_or(&[], Vec::as_slice)
    }

    /// Number of records for an asset.
    #[must_use]
    pub fn len_of(&self, asset_id: AssetId) -> usize {
        self.records.get(&asset_id).map_or(0, Vec::len)
    }

    /// Chain digest head for an asset. The genesis digest (all zeroes)
    /// for assets with no history.
    #[must_use]
    pub fn digest_of(&self, asset_id: AssetId) -> [u8; 32] {
        self.digests
            .get(&asset_id)
            .copied()
            .unwrap_or(EMPTY_DIGEST)
    }

    /// Fold one record into the chain: `H(prefix || prev || asset || record)`.
    fn fold(prev: [u8; 32], asset_id: AssetId, record: &HistoryRecord) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(CHAIN_PREFIX);
        hasher.update(prev);
        hasher.update(asset_id.0.to_le_bytes());
        hasher.update(record.timestamp.timestamp_micros().to_le_bytes());
        hasher.update(record.action.to_string().as_bytes());
        hasher.update(record.actor.as_bytes());
        hasher.update(record.price.to_string().as_bytes());
        hasher.finalize().into()
    }
}

impl Default for ProvenanceLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_asset_has_empty_history() {
        let log = ProvenanceLog::new();
        assert!(log.history_of(AssetId(1)).is_empty());
        assert_eq!(log.len_of(AssetId(1)), 0);
        assert_eq!(log.digest_of(AssetId(1)), EMPTY_DIGEST);
    }

    #[test]
    fn append_preserves_call_order() {
        let mut log = ProvenanceLog::new();
        let seller = AccountId::random();
        let buyer = AccountId::random();
        let asset = AssetId(7);

        log.append(asset, HistoryAction::Listed, seller, Decimal::new(100, 0));
        log.append(asset, HistoryAction::Purchased, buyer, Decimal::new(100, 0));

        let history = log.history_of(asset);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, HistoryAction::Listed);
        assert_eq!(history[0].actor, seller);
        assert_eq!(history[1].action, HistoryAction::Purchased);
        assert_eq!(history[1].actor, buyer);
    }

    #[test]
    fn repeated_reads_are_idempotent() {
        let mut log = ProvenanceLog::new();
        let asset = AssetId(3);
        log.append(
            asset,
            HistoryAction::Listed,
            AccountId::random(),
            Decimal::ONE,
        );

        assert_eq!(log.history_of(asset).len(), 1);
        assert_eq!(log.history_of(asset).len(), 1);
        assert_eq!(log.digest_of(asset), log.digest_of(asset));
    }

    #[test]
    fn assets_are_independent() {
        let mut log = ProvenanceLog::new();
        log.append(
            AssetId(1),
            HistoryAction::Listed,
            AccountId::random(),
            Decimal::ONE,
        );
        assert_eq!(log.len_of(AssetId(1)), 1);
        assert_eq!(log.len_of(AssetId(2)), 0);
    }

    #[test]
    fn digest_changes_on_every_append() {
        let mut log = ProvenanceLog::new();
        let asset = AssetId(9);
        let actor = AccountId::random();

        let d0 = log.digest_of(asset);
        log.append(asset, HistoryAction::Listed, actor, Decimal::new(50, 0));
        let d1 = log.digest_of(asset);
        log.append(asset, HistoryAction::Purchased, actor, Decimal::new(50, 0));
        let d2 = log.digest_of(asset);

        assert_ne!(d0, d1);
        assert_ne!(d1, d2);
    }

    #[test]
    fn digest_depends_on_prior_history() {
        let mut a = ProvenanceLog::new();
        let mut b = ProvenanceLog::new();
        let actor = AccountId::from_pubkey([1u8; 32]);
        let asset = AssetId(1);

        // Same final record, different prefix — digests must differ.
        a.append(asset, HistoryAction::Listed, actor, Decimal::ONE);
        a.append(asset, HistoryAction::Purchased, actor, Decimal::ONE);
        b.append(asset, HistoryAction::Purchased, actor, Decimal::ONE);

        assert_ne!(a.digest_of(asset), b.digest_of(asset));
    }
}
