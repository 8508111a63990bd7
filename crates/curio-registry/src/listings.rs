//! Listing directory — the entry point of the settlement protocol.
//!
//! The `ListingBook` maps each asset to its current listing record and
//! archives superseded records when a sold asset is re-listed. Listing an
//! asset requires the caller to be its owner of record and the market
//! operator to hold transfer approval, so settlement can move the asset
//! later without further cooperation from the seller.

use std::collections::HashMap;

use curio_ledger::ProvenanceLog;
use curio_types::{
    AccountId, AssetId, CurioError, HistoryAction, Listing, ListingId, Milestone, Result,
};
use rust_decimal::Decimal;

use crate::assets::AssetDirectory;
use crate::authz;

/// Maps asset identifiers to active and historical listing records.
pub struct ListingBook {
    /// Current listing per asset (active, or concluded and not yet
    /// superseded by a re-listing).
    listings: HashMap<AssetId, Listing>,
    /// Superseded records per asset, oldest first.
    archive: HashMap<AssetId, Vec<Listing>>,
    /// The market's custody identity, which sellers approve for transfer.
    operator: AccountId,
}

impl ListingBook {
    /// Create an empty book operated by the given market identity.
    #[must_use]
    pub fn new(operator: AccountId) -> Self {
        Self {
            listings: HashMap::new(),
            archive: HashMap::new(),
            operator,
        }
    }

    /// The market operator identity sellers must approve.
    #[must_use]
    pub fn operator(&self) -> AccountId {
        self.operator
    }

    /// List an asset for sale.
    ///
    /// # Errors
    /// - `NotOwner` if the seller is not the owner of record
    /// - `NotApproved` if the operator lacks transfer approval
    /// - `InvalidPrice` if the price is not a positive whole number of
    ///   minor units
    /// - `AlreadyListed` if an active listing exists for the asset
    pub fn list_item(
        &mut self,
        assets: &dyn AssetDirectory,
        log: &mut ProvenanceLog,
        asset_id: AssetId,
        seller: AccountId,
        price: Decimal,
    ) -> Result<ListingId> {
        authz::ensure_owner(assets, asset_id, seller)?;
        authz::ensure_operator_approved(assets, asset_id, seller, self.operator)?;

        if price <= Decimal::ZERO || !price.is_integer() {
            return Err(CurioError::InvalidPrice { price });
        }

        if let Some(current) = self.listings.get(&asset_id) {
            if current.is_active {
                return Err(CurioError::AlreadyListed(asset_id));
            }
        }

        // Superseded concluded record moves to the archive.
        if let Some(previous) = self.listings.remove(&asset_id) {
            self.archive.entry(asset_id).or_default().push(previous);
        }

        let listing = Listing::new(asset_id, seller, price);
        let id = listing.id;
        self.listings.insert(asset_id, listing);
        log.append(asset_id, HistoryAction::Listed, seller, price);
        Ok(id)
    }

    /// The current listing record for an asset, if any.
    #[must_use]
    pub fn current(&self, asset_id: AssetId) -> Option<&Listing> {
        self.listings.get(&asset_id)
    }

    /// Snapshot query for the client boundary.
    ///
    /// # Errors
    /// Returns `ListingNotFound` if the asset has no listing record.
    pub fn get(&self, asset_id: AssetId) -> Result<Listing> {
        self.listings
            .get(&asset_id)
            .cloned()
            .ok_or(CurioError::ListingNotFound(asset_id))
    }

    /// Archived (superseded) listing records for an asset, oldest first.
    #[must_use]
    pub fn past(&self, asset_id: AssetId) -> &[Listing] {
        self.archive.get(&asset_id).map_or(&[], Vec::as_slice)
    }

    /// Record the buyer and advance the listing to `Purchased`.
    /// Invoked by the settlement engine after its preconditions pass.
    ///
    /// # Errors
    /// - `NotListed` if the asset has no current listing
    /// - `WrongMilestone` unless the listing sits at `Listed`
    pub fn record_purchase(&mut self, asset_id: AssetId, buyer: AccountId) -> Result<()> {
        let listing = self
            .listings
            .get_mut(&asset_id)
            .ok_or(CurioError::NotListed(asset_id))?;
        listing.record_purchase(buyer)
    }

    /// Advance the listing's milestone by one validated step.
    /// Invoked by the settlement engine after its preconditions pass.
    ///
    /// # Errors
    /// - `NotListed` if the asset has no current listing
    /// - `WrongMilestone` unless `to` is the immediate successor
    pub fn advance_milestone(&mut self, asset_id: AssetId, to: Milestone) -> Result<()> {
        let listing = self
            .listings
            .get_mut(&asset_id)
            .ok_or(CurioError::NotListed(asset_id))?;
        listing.advance(to)
    }

    /// Number of active listings.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.listings.values().filter(|l| l.is_active).count()
    }
}
