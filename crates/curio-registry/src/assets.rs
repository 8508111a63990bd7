//! Boundary to the asset-identity collaborator.
//!
//! Minting and metadata live outside this system. The settlement core only
//! needs three capabilities from the token subsystem: who owns an asset,
//! whether the market operator may move it, and moving it at settlement.

use curio_types::{AccountId, AssetId, CurioError, Result};

/// Capabilities the settlement core consumes from the asset subsystem.
pub trait AssetDirectory {
    /// Owner of record for an asset. `None` if the asset is unknown.
    fn owner_of(&self, asset_id: AssetId) -> Option<AccountId>;

    /// Whether `operator` is approved to transfer any of `owner`'s assets.
    fn is_approved_for_all(&self, owner: AccountId, operator: AccountId) -> bool;

    /// Transfer ownership of an asset. Invoked by the settlement engine
    /// exactly once per completed sale.
    ///
    /// # Errors
    /// - `AssetNotFound` if the asset is unknown
    /// - `NotOwner` if `from` is not the current owner
    fn transfer(&mut self, asset_id: AssetId, from: AccountId, to: AccountId) -> Result<()>;
}

/// In-memory stand-in for the asset subsystem. **Test use only** — the
/// real collaborator lives outside this workspace.
#[cfg(any(test, feature = "test-helpers"))]
pub struct InMemoryAssets {
    owners: std::collections::HashMap<AssetId, AccountId>,
    approvals: std::collections::HashSet<(AccountId, AccountId)>,
    next_id: u64,
}

#[cfg(any(test, feature = "test-helpers"))]
impl InMemoryAssets {
    #[must_use]
    pub fn new() -> Self {
        Self {
            owners: std::collections::HashMap::new(),
            approvals: std::collections::HashSet::new(),
            next_id: 1,
        }
    }

    /// Mint a fresh asset to `owner` and return its id.
    pub fn mint(&mut self, owner: AccountId) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        self.owners.insert(id, owner);
        id
    }

    /// Grant or revoke blanket transfer approval for an operator.
    pub fn set_approval_for_all(&mut self, owner: AccountId, operator: AccountId, approved: bool) {
        if approved {
            self.approvals.insert((owner, operator));
        } else {
            self.approvals.remove(&(owner, operator));
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Default for InMemoryAssets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl AssetDirectory for InMemoryAssets {
    fn owner_of(&self, asset_id: AssetId) -> Option<AccountId> {
        self.owners.get(&asset_id).copied()
    }

    fn is_approved_for_all(&self, owner: AccountId, operator: AccountId) -> bool {
        self.approvals.contains(&(owner, operator))
    }

    fn transfer(&mut self, asset_id: AssetId, from: AccountId, to: AccountId) -> Result<()> {
        let owner = self
            .owners
            .get_mut(&asset_id)
            .ok_or(CurioError::AssetNotFound(asset_id))?;
        if *owner != from {
            return Err(CurioError::NotOwner {
                asset: asset_id,
                caller: from,
            });
        }
        *owner = to;
        Ok(())
    }
}
