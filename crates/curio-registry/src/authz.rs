//! Authorization predicates for settlement transitions.
//!
//! Every privileged action is gated by one of these checks before any
//! state is touched. Centralizing them keeps identity checks out of the
//! transition bodies and guarantees a typed error per denial.
//!
//! ## Design Principles
//!
//! - **Fail-closed**: any check that cannot be positively satisfied denies
//! - **No bypass**: the engine evaluates predicates before every mutation
//! - **Typed denials**: each predicate returns exactly one error kind

use curio_types::{AccountId, AssetId, CurioError, Listing, Milestone, Result};

use crate::assets::AssetDirectory;
use crate::verifiers::VerifierRegistry;

/// The caller must be the owner of record for the asset.
///
/// An asset the collaborator does not know has no owner of record, so the
/// caller cannot be it.
///
/// # Errors
/// Returns `NotOwner` otherwise.
pub fn ensure_owner(
    assets: &dyn AssetDirectory,
    asset_id: AssetId,
    caller: AccountId,
) -> Result<()> {
    match assets.owner_of(asset_id) {
        Some(owner) if owner == caller => Ok(()),
        _ => Err(CurioError::NotOwner {
            asset: asset_id,
            caller,
        }),
    }
}

/// The market operator must hold blanket transfer approval from the owner,
/// or settlement could never move the asset.
///
/// # Errors
/// Returns `NotApproved` otherwise.
pub fn ensure_operator_approved(
    assets: &dyn AssetDirectory,
    asset_id: AssetId,
    owner: AccountId,
    operator: AccountId,
) -> Result<()> {
    if assets.is_approved_for_all(owner, operator) {
        Ok(())
    } else {
        Err(CurioError::NotApproved(asset_id))
    }
}

/// The caller must be a registered verifier.
///
/// # Errors
/// Returns `NotVerifier` otherwise.
pub fn ensure_verifier(registry: &VerifierRegistry, caller: AccountId) -> Result<()> {
    if registry.is_verifier(caller) {
        Ok(())
    } else {
        Err(CurioError::NotVerifier(caller))
    }
}

/// The caller must be the recorded buyer of the listing.
///
/// # Errors
/// Returns `NotBuyer` otherwise (including before any purchase).
pub fn ensure_buyer(listing: &Listing, caller: AccountId) -> Result<()> {
    if listing.buyer == Some(caller) {
        Ok(())
    } else {
        Err(CurioError::NotBuyer(listing.asset_id))
    }
}

/// The listing must currently sit at the expected milestone.
///
/// # Errors
/// Returns `WrongMilestone` otherwise.
pub fn ensure_milestone(listing: &Listing, expected: Milestone) -> Result<()> {
    if listing.milestone == expected {
        Ok(())
    } else {
        Err(CurioError::WrongMilestone {
            expected,
            actual: listing.milestone,
        })
    }
}
