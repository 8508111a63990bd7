//! Error types for the Curio settlement core.
//!
//! All errors use the `CM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Listing errors
//! - 2xx: Funds / payment errors
//! - 3xx: Authorization errors
//! - 4xx: Milestone errors
//! - 5xx: Staking errors
//! - 6xx: Asset boundary errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, AssetId, Milestone};

/// Central error enum for all Curio operations.
///
/// Every mutating operation either fully succeeds or fails with exactly one
/// of these kinds, leaving all state as it was before the attempt.
#[derive(Debug, Error)]
pub enum CurioError {
    // =================================================================
    // Listing Errors (1xx)
    // =================================================================
    /// No listing record exists for this asset.
    #[error("CM_ERR_100: Listing not found for {0}")]
    ListingNotFound(AssetId),

    /// The asset has no active listing (never listed, or sale concluded).
    #[error("CM_ERR_101: Asset {0} is not listed for sale")]
    NotListed(AssetId),

    /// An active listing already exists for this asset.
    #[error("CM_ERR_102: Asset {0} is already listed")]
    AlreadyListed(AssetId),

    /// The listing price is not a positive whole number of minor units.
    #[error("CM_ERR_103: Invalid price: {price}")]
    InvalidPrice { price: Decimal },

    /// The listing has already been sold.
    #[error("CM_ERR_104: Asset {0} is already sold")]
    AlreadySold(AssetId),

    // =================================================================
    // Funds / Payment Errors (2xx)
    // =================================================================
    /// Not enough available balance to perform the operation.
    #[error("CM_ERR_200: Insufficient available balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The attached payment does not equal the listing price exactly.
    #[error("CM_ERR_201: Wrong payment amount: expected {expected}, got {offered}")]
    WrongAmount { expected: Decimal, offered: Decimal },

    /// Escrowed funds for a listing are missing or smaller than recorded.
    #[error("CM_ERR_202: Insufficient escrowed funds")]
    InsufficientEscrow,

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// The caller is not the owner of record for the asset.
    #[error("CM_ERR_300: {caller} is not the owner of {asset}")]
    NotOwner { asset: AssetId, caller: AccountId },

    /// The market operator is not approved to transfer the asset.
    #[error("CM_ERR_301: Market operator not approved for {0}")]
    NotApproved(AssetId),

    /// The caller is not the recorded buyer of the listing.
    #[error("CM_ERR_302: Caller is not the buyer of {0}")]
    NotBuyer(AssetId),

    /// The caller is not a registered verifier.
    #[error("CM_ERR_303: {0} is not a registered verifier")]
    NotVerifier(AccountId),

    // =================================================================
    // Milestone Errors (4xx)
    // =================================================================
    /// An operation was attempted at the wrong milestone.
    #[error("CM_ERR_400: Wrong milestone: expected {expected}, got {actual}")]
    WrongMilestone {
        expected: Milestone,
        actual: Milestone,
    },

    // =================================================================
    // Staking Errors (5xx)
    // =================================================================
    /// The attached stake is below the configured minimum.
    #[error("CM_ERR_500: Insufficient stake: need {needed}, got {offered}")]
    InsufficientStake { needed: Decimal, offered: Decimal },

    // =================================================================
    // Asset Boundary Errors (6xx)
    // =================================================================
    /// The asset-identity collaborator does not know this asset.
    #[error("CM_ERR_600: Asset not found: {0}")]
    AssetNotFound(AssetId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CM_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("CM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config, missing fields, etc.).
    #[error("CM_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("CM_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CurioError>;

// Conversion from std::io::Error
impl From<std::io::Error> for CurioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = CurioError::ListingNotFound(AssetId(42));
        let msg = format!("{err}");
        assert!(msg.starts_with("CM_ERR_100"), "Got: {msg}");
        assert!(msg.contains("asset:42"));
    }

    #[test]
    fn wrong_amount_display() {
        let err = CurioError::WrongAmount {
            expected: Decimal::new(100, 0),
            offered: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("CM_ERR_201"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn wrong_milestone_display() {
        let err = CurioError::WrongMilestone {
            expected: Milestone::Purchased,
            actual: Milestone::Listed,
        };
        let msg = format!("{err}");
        assert!(msg.contains("CM_ERR_400"));
        assert!(msg.contains("PURCHASED"));
        assert!(msg.contains("LISTED"));
    }

    #[test]
    fn all_errors_have_cm_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(CurioError::NotListed(AssetId(1))),
            Box::new(CurioError::AlreadySold(AssetId(1))),
            Box::new(CurioError::InsufficientEscrow),
            Box::new(CurioError::NotVerifier(AccountId([0u8; 32]))),
            Box::new(CurioError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("CM_ERR_"),
                "Error missing CM_ERR_ prefix: {msg}"
            );
        }
    }
}
