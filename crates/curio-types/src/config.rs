//! Configuration types for the Curio market.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{StakePolicy, constants};

/// Configuration for one market instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Minimum stake required to register as a verifier, in minor units.
    pub minimum_stake: Decimal,
    /// How re-registration by an existing verifier is applied.
    pub stake_policy: StakePolicy,
}

impl MarketConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `Configuration` if the minimum stake is not positive.
    pub fn validate(&self) -> crate::Result<()> {
        if self.minimum_stake <= Decimal::ZERO {
            return Err(crate::CurioError::Configuration(format!(
                "minimum_stake must be positive, got {}",
                self.minimum_stake
            )));
        }
        Ok(())
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            minimum_stake: Decimal::from(constants::DEFAULT_MINIMUM_STAKE),
            stake_policy: StakePolicy::default(),
        }
    }
}
