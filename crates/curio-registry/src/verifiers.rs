//! Verifier registry — staking-gated admission of attestors.
//!
//! Registration requires a minimum stake deposit. Re-registration is
//! permitted; how the new deposit combines with the recorded stake is the
//! configured [`StakePolicy`]. The registry records stakes — the settlement
//! engine custodies the funds themselves, so `admit` reports how much
//! previously held stake (if any) the engine must release.
//!
//! There is no unregistration and no stake withdrawal.

use std::collections::HashMap;

use curio_types::{AccountId, CurioError, MarketConfig, Result, StakePolicy, Verifier};
use rust_decimal::Decimal;

/// Outcome of a stake admission, for the engine's custody bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAdmission {
    /// Previously held stake that is no longer recorded and must be
    /// released from custody. Zero except under `StakePolicy::Replace`.
    pub released: Decimal,
    /// The verifier's recorded stake after this admission.
    pub recorded: Decimal,
}

/// Staking-gated authorization table for verifier identities.
pub struct VerifierRegistry {
    verifiers: HashMap<AccountId, Verifier>,
    minimum_stake: Decimal,
    stake_policy: StakePolicy,
}

impl VerifierRegistry {
    /// Create a registry with the market's staking configuration.
    #[must_use]
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            verifiers: HashMap::new(),
            minimum_stake: config.minimum_stake,
            stake_policy: config.stake_policy,
        }
    }

    /// The minimum stake required for admission.
    #[must_use]
    pub fn minimum_stake(&self) -> Decimal {
        self.minimum_stake
    }

    /// The configured re-registration policy.
    #[must_use]
    pub fn stake_policy(&self) -> StakePolicy {
        self.stake_policy
    }

    /// Check a stake deposit against the minimum, without admitting.
    /// The engine calls this before moving any funds.
    ///
    /// # Errors
    /// Returns `InsufficientStake` if the deposit is below the minimum.
    pub fn validate_stake(&self, stake: Decimal) -> Result<()> {
        if stake < self.minimum_stake {
            return Err(CurioError::InsufficientStake {
                needed: self.minimum_stake,
                offered: stake,
            });
        }
        Ok(())
    }

    /// Record an admission for a validated deposit, applying the stake
    /// policy. Infallible once [`Self::validate_stake`] has passed.
    pub fn admit(&mut self, who: AccountId, stake: Decimal) -> StakeAdmission {
        match self.verifiers.get_mut(&who) {
            Some(existing) => {
                let previous = existing.stake_amount;
                let (released, recorded) = match self.stake_policy {
                    StakePolicy::Accumulate => (Decimal::ZERO, previous + stake),
                    StakePolicy::Replace => (previous, stake),
                };
                existing.stake_amount = recorded;
                existing.is_registered = true;
                StakeAdmission { released, recorded }
            }
            None => {
                self.verifiers.insert(who, Verifier::new(who, stake));
                StakeAdmission {
                    released: Decimal::ZERO,
                    recorded: stake,
                }
            }
        }
    }

    /// Validate and admit in one step.
    ///
    /// # Errors
    /// Returns `InsufficientStake` if the deposit is below the minimum.
    pub fn register(&mut self, who: AccountId, stake: Decimal) -> Result<StakeAdmission> {
        self.validate_stake(stake)?;
        Ok(self.admit(who, stake))
    }

    /// Whether an address is a registered verifier.
    #[must_use]
    pub fn is_verifier(&self, who: AccountId) -> bool {
        self.verifiers
            .get(&who)
            .is_some_and(|v| v.is_registered)
    }

    /// The recorded stake for an address. Zero if never registered.
    #[must_use]
    pub fn stake_of(&self, who: AccountId) -> Decimal {
        self.verifiers
            .get(&who)
            .map_or(Decimal::ZERO, |v| v.stake_amount)
    }

    /// Number of registered verifiers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.verifiers.values().filter(|v| v.is_registered).count()
    }
}
