//! The settlement engine — every protocol mutation goes through here.
//!
//! The engine owns funds custody (balances + escrow vault) and drives the
//! milestone state machine on listings held by the [`ListingBook`]. Each
//! transition validates **all** preconditions before its first write, so a
//! failed submission leaves balances, escrow, listings, history, and
//! reputation exactly as they were.
//!
//! Callers pass the stores a transition touches as `&mut`; exclusive
//! borrows are what serializes the mutation stream — there is no locking,
//! and no two transitions can interleave on the same store.
//!
//! There is no refund or dispute path: once a payment is escrowed, the
//! only exit is `confirm_delivery`. This is a protocol limitation, not an
//! omission to paper over here.

use curio_ledger::{ProvenanceLog, TrustLedger};
use curio_registry::{AssetDirectory, ListingBook, VerifierRegistry, authz};
use curio_types::{
    AccountId, AssetId, BalanceEntry, CurioError, HistoryAction, Milestone, Result,
};
use rust_decimal::Decimal;

use crate::balance_manager::BalanceManager;
use crate::conservation::FundsConservation;
use crate::vault::EscrowVault;

/// Escrow custody and milestone settlement.
pub struct SettlementEngine {
    /// Per-account available/frozen balances.
    balances: BalanceManager,
    /// Escrowed payments, keyed by asset.
    vault: EscrowVault,
    /// Funds conservation audit.
    funds: FundsConservation,
}

impl SettlementEngine {
    /// Create a new engine with empty custody.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: BalanceManager::new(),
            vault: EscrowVault::new(),
            funds: FundsConservation::new(),
        }
    }

    // =====================================================================
    // Funds management
    // =====================================================================

    /// Deposit funds into an account's available balance.
    pub fn deposit(&mut self, account: AccountId, amount: Decimal) {
        self.balances.deposit(account, amount);
        self.funds.record_deposit(amount);
    }

    /// Withdraw available funds. Escrowed and staked funds stay locked.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the available balance is short.
    pub fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        self.balances.withdraw(account, amount)?;
        self.funds.record_withdrawal(amount);
        Ok(())
    }

    /// Balance snapshot for an account.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> BalanceEntry {
        self.balances.balance(account)
    }

    /// The amount currently escrowed for an asset's listing. Zero if none.
    #[must_use]
    pub fn escrow_held(&self, asset_id: AssetId) -> Decimal {
        self.vault.amount_held(asset_id)
    }

    /// Check the funds conservation invariant against current balances.
    ///
    /// # Errors
    /// Returns `Internal` if custody has minted or burned funds.
    pub fn verify_conservation(&self) -> Result<()> {
        self.funds.verify(self.balances.total_supply())
    }

    // =====================================================================
    // Verifier staking
    // =====================================================================

    /// Register the caller as a verifier, taking the stake into custody.
    ///
    /// Re-registration follows the registry's configured stake policy; a
    /// replaced stake is released back to the caller's available balance.
    ///
    /// # Errors
    /// - `InsufficientStake` if the deposit is below the minimum
    /// - `InsufficientBalance` if the caller cannot cover the deposit
    pub fn register_as_verifier(
        &mut self,
        registry: &mut VerifierRegistry,
        who: AccountId,
        stake: Decimal,
    ) -> Result<()> {
        registry.validate_stake(stake)?;
        self.balances.freeze(who, stake)?;
        let admission = registry.admit(who, stake);
        if admission.released > Decimal::ZERO {
            self.balances.unfreeze(who, admission.released)?;
        }
        tracing::debug!(
            verifier = %who,
            stake = %stake,
            recorded = %admission.recorded,
            "verifier registered"
        );
        Ok(())
    }

    // =====================================================================
    // Settlement transitions
    // =====================================================================

    /// Purchase a listed asset, escrowing the exact payment.
    ///
    /// # Errors
    /// - `NotListed` if the asset has no active listing
    /// - `AlreadySold` if the listing has concluded
    /// - `WrongMilestone` if the listing is mid-settlement
    /// - `WrongAmount` unless `payment` equals the price exactly
    /// - `InsufficientBalance` if the buyer cannot cover the payment
    pub fn buy_item(
        &mut self,
        book: &mut ListingBook,
        log: &mut ProvenanceLog,
        asset_id: AssetId,
        buyer: AccountId,
        payment: Decimal,
    ) -> Result<()> {
        let listing = book.current(asset_id).ok_or(CurioError::NotListed(asset_id))?;
        if listing.is_sold {
            return Err(CurioError::AlreadySold(asset_id));
        }
        if !listing.is_active {
            return Err(CurioError::NotListed(asset_id));
        }
        authz::ensure_milestone(listing, Milestone::Listed)?;
        if payment != listing.price {
            return Err(CurioError::WrongAmount {
                expected: listing.price,
                offered: payment,
            });
        }
        let listing_id = listing.id;

        // Funds move first: a failed freeze leaves everything untouched.
        self.balances.freeze(buyer, payment)?;
        self.vault.hold(asset_id, listing_id, buyer, payment)?;
        book.record_purchase(asset_id, buyer)?;
        log.append(asset_id, HistoryAction::Purchased, buyer, payment);

        tracing::debug!(asset = %asset_id, buyer = %buyer, amount = %payment, "payment escrowed");
        Ok(())
    }

    /// A registered verifier attests the asset's authenticity.
    ///
    /// # Errors
    /// - `NotVerifier` if the caller is not registered
    /// - `NotListed` if the asset has no current listing
    /// - `WrongMilestone` unless the listing sits at `Purchased`
    pub fn approve_authentication(
        &self,
        registry: &VerifierRegistry,
        book: &mut ListingBook,
        log: &mut ProvenanceLog,
        asset_id: AssetId,
        verifier: AccountId,
    ) -> Result<()> {
        self.attest(
            registry,
            book,
            log,
            asset_id,
            verifier,
            Milestone::Purchased,
            Milestone::AuthenticationApproved,
            HistoryAction::AuthenticationApproved,
        )
    }

    /// A registered verifier attests the asset's physical restoration.
    /// Only valid after authentication has been approved.
    ///
    /// # Errors
    /// - `NotVerifier` if the caller is not registered
    /// - `NotListed` if the asset has no current listing
    /// - `WrongMilestone` unless authentication was approved first
    pub fn approve_restoration(
        &self,
        registry: &VerifierRegistry,
        book: &mut ListingBook,
        log: &mut ProvenanceLog,
        asset_id: AssetId,
        verifier: AccountId,
    ) -> Result<()> {
        self.attest(
            registry,
            book,
            log,
            asset_id,
            verifier,
            Milestone::AuthenticationApproved,
            Milestone::RestorationApproved,
            HistoryAction::RestorationApproved,
        )
    }

    /// Shared body of the two verification steps.
    #[allow(clippy::too_many_arguments)]
    fn attest(
        &self,
        registry: &VerifierRegistry,
        book: &mut ListingBook,
        log: &mut ProvenanceLog,
        asset_id: AssetId,
        verifier: AccountId,
        from: Milestone,
        to: Milestone,
        action: HistoryAction,
    ) -> Result<()> {
        authz::ensure_verifier(registry, verifier)?;
        let listing = book.current(asset_id).ok_or(CurioError::NotListed(asset_id))?;
        authz::ensure_milestone(listing, from)?;
        // Custody sanity: between purchase and delivery the payment must
        // sit in the vault. Divergence here means corrupted state.
        if !self.vault.is_held(asset_id) {
            return Err(CurioError::InsufficientEscrow);
        }
        let price = listing.price;

        book.advance_milestone(asset_id, to)?;
        log.append(asset_id, action, verifier, price);
        Ok(())
    }

    /// The buyer confirms delivery: ownership transfers, escrow releases
    /// to the seller, the sale concludes, and the seller earns trust.
    ///
    /// # Errors
    /// - `NotListed` if the asset has no current listing
    /// - `NotBuyer` unless the caller is the recorded buyer
    /// - `WrongMilestone` unless restoration was approved
    pub fn confirm_delivery(
        &mut self,
        assets: &mut dyn AssetDirectory,
        book: &mut ListingBook,
        log: &mut ProvenanceLog,
        trust: &mut TrustLedger,
        asset_id: AssetId,
        caller: AccountId,
    ) -> Result<()> {
        let listing = book.current(asset_id).ok_or(CurioError::NotListed(asset_id))?;
        authz::ensure_buyer(listing, caller)?;
        authz::ensure_milestone(listing, Milestone::RestorationApproved)?;
        let seller = listing.seller;

        let amount = self
            .vault
            .get(asset_id)
            .map(|hold| hold.amount)
            .ok_or(CurioError::InsufficientEscrow)?;
        if self.balances.balance(caller).frozen < amount {
            return Err(CurioError::InsufficientEscrow);
        }

        // The asset boundary is the last fallible step; everything after
        // it is guaranteed by the checks above.
        assets.transfer(asset_id, seller, caller)?;

        self.vault.release(asset_id)?;
        self.balances.consume_frozen(caller, amount)?;
        self.balances.credit(seller, amount);
        book.advance_milestone(asset_id, Milestone::Delivered)?;
        let score = trust.record_sale(seller);
        log.append(asset_id, HistoryAction::Delivered, caller, amount);

        tracing::info!(
            asset = %asset_id,
            seller = %seller,
            buyer = %caller,
            amount = %amount,
            trust = score,
            "sale settled"
        );
        Ok(())
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new()
    }
}
