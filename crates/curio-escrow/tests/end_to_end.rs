//! End-to-end integration tests across the full settlement protocol.
//!
//! These tests exercise the complete sale lifecycle:
//! Listing Directory -> Escrow & Settlement Engine -> Ledger
//!
//! They verify that the components work together correctly in realistic
//! scenarios: the full happy path, competing buyers, out-of-order
//! verification, unauthorized delivery confirmation, re-listing, stake
//! policies, and funds conservation.

use curio_escrow::SettlementEngine;
use curio_ledger::{ProvenanceLog, TrustLedger};
use curio_registry::{AssetDirectory, InMemoryAssets, ListingBook, VerifierRegistry};
use curio_types::*;
use rust_decimal::Decimal;

/// Helper: a fully wired market — assets, listings, registry, engine,
/// ledgers — driven the way an embedding application would.
struct Market {
    engine: SettlementEngine,
    assets: InMemoryAssets,
    book: ListingBook,
    registry: VerifierRegistry,
    log: ProvenanceLog,
    trust: TrustLedger,
}

impl Market {
    fn new() -> Self {
        Self::with_config(&MarketConfig {
            minimum_stake: Decimal::new(1_000, 0),
            stake_policy: StakePolicy::Accumulate,
        })
    }

    fn with_config(config: &MarketConfig) -> Self {
        let operator = AccountId::from_pubkey([0xEE; 32]);
        Self {
            engine: SettlementEngine::new(),
            assets: InMemoryAssets::new(),
            book: ListingBook::new(operator),
            registry: VerifierRegistry::new(config),
            log: ProvenanceLog::new(),
            trust: TrustLedger::new(),
        }
    }

    /// Mint an asset to a seller and grant the operator approval.
    fn mint_approved(&mut self, seller: AccountId) -> AssetId {
        let asset = self.assets.mint(seller);
        self.assets
            .set_approval_for_all(seller, self.book.operator(), true);
        asset
    }

    fn list(&mut self, asset: AssetId, seller: AccountId, price: Decimal) -> Result<ListingId> {
        self.book
            .list_item(&self.assets, &mut self.log, asset, seller, price)
    }

    fn buy(&mut self, asset: AssetId, buyer: AccountId, payment: Decimal) -> Result<()> {
        self.engine
            .buy_item(&mut self.book, &mut self.log, asset, buyer, payment)
    }

    fn register_verifier(&mut self, who: AccountId, stake: Decimal) -> Result<()> {
        self.engine
            .register_as_verifier(&mut self.registry, who, stake)
    }

    fn approve_authentication(&mut self, asset: AssetId, verifier: AccountId) -> Result<()> {
        self.engine.approve_authentication(
            &self.registry,
            &mut self.book,
            &mut self.log,
            asset,
            verifier,
        )
    }

    fn approve_restoration(&mut self, asset: AssetId, verifier: AccountId) -> Result<()> {
        self.engine.approve_restoration(
            &self.registry,
            &mut self.book,
            &mut self.log,
            asset,
            verifier,
        )
    }

    fn confirm_delivery(&mut self, asset: AssetId, caller: AccountId) -> Result<()> {
        self.engine.confirm_delivery(
            &mut self.assets,
            &mut self.book,
            &mut self.log,
            &mut self.trust,
            asset,
            caller,
        )
    }
}

// =============================================================================
// Test: The full happy path from listing to settled delivery
// =============================================================================
#[test]
fn e2e_full_settlement() {
    let mut market = Market::new();

    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();

    let asset = market.mint_approved(seller);
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));

    // Seller lists at 100.
    market.list(asset, seller, Decimal::new(100, 0)).unwrap();

    // Buyer pays exactly 100 into escrow.
    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();
    assert_eq!(market.engine.escrow_held(asset), Decimal::new(100, 0));

    // A staked verifier attests authenticity, then restoration.
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.approve_authentication(asset, verifier).unwrap();
    market.approve_restoration(asset, verifier).unwrap();

    // Buyer confirms delivery: funds release, sale concludes.
    assert_eq!(market.trust.trust_score_of(seller), 0);
    market.confirm_delivery(asset, buyer).unwrap();

    // Seller got paid, escrow is empty, buyer's funds are gone.
    assert_eq!(
        market.engine.balance(seller).available,
        Decimal::new(100, 0)
    );
    assert_eq!(market.engine.escrow_held(asset), Decimal::ZERO);
    let buyer_bal = market.engine.balance(buyer);
    assert_eq!(buyer_bal.available, Decimal::ZERO);
    assert_eq!(buyer_bal.frozen, Decimal::ZERO);

    // Ownership moved to the buyer.
    assert_eq!(market.assets.owner_of(asset), Some(buyer));

    // Reputation: exactly one completed sale.
    assert_eq!(market.trust.trust_score_of(seller), 1);

    // Listing concluded.
    let listing = market.book.get(asset).unwrap();
    assert_eq!(listing.milestone, Milestone::Delivered);
    assert!(listing.is_sold);
    assert!(!listing.is_active);

    // History: one record per successful operation, in call order.
    let history = market.log.history_of(asset);
    let actions: Vec<HistoryAction> = history.iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Listed,
            HistoryAction::Purchased,
            HistoryAction::AuthenticationApproved,
            HistoryAction::RestorationApproved,
            HistoryAction::Delivered,
        ]
    );
    assert_eq!(history[4].price, Decimal::new(100, 0), "released amount");
    assert_eq!(history[4].actor, buyer);

    // Custody never minted or burned.
    market.engine.verify_conservation().unwrap();
}

// =============================================================================
// Test: Payment must equal the price exactly
// =============================================================================
#[test]
fn e2e_wrong_payment_amount() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(1_000, 0));

    for payment in [
        Decimal::new(99, 0),
        Decimal::new(101, 0),
        Decimal::ZERO,
        Decimal::new(200, 0),
    ] {
        let err = market.buy(asset, buyer, payment).unwrap_err();
        assert!(
            matches!(err, CurioError::WrongAmount { .. }),
            "payment {payment} must be rejected, got: {err}"
        );
    }

    // Nothing moved, milestone unchanged.
    let listing = market.book.get(asset).unwrap();
    assert_eq!(listing.milestone, Milestone::Listed);
    assert!(listing.buyer.is_none());
    assert_eq!(
        market.engine.balance(buyer).available,
        Decimal::new(1_000, 0)
    );
    assert_eq!(market.log.len_of(asset), 1);
}

// =============================================================================
// Test: Exactly one of two competing buyers is admitted
// =============================================================================
#[test]
fn e2e_second_buyer_rejected() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let first = AccountId::random();
    let second = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(500, 0)).unwrap();
    market.engine.deposit(first, Decimal::new(500, 0));
    market.engine.deposit(second, Decimal::new(500, 0));

    // Sequenced first: admitted.
    market.buy(asset, first, Decimal::new(500, 0)).unwrap();

    // Sequenced second: rejected, all effects discarded.
    let err = market.buy(asset, second, Decimal::new(500, 0)).unwrap_err();
    assert!(
        matches!(
            err,
            CurioError::WrongMilestone { .. } | CurioError::AlreadySold(_)
        ),
        "got: {err}"
    );

    let listing = market.book.get(asset).unwrap();
    assert_eq!(listing.buyer, Some(first));
    assert_eq!(market.engine.escrow_held(asset), Decimal::new(500, 0));
    assert_eq!(
        market.engine.balance(second).available,
        Decimal::new(500, 0),
        "loser's funds untouched"
    );
    assert_eq!(market.log.len_of(asset), 2, "Listed + one Purchased");
}

// =============================================================================
// Test: Buying a settled listing reports AlreadySold
// =============================================================================
#[test]
fn e2e_settled_listing_reports_already_sold() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let late = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));
    market.engine.deposit(late, Decimal::new(100, 0));

    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.approve_authentication(asset, verifier).unwrap();
    market.approve_restoration(asset, verifier).unwrap();
    market.confirm_delivery(asset, buyer).unwrap();

    let err = market.buy(asset, late, Decimal::new(100, 0)).unwrap_err();
    assert!(matches!(err, CurioError::AlreadySold(_)), "got: {err}");
}

// =============================================================================
// Test: Verification steps cannot be skipped or reordered
// =============================================================================
#[test]
fn e2e_milestones_are_strictly_ordered() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.engine.deposit(verifier, Decimal::new(2_000, 0));
    market
        .register_verifier(verifier, Decimal::new(2_000, 0))
        .unwrap();

    // Authentication before purchase: wrong milestone.
    let err = market.approve_authentication(asset, verifier).unwrap_err();
    assert!(matches!(err, CurioError::WrongMilestone { .. }));

    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();

    // Restoration before authentication: wrong milestone.
    let err = market.approve_restoration(asset, verifier).unwrap_err();
    assert!(matches!(err, CurioError::WrongMilestone { .. }));
    assert_eq!(
        market.book.get(asset).unwrap().milestone,
        Milestone::Purchased,
        "rejected attempt left no trace"
    );

    // Delivery before verification: wrong milestone.
    let err = market.confirm_delivery(asset, buyer).unwrap_err();
    assert!(matches!(err, CurioError::WrongMilestone { .. }));

    // In order: both approvals advance the milestone exactly once each.
    market.approve_authentication(asset, verifier).unwrap();
    assert_eq!(
        market.book.get(asset).unwrap().milestone,
        Milestone::AuthenticationApproved
    );
    market.approve_restoration(asset, verifier).unwrap();
    assert_eq!(
        market.book.get(asset).unwrap().milestone,
        Milestone::RestorationApproved
    );

    // Replaying an earlier step is rejected, not re-queued.
    let err = market.approve_authentication(asset, verifier).unwrap_err();
    assert!(matches!(err, CurioError::WrongMilestone { .. }));
}

// =============================================================================
// Test: Only the recorded buyer can confirm delivery
// =============================================================================
#[test]
fn e2e_only_buyer_confirms_delivery() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let stranger = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));

    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.approve_authentication(asset, verifier).unwrap();
    market.approve_restoration(asset, verifier).unwrap();

    for impostor in [stranger, seller, verifier] {
        let err = market.confirm_delivery(asset, impostor).unwrap_err();
        assert!(matches!(err, CurioError::NotBuyer(_)), "got: {err}");
    }

    // Escrow untouched by the rejected attempts.
    assert_eq!(market.engine.escrow_held(asset), Decimal::new(100, 0));
    assert_eq!(market.trust.trust_score_of(seller), 0);

    market.confirm_delivery(asset, buyer).unwrap();
    assert_eq!(market.trust.trust_score_of(seller), 1);
    assert_eq!(market.engine.escrow_held(asset), Decimal::ZERO);
}

// =============================================================================
// Test: Unregistered callers cannot attest
// =============================================================================
#[test]
fn e2e_unregistered_verifier_rejected() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();

    // Neither the buyer nor the seller is a verifier.
    for caller in [buyer, seller, AccountId::random()] {
        let err = market.approve_authentication(asset, caller).unwrap_err();
        assert!(matches!(err, CurioError::NotVerifier(_)), "got: {err}");
    }
    assert_eq!(
        market.book.get(asset).unwrap().milestone,
        Milestone::Purchased
    );
}

// =============================================================================
// Test: History length equals successful operations; reads are idempotent
// =============================================================================
#[test]
fn e2e_history_tracks_successful_operations_only() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let asset = market.mint_approved(seller);

    market.engine.deposit(buyer, Decimal::new(1_000, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));

    // A stream of successes and failures.
    market.list(asset, seller, Decimal::new(100, 0)).unwrap(); // record 1
    assert!(market.list(asset, seller, Decimal::new(100, 0)).is_err());
    assert!(market.buy(asset, buyer, Decimal::new(99, 0)).is_err());
    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap(); // record 2
    assert!(market.approve_authentication(asset, buyer).is_err());
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.approve_authentication(asset, verifier).unwrap(); // record 3
    assert!(market.approve_authentication(asset, verifier).is_err());
    market.approve_restoration(asset, verifier).unwrap(); // record 4
    assert!(market.confirm_delivery(asset, seller).is_err());
    market.confirm_delivery(asset, buyer).unwrap(); // record 5

    assert_eq!(market.log.len_of(asset), 5);

    // Repeated reads do not duplicate.
    let first = market.log.history_of(asset).len();
    let second = market.log.history_of(asset).len();
    assert_eq!(first, second);

    // The chain digest is stable across reads.
    assert_eq!(market.log.digest_of(asset), market.log.digest_of(asset));
}

// =============================================================================
// Test: Re-listing after a sale starts a fresh record
// =============================================================================
#[test]
fn e2e_relist_after_settlement() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let asset = market.mint_approved(seller);

    market.list(asset, seller, Decimal::new(100, 0)).unwrap();
    market.engine.deposit(buyer, Decimal::new(100, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));
    market.buy(asset, buyer, Decimal::new(100, 0)).unwrap();
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.approve_authentication(asset, verifier).unwrap();
    market.approve_restoration(asset, verifier).unwrap();
    market.confirm_delivery(asset, buyer).unwrap();

    let sold_id = market.book.get(asset).unwrap().id;

    // The previous seller no longer owns the asset and cannot re-list it.
    let err = market
        .list(asset, seller, Decimal::new(100, 0))
        .unwrap_err();
    assert!(matches!(err, CurioError::NotOwner { .. }));

    // The buyer — now the owner — re-lists at a higher price.
    market
        .assets
        .set_approval_for_all(buyer, market.book.operator(), true);
    market.list(asset, buyer, Decimal::new(250, 0)).unwrap();

    let current = market.book.get(asset).unwrap();
    assert_ne!(current.id, sold_id);
    assert_eq!(current.seller, buyer);
    assert_eq!(current.milestone, Milestone::Listed);
    assert!(current.is_active);
    assert!(!current.is_sold);

    let past = market.book.past(asset);
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].id, sold_id);

    // Provenance keeps accumulating across listings: 5 + the new Listed.
    assert_eq!(market.log.len_of(asset), 6);
}

// =============================================================================
// Test: Stake policies govern re-registration custody
// =============================================================================
#[test]
fn e2e_stake_policies() {
    // Accumulate: both deposits stay in custody.
    let mut market = Market::with_config(&MarketConfig {
        minimum_stake: Decimal::new(1_000, 0),
        stake_policy: StakePolicy::Accumulate,
    });
    let verifier = AccountId::random();
    market.engine.deposit(verifier, Decimal::new(3_000, 0));
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    assert_eq!(market.registry.stake_of(verifier), Decimal::new(2_000, 0));
    assert_eq!(
        market.engine.balance(verifier).frozen,
        Decimal::new(2_000, 0)
    );
    market.engine.verify_conservation().unwrap();

    // Replace: the earlier deposit comes back.
    let mut market = Market::with_config(&MarketConfig {
        minimum_stake: Decimal::new(1_000, 0),
        stake_policy: StakePolicy::Replace,
    });
    let verifier = AccountId::random();
    market.engine.deposit(verifier, Decimal::new(3_000, 0));
    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market
        .register_verifier(verifier, Decimal::new(2_000, 0))
        .unwrap();
    assert_eq!(market.registry.stake_of(verifier), Decimal::new(2_000, 0));
    let bal = market.engine.balance(verifier);
    assert_eq!(bal.frozen, Decimal::new(2_000, 0));
    assert_eq!(bal.available, Decimal::new(1_000, 0));
    market.engine.verify_conservation().unwrap();
}

// =============================================================================
// Test: Funds conservation holds at every stage of a sale
// =============================================================================
#[test]
fn e2e_conservation_at_every_stage() {
    let mut market = Market::new();
    let seller = AccountId::random();
    let buyer = AccountId::random();
    let verifier = AccountId::random();
    let asset = market.mint_approved(seller);

    market.engine.deposit(buyer, Decimal::new(500, 0));
    market.engine.deposit(verifier, Decimal::new(1_000, 0));
    market.engine.verify_conservation().unwrap();

    market.list(asset, seller, Decimal::new(500, 0)).unwrap();
    market.engine.verify_conservation().unwrap();

    market.buy(asset, buyer, Decimal::new(500, 0)).unwrap();
    market.engine.verify_conservation().unwrap();

    market
        .register_verifier(verifier, Decimal::new(1_000, 0))
        .unwrap();
    market.engine.verify_conservation().unwrap();

    market.approve_authentication(asset, verifier).unwrap();
    market.approve_restoration(asset, verifier).unwrap();
    market.confirm_delivery(asset, buyer).unwrap();
    market.engine.verify_conservation().unwrap();

    // Seller withdraws the proceeds; supply shrinks accordingly.
    market.engine.withdraw(seller, Decimal::new(500, 0)).unwrap();
    market.engine.verify_conservation().unwrap();
}

// =============================================================================
// Test: Queries on unknown assets
// =============================================================================
#[test]
fn e2e_unknown_asset_queries() {
    let market = Market::new();
    let nowhere = AssetId(404);

    let err = market.book.get(nowhere).unwrap_err();
    assert!(matches!(err, CurioError::ListingNotFound(_)));

    // No history is an empty sequence, not an error.
    assert!(market.log.history_of(nowhere).is_empty());

    // Unseen sellers score zero.
    assert_eq!(market.trust.trust_score_of(AccountId::random()), 0);
}
