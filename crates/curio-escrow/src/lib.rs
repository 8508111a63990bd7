//! # curio-escrow
//!
//! **Escrow & Settlement Engine**: balance custody, per-listing escrow
//! holds, and the milestone transition functions.
//!
//! ## Architecture
//!
//! All protocol mutations are routed through [`SettlementEngine`]:
//! 1. **`BalanceManager`**: per-account available/frozen balances
//! 2. **`EscrowVault`**: payment holds attached to listings, exclusively
//!    owned by the engine between purchase and delivery confirmation
//! 3. **`FundsConservation`**: audit that custody never mints or burns
//! 4. **`SettlementEngine`**: buy, the two verification approvals,
//!    delivery confirmation with fund release, and verifier staking
//!
//! ## Settlement Flow
//!
//! ```text
//! buy_item:          freeze(buyer) → vault.hold → milestone PURCHASED
//! approve_*:         verifier gate → milestone advances, escrow untouched
//! confirm_delivery:  asset transfer → frozen(buyer) → available(seller)
//!                    → milestone DELIVERED → trust +1
//! ```
//!
//! Every transition validates all preconditions before its first write,
//! so a failed submission leaves no observable effect.

pub mod balance_manager;
pub mod conservation;
pub mod engine;
pub mod vault;

pub use balance_manager::BalanceManager;
pub use conservation::FundsConservation;
pub use engine::SettlementEngine;
pub use vault::{EscrowHold, EscrowVault};
