//! A deterministic single-process ledger hosting simulated marketplace and asset programs.
//!
//! The simulated programs reproduce the observable behaviour of the marketplace contracts
//! (listing fee, escrow, sale settlement, token metadata) so that scenarios can run without a
//! node. Every transaction executes against a scratch copy of the state and only commits when it
//! succeeds, so a revert leaves no trace other than the consumed nonce.

pub use {
    asset::InMemoryAsset,
    config::InMemoryConfig,
    ledger::{InMemoryLedger, ProgramKind},
    market::InMemoryMarketplace,
};

mod asset;
mod config;
mod ledger;
mod market;
mod state;
