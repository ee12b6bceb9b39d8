//! # The error module
//!
//! A scenario either completes and produces a [`Report`](crate::Report) or aborts at the first
//! failing step. Ledger and unit failures pass through untouched so the caller sees exactly what
//! the ledger reported.

use {nftmarket_shared::units::AmountError, thiserror::Error};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Ledger(#[from] nftmarket_ledger::Error),
    #[error(transparent)]
    Units(#[from] AmountError),
    #[error("The scenario needs an owner and a buyer account, the ledger has {0}")]
    NotEnoughAccounts(usize),
    #[error("Expectation failed: {0}")]
    ExpectationFailed(String),
    #[error("Unknown scenario {0}")]
    UnknownScenario(String),
}
