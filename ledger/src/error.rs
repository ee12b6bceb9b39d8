//! # The error module
//!
//! Every failure the harness can observe from the ledger is classified into one of the variants
//! of [`Error`]. Logic that reacts to an error only matches on the variant; the attached strings
//! are informative and come straight from the node or the simulated program.

use thiserror::Error;

/// The result type with its error type set to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error for ledger operations.
///
/// # Variants
/// * [`Error::Connection`] the ledger endpoint is unreachable or malformed.
/// * [`Error::Deployment`] a contract could not be deployed.
/// * [`Error::Revert`] a contract-enforced precondition failed.
/// * [`Error::NotFound`] a query referenced a missing artifact, token or listing.
/// * [`Error::Abi`] call arguments or return data do not fit the contract ABI.
/// * [`Error::Rpc`] any other failure reported by the node or the transport.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot reach ledger at {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },
    #[error("Deployment of {contract} failed: {reason}")]
    Deployment { contract: String, reason: String },
    #[error("Transaction reverted: {0}")]
    Revert(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("ABI mismatch: {0}")]
    Abi(String),
    #[error("Ledger RPC failure: {0}")]
    Rpc(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn revert(reason: impl Into<String>) -> Self {
        Self::Revert(reason.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn deployment(contract: impl Into<String>, reason: impl ToString) -> Self {
        Self::Deployment {
            contract: contract.into(),
            reason: reason.to_string(),
        }
    }

    pub const fn is_revert(&self) -> bool {
        matches!(self, Self::Revert(_))
    }
}
