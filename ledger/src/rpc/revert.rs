//! Mapping of node and transport failures onto [`Error`].
//!
//! Nodes report contract reverts as JSON-RPC error responses whose message embeds the revert
//! reason. The message layout differs per node implementation, so each known marker is tried in
//! turn.

use {
    crate::Error,
    alloy::{
        contract::Error as ContractError, network::ReceiptResponse as _,
        providers::PendingTransactionError, rpc::types::TransactionReceipt,
        transports::TransportError,
    },
};

/// Prefixes preceding the revert reason: Hardhat, Anvil/Geth, Ganache.
const REVERT_MARKERS: [&str; 3] = [
    "reverted with reason string '",
    "execution reverted: ",
    "revert ",
];
/// Anvil repeats the revert kind after the Geth marker.
const ANVIL_REVERT_PREFIX: &str = "revert: ";

/// Extracts the revert reason from a node error message, or `None` if it is not a revert.
pub(super) fn revert_reason(message: &str) -> Option<String> {
    if !message.contains("revert") {
        return None;
    }

    let reason = REVERT_MARKERS
        .iter()
        .find_map(|marker| message.split_once(marker).map(|(_, reason)| reason))
        .map(|reason| reason.trim_start_matches(ANVIL_REVERT_PREFIX))
        .map(|reason| reason.trim().trim_end_matches('\''))
        .unwrap_or(message);
    Some(reason.to_owned())
}

fn classify(message: &str) -> Error {
    match revert_reason(message) {
        Some(reason) => Error::Revert(reason),
        None => Error::Rpc(message.to_owned()),
    }
}

pub(super) fn ensure_success(receipt: &TransactionReceipt) -> Result<(), Error> {
    if receipt.status() {
        return Ok(());
    }
    Err(Error::revert(format!(
        "transaction {} reverted",
        receipt.transaction_hash
    )))
}

impl From<TransportError> for Error {
    fn from(value: TransportError) -> Self {
        match value.as_error_resp() {
            Some(payload) => classify(payload.message.as_ref()),
            None => Error::Rpc(value.to_string()),
        }
    }
}

impl From<PendingTransactionError> for Error {
    fn from(value: PendingTransactionError) -> Self {
        match value {
            PendingTransactionError::TransportError(e) => e.into(),
            other => Error::Rpc(other.to_string()),
        }
    }
}

impl From<ContractError> for Error {
    fn from(value: ContractError) -> Self {
        match value {
            ContractError::TransportError(e) => e.into(),
            ContractError::PendingTransactionError(e) => e.into(),
            ContractError::UnknownFunction(name) => Error::Abi(format!("unknown function {name}")),
            ContractError::AbiError(e) => Error::Abi(e.to_string()),
            other => Error::Rpc(other.to_string()),
        }
    }
}
