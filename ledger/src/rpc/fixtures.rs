//! Receipts in the JSON form nodes return from `eth_getTransactionReceipt`.

use {
    alloy::{
        primitives::{B256, b256},
        rpc::types::TransactionReceipt,
    },
    nftmarket_shared::primitives::{Address, U256},
    serde_json::{Value, json},
};

const TX_HASH: B256 = b256!("5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060");
const BLOCK_HASH: B256 = b256!("b3b20624f8f0f86eb50dd04688409e5cea4bd02d700bf6e79e9384d47d6a5a35");

/// A log of `contract` carrying `topics` and no data.
pub fn log(contract: Address, topics: &[B256]) -> Value {
    json!({
        "address": contract,
        "topics": topics,
        "data": "0x",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x1",
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "logIndex": "0x0",
        "removed": false,
    })
}

/// An EIP-1559 receipt with the given outcome and logs.
pub fn receipt(success: bool, logs: Vec<Value>) -> TransactionReceipt {
    let status = if success { "0x1" } else { "0x0" };
    let value = json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x5208",
        "logs": logs,
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": Address::ZERO,
        "to": null,
        "contractAddress": null,
    });
    serde_json::from_value(value).unwrap()
}

pub fn word(value: U256) -> B256 {
    B256::from(value)
}
