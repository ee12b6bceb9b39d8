use nftmarket_shared::primitives::{Address, U256};

/// A ledger account as seen by the harness at the time it was queried.
///
/// The balance is a snapshot; the ledger mutates the real balance on every settled transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub balance: U256,
}

impl Account {
    pub const fn new(address: Address, balance: U256) -> Self {
        Self { address, balance }
    }
}
