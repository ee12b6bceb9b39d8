//! Ledger access over Ethereum JSON-RPC.
//!
//! Contracts are deployed from compiled artifacts and called through ABI-driven contract
//! instances, so the harness works with any build of the marketplace contracts that keeps the
//! function names of the call surface.

pub use {asset::RpcAsset, client::RpcLedger, market::RpcMarketplace};

mod asset;
mod client;
mod decode;
#[cfg(test)]
mod fixtures;
mod market;
mod revert;
