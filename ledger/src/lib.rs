pub use {
    account::Account,
    artifact::{Artifact, ArtifactStore},
    error::{Error, Result},
    in_memory::{InMemoryConfig, InMemoryLedger},
    ledger::{ContractFactory, Deployed, Ledger, LedgerClient, Marketplace, MintableAsset},
    listing::Listing,
    rpc::RpcLedger,
};

pub mod in_memory;
pub mod rpc;

mod account;
mod artifact;
mod error;
mod ledger;
mod listing;
