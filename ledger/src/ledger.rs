use {
    crate::{Account, Artifact, Listing, Result},
    alloy::dyn_abi::DynSolValue,
    nftmarket_shared::primitives::{Address, U256},
    std::future::Future,
};

/// Read access to the accounts of a ledger.
pub trait LedgerClient: Send + Sync {
    /// All accounts known to the ledger in the node's stable order, with current balances.
    ///
    /// By convention the first account deploys the contracts and the second one buys.
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>>> + Send;

    fn get_balance(&self, address: Address) -> impl Future<Output = Result<U256>> + Send;
}

/// A contract that finished deploying, together with the artifact it was created from.
#[derive(Debug, Clone)]
pub struct Deployed {
    pub artifact: Artifact,
    pub address: Address,
    pub deployer: Address,
}

pub trait ContractFactory: Send + Sync {
    /// Resolves a compiled contract by name.
    fn load(&self, contract_name: &str) -> Result<Artifact>;

    /// Submits the deployment transaction and resolves once it is confirmed.
    fn deploy(
        &self,
        artifact: &Artifact,
        deployer: Address,
        constructor_args: &[DynSolValue],
    ) -> impl Future<Output = Result<Deployed>> + Send;
}

/// Call surface of the marketplace contract.
///
/// Every handle is bound to the account that signs its transactions. Use [`Self::connect`] to
/// act as a different account on the same contract.
pub trait Marketplace: Clone + Send + Sync {
    fn address(&self) -> Address;

    fn connect(&self, caller: Address) -> Self;

    fn get_listing_price(&self) -> impl Future<Output = Result<U256>> + Send;

    /// Lists `token_id` of `nft_contract` for `price`, paying `payment` as the listing fee.
    fn create_market_item(
        &self,
        nft_contract: Address,
        token_id: U256,
        price: U256,
        payment: U256,
    ) -> impl Future<Output = Result<Listing>> + Send;

    /// Buys listing `item_id`, paying `payment` for it.
    fn create_market_sale(
        &self,
        nft_contract: Address,
        item_id: U256,
        payment: U256,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Listings that are still for sale, ordered by item id.
    fn fetch_market_items(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send;
}

/// Call surface of the mintable asset (ERC-721) contract.
pub trait MintableAsset: Clone + Send + Sync {
    fn address(&self) -> Address;

    fn connect(&self, caller: Address) -> Self;

    /// Mints a new token to the caller and returns its id.
    fn create_token(&self, metadata_uri: &str) -> impl Future<Output = Result<U256>> + Send;

    fn token_uri(&self, token_id: U256) -> impl Future<Output = Result<String>> + Send;
}

/// A ledger able to host the marketplace interaction end to end.
pub trait Ledger: LedgerClient + ContractFactory {
    type Marketplace: Marketplace;
    type Asset: MintableAsset;

    /// Handle on a deployed marketplace, acting as its deployer.
    fn marketplace(&self, deployed: &Deployed) -> Self::Marketplace;

    /// Handle on a deployed asset contract, acting as its deployer.
    fn asset(&self, deployed: &Deployed) -> Self::Asset;
}
