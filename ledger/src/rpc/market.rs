use {
    super::{decode, revert::ensure_success},
    crate::{Deployed, Error, Listing, Marketplace, Result},
    alloy::{
        contract::{ContractInstance, Interface},
        dyn_abi::DynSolValue,
        providers::DynProvider,
    },
    nftmarket_shared::primitives::{Address, U256},
};

#[derive(Clone)]
pub struct RpcMarketplace {
    provider: DynProvider,
    interface: Interface,
    address: Address,
    caller: Address,
}

impl RpcMarketplace {
    pub fn new(provider: DynProvider, deployed: &Deployed) -> Self {
        Self {
            provider,
            interface: Interface::new(deployed.artifact.abi.clone()),
            address: deployed.address,
            caller: deployed.deployer,
        }
    }

    fn contract(&self) -> ContractInstance<DynProvider> {
        ContractInstance::new(self.address, self.provider.clone(), self.interface.clone())
    }
}

/// The most recent listing of `token_id` by `seller`. Marketplaces that do not record the asset
/// contract report it as the zero address, which matches any contract.
fn newest_listing(
    items: Vec<Listing>,
    nft_contract: Address,
    token_id: U256,
    seller: Address,
) -> Option<Listing> {
    items
        .into_iter()
        .filter(|item| item.token_id == token_id && item.seller == seller)
        .filter(|item| item.nft_contract == nft_contract || item.nft_contract.is_zero())
        .max_by_key(|item| item.item_id)
}

impl Marketplace for RpcMarketplace {
    fn address(&self) -> Address {
        self.address
    }

    fn connect(&self, caller: Address) -> Self {
        Self {
            caller,
            ..self.clone()
        }
    }

    async fn get_listing_price(&self) -> Result<U256> {
        let contract = self.contract();
        let output = contract.function("getListingPrice", &[])?.call().await?;
        decode::single("getListingPrice", output)?
            .as_uint()
            .map(|(price, _)| price)
            .ok_or_else(|| Error::Abi("getListingPrice does not return an integer".into()))
    }

    async fn create_market_item(
        &self,
        nft_contract: Address,
        token_id: U256,
        price: U256,
        payment: U256,
    ) -> Result<Listing> {
        let contract = self.contract();
        let args = [
            DynSolValue::Address(nft_contract),
            DynSolValue::Uint(token_id, 256),
            DynSolValue::Uint(price, 256),
        ];
        let receipt = contract
            .function("createMarketItem", &args)?
            .from(self.caller)
            .value(payment)
            .send()
            .await?
            .get_receipt()
            .await?;
        ensure_success(&receipt)?;

        // The transaction result is not observable over RPC, so the listing is read back.
        let items = self.fetch_market_items().await?;
        newest_listing(items, nft_contract, token_id, self.caller)
            .ok_or_else(|| Error::not_found(format!("Listing of token {token_id}")))
    }

    async fn create_market_sale(
        &self,
        nft_contract: Address,
        item_id: U256,
        payment: U256,
    ) -> Result<()> {
        let contract = self.contract();
        let args = [
            DynSolValue::Address(nft_contract),
            DynSolValue::Uint(item_id, 256),
        ];
        let receipt = contract
            .function("createMarketSale", &args)?
            .from(self.caller)
            .value(payment)
            .send()
            .await?
            .get_receipt()
            .await?;
        ensure_success(&receipt)
    }

    async fn fetch_market_items(&self) -> Result<Vec<Listing>> {
        let function = self
            .interface
            .abi()
            .function("fetchMarketItems")
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::Abi("unknown function fetchMarketItems".into()))?;
        let contract = self.contract();
        let output = contract.function("fetchMarketItems", &[])?.call().await?;
        decode::market_items(function, &output)
    }
}
