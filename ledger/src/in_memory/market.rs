use {
    super::{
        asset::AssetProgram,
        ledger::InMemoryLedger,
        state::{Context, LedgerState},
    },
    crate::{Error, Listing, Marketplace, Result},
    nftmarket_shared::primitives::{Address, U256},
    std::collections::BTreeMap,
};

const BASIS_POINTS: u64 = 10_000;

/// Simulated marketplace contract.
///
/// Listing escrows the token and the listing fee; a sale pays the seller (minus the creator's
/// royalty on resales), hands the token to the buyer and releases the fee to the owner.
#[derive(Debug, Clone)]
pub(super) struct MarketProgram {
    owner: Address,
    listing_price: U256,
    royalty_basis_points: u16,
    items: BTreeMap<U256, Listing>,
}

impl MarketProgram {
    pub fn new(owner: Address, listing_price: U256, royalty_basis_points: u16) -> Self {
        Self {
            owner,
            listing_price,
            royalty_basis_points,
            items: BTreeMap::new(),
        }
    }

    pub fn listing_price(&self) -> U256 {
        self.listing_price
    }

    pub fn unsold_items(&self) -> Vec<Listing> {
        self.items
            .values()
            .filter(|item| !item.sold)
            .cloned()
            .collect()
    }

    pub fn item(&self, item_id: U256) -> Option<&Listing> {
        self.items.get(&item_id)
    }

    fn royalty(&self, listing: &Listing) -> U256 {
        if listing.seller == listing.creator {
            return U256::ZERO;
        }
        listing.price * U256::from(self.royalty_basis_points) / U256::from(BASIS_POINTS)
    }
}

/// The asset program named by a marketplace call. Any other address reverts the call.
fn asset_program(state: &mut LedgerState, nft_contract: Address) -> Result<&mut AssetProgram> {
    state
        .asset_mut(nft_contract)
        .map_err(|_| Error::revert(format!("{nft_contract} is not an asset contract")))
}

fn create_market_item(
    state: &mut LedgerState,
    ctx: &Context,
    nft_contract: Address,
    token_id: U256,
    price: U256,
) -> Result<Listing> {
    let market = state.marketplace(ctx.contract)?;
    if price.is_zero() {
        return Err(Error::revert("price must be at least 1 wei"));
    }
    if ctx.value != market.listing_price {
        return Err(Error::revert("price must equal listing price"));
    }

    let asset = asset_program(state, nft_contract)?;
    let creator = asset
        .token(token_id)
        .map(|token| token.creator)
        .ok_or_else(|| Error::revert("ERC721: invalid token ID"))?;
    asset.transfer_from(ctx.contract, ctx.caller, ctx.contract, token_id)?;

    let market = state.marketplace_mut(ctx.contract)?;
    let item_id = U256::from(market.items.len() + 1);
    let listing = Listing {
        item_id,
        nft_contract,
        token_id,
        price,
        seller: ctx.caller,
        owner: ctx.caller,
        creator,
        sold: false,
    };
    market.items.insert(item_id, listing.clone());
    Ok(listing)
}

fn create_market_sale(
    state: &mut LedgerState,
    ctx: &Context,
    nft_contract: Address,
    item_id: U256,
) -> Result<()> {
    let market = state.marketplace(ctx.contract)?;
    let listing = market
        .item(item_id)
        .cloned()
        .ok_or_else(|| Error::revert(format!("market item {item_id} does not exist")))?;
    if listing.nft_contract != nft_contract {
        return Err(Error::revert("asset contract does not match the listing"));
    }
    if listing.sold {
        return Err(Error::revert("item already sold"));
    }
    if ctx.value != listing.price {
        return Err(Error::revert("payment must equal the asking price"));
    }
    let royalty = market.royalty(&listing);
    let (owner, fee) = (market.owner, market.listing_price);

    state.transfer(ctx.contract, listing.creator, royalty)?;
    state.transfer(ctx.contract, listing.seller, listing.price - royalty)?;
    state.transfer(ctx.contract, owner, fee)?;
    asset_program(state, nft_contract)?.transfer_from(
        ctx.contract,
        ctx.contract,
        ctx.caller,
        listing.token_id,
    )?;

    let item = state
        .marketplace_mut(ctx.contract)?
        .items
        .get_mut(&item_id)
        .ok_or_else(|| Error::revert(format!("market item {item_id} does not exist")))?;
    item.owner = ctx.caller;
    item.sold = true;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct InMemoryMarketplace {
    ledger: InMemoryLedger,
    address: Address,
    caller: Address,
}

impl InMemoryMarketplace {
    pub(super) fn new(ledger: InMemoryLedger, address: Address, caller: Address) -> Self {
        Self {
            ledger,
            address,
            caller,
        }
    }

    /// Any listing, sold or not.
    pub async fn market_item(&self, item_id: U256) -> Result<Listing> {
        self.ledger
            .read(|state| {
                state
                    .marketplace(self.address)?
                    .item(item_id)
                    .cloned()
                    .ok_or_else(|| Error::not_found(format!("Market item {item_id}")))
            })
            .await
    }
}

impl Marketplace for InMemoryMarketplace {
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
        self.ledger
            .read(|state| Ok(state.marketplace(self.address)?.listing_price()))
            .await
    }

    async fn create_market_item(
        &self,
        nft_contract: Address,
        token_id: U256,
        price: U256,
        payment: U256,
    ) -> Result<Listing> {
        self.ledger
            .transact(self.caller, self.address, payment, |state, ctx| {
                create_market_item(state, ctx, nft_contract, token_id, price)
            })
            .await
    }

    async fn create_market_sale(
        &self,
        nft_contract: Address,
        item_id: U256,
        payment: U256,
    ) -> Result<()> {
        self.ledger
            .transact(self.caller, self.address, payment, |state, ctx| {
                create_market_sale(state, ctx, nft_contract, item_id)
            })
            .await
    }

    async fn fetch_market_items(&self) -> Result<Vec<Listing>> {
        self.ledger
            .read(|state| Ok(state.marketplace(self.address)?.unsold_items()))
            .await
    }
}
