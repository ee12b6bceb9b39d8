use nftmarket_shared::primitives::{Address, U256};

/// A marketplace record offering one token of an asset contract at a fixed price.
///
/// `item_id` is assigned sequentially by the marketplace. `owner` equals `seller` until the
/// listing is sold and equals the buyer afterwards; `sold` flips to `true` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub item_id: U256,
    pub nft_contract: Address,
    pub token_id: U256,
    pub price: U256,
    pub seller: Address,
    pub owner: Address,
    pub creator: Address,
    pub sold: bool,
}
