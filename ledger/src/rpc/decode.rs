use {
    crate::{Error, Listing, Result},
    alloy::{dyn_abi::DynSolValue, json_abi::Function},
    nftmarket_shared::primitives::{Address, U256},
};

/// Decodes the `MarketItem[]` returned by `fetchMarketItems`.
///
/// Struct fields are looked up by their ABI component names rather than by position, so
/// marketplace builds that order the fields differently decode the same way. `creator` falls
/// back to `seller` and `nftContract` to the zero address when the struct lacks them.
pub(super) fn market_items(function: &Function, output: &[DynSolValue]) -> Result<Vec<Listing>> {
    let names: Vec<&str> = function
        .outputs
        .first()
        .ok_or_else(|| Error::Abi(format!("{} returns nothing", function.name)))?
        .components
        .iter()
        .map(|component| component.name.as_str())
        .collect();
    let items = output
        .first()
        .and_then(DynSolValue::as_array)
        .ok_or_else(|| Error::Abi(format!("{} does not return an array", function.name)))?;

    items
        .iter()
        .map(|item| {
            let fields = item
                .as_tuple()
                .ok_or_else(|| Error::Abi("market item is not a struct".into()))?;
            market_item(&Fields {
                names: &names,
                values: fields,
            })
        })
        .collect()
}

fn market_item(fields: &Fields) -> Result<Listing> {
    let seller = fields.address("seller")?;
    Ok(Listing {
        item_id: fields.uint("itemId")?,
        nft_contract: fields.address("nftContract").unwrap_or(Address::ZERO),
        token_id: fields.uint("tokenId")?,
        price: fields.uint("price")?,
        seller,
        owner: fields.address("owner")?,
        creator: fields.address("creator").unwrap_or(seller),
        sold: fields.bool("sold")?,
    })
}

struct Fields<'a> {
    names: &'a [&'a str],
    values: &'a [DynSolValue],
}

impl Fields<'_> {
    fn get(&self, name: &str) -> Result<&DynSolValue> {
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| Error::Abi(format!("market item has no field {name}")))
    }

    fn uint(&self, name: &str) -> Result<U256> {
        self.get(name)?
            .as_uint()
            .map(|(value, _)| value)
            .ok_or_else(|| Error::Abi(format!("market item field {name} is not an integer")))
    }

    fn address(&self, name: &str) -> Result<Address> {
        self.get(name)?
            .as_address()
            .ok_or_else(|| Error::Abi(format!("market item field {name} is not an address")))
    }

    fn bool(&self, name: &str) -> Result<bool> {
        self.get(name)?
            .as_bool()
            .ok_or_else(|| Error::Abi(format!("market item field {name} is not a bool")))
    }
}

/// The single value returned by a view function.
pub(super) fn single(function: &str, output: Vec<DynSolValue>) -> Result<DynSolValue> {
    output
        .into_iter()
        .next()
        .ok_or_else(|| Error::Abi(format!("{function} returned no value")))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{json_abi::JsonAbi, primitives::address},
    };

    const SELLER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const BUYER: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
    const NFT: Address = address!("e7f1725e7734ce288f8367e1bb143e90bb3f0512");

    fn fetch_market_items(components: &str) -> Function {
        let abi = format!(
            r#"[{{"type": "function", "name": "fetchMarketItems", "inputs": [],
                 "outputs": [{{"name": "", "type": "tuple[]",
                               "internalType": "struct NFTMarket.MarketItem[]",
                               "components": {components}}}],
                 "stateMutability": "view"}}]"#
        );
        let abi: JsonAbi = serde_json::from_str(&abi).unwrap();
        abi.function("fetchMarketItems").unwrap()[0].clone()
    }

    fn uint(value: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(value), 256)
    }

    #[test]
    fn test_royalty_market_item_decodes_every_field() {
        let function = fetch_market_items(
            r#"[{"name": "itemId", "type": "uint256"},
                {"name": "nftContract", "type": "address"},
                {"name": "tokenId", "type": "uint256"},
                {"name": "seller", "type": "address"},
                {"name": "owner", "type": "address"},
                {"name": "creator", "type": "address"},
                {"name": "price", "type": "uint256"},
                {"name": "sold", "type": "bool"}]"#,
        );
        let item = DynSolValue::Tuple(vec![
            uint(2),
            DynSolValue::Address(NFT),
            uint(2),
            DynSolValue::Address(SELLER),
            DynSolValue::Address(BUYER),
            DynSolValue::Address(SELLER),
            uint(100),
            DynSolValue::Bool(true),
        ]);

        let listings = market_items(&function, &[DynSolValue::Array(vec![item])]).unwrap();

        assert_eq!(
            listings,
            vec![Listing {
                item_id: U256::from(2),
                nft_contract: NFT,
                token_id: U256::from(2),
                price: U256::from(100),
                seller: SELLER,
                owner: BUYER,
                creator: SELLER,
                sold: true,
            }]
        );
    }

    #[test]
    fn test_reordered_market_item_without_creator_falls_back_to_seller() {
        let function = fetch_market_items(
            r#"[{"name": "sold", "type": "bool"},
                {"name": "price", "type": "uint256"},
                {"name": "owner", "type": "address"},
                {"name": "seller", "type": "address"},
                {"name": "tokenId", "type": "uint256"},
                {"name": "itemId", "type": "uint256"}]"#,
        );
        let item = DynSolValue::Tuple(vec![
            DynSolValue::Bool(false),
            uint(7),
            DynSolValue::Address(SELLER),
            DynSolValue::Address(SELLER),
            uint(3),
            uint(1),
        ]);

        let listings = market_items(&function, &[DynSolValue::Array(vec![item])]).unwrap();

        assert_eq!(listings[0].item_id, U256::from(1));
        assert_eq!(listings[0].token_id, U256::from(3));
        assert_eq!(listings[0].creator, SELLER);
        assert_eq!(listings[0].nft_contract, Address::ZERO);
        assert!(!listings[0].sold);
    }

    #[test]
    fn test_market_item_missing_required_field_is_abi_error() {
        let function = fetch_market_items(r#"[{"name": "itemId", "type": "uint256"}]"#);
        let item = DynSolValue::Tuple(vec![uint(1)]);

        let err = market_items(&function, &[DynSolValue::Array(vec![item])]).unwrap_err();

        assert!(matches!(err, Error::Abi(_)));
    }

    #[test]
    fn test_empty_array_decodes_to_no_listings() {
        let function = fetch_market_items(r#"[{"name": "itemId", "type": "uint256"}]"#);

        let listings = market_items(&function, &[DynSolValue::Array(Vec::new())]).unwrap();

        assert!(listings.is_empty());
    }
}
