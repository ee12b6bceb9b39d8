use {
    crate::Result,
    nftmarket_ledger::Listing,
    nftmarket_shared::{
        primitives::{Address, ToDisplayString, U256},
        units::format_amount,
    },
    serde::Serialize,
};

const BALANCE_UNIT: &str = "ether";

/// Outcome of a completed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub scenario: String,
    pub marketplace: String,
    pub asset: String,
    pub listing_price: String,
    /// Listings still for sale after the purchase.
    pub items: Vec<ItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<BalanceLog>,
}

/// Flattened view of an unsold listing with its resolved metadata URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub price: String,
    pub token_id: String,
    pub seller: String,
    pub owner: String,
    pub creator: String,
    pub token_uri: String,
}

impl ItemView {
    pub fn new(listing: &Listing, token_uri: String) -> Self {
        Self {
            price: listing.price.to_display_string(),
            token_id: listing.token_id.to_display_string(),
            seller: listing.seller.to_display_string(),
            owner: listing.owner.to_display_string(),
            creator: listing.creator.to_display_string(),
            token_uri,
        }
    }
}

/// Owner and buyer balances around the listing and the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLog {
    pub owner: BalanceChange,
    pub buyer: BalanceChange,
}

/// Balance of one account in ether, captured before listing and after the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceChange {
    pub address: String,
    pub before: String,
    pub after: String,
}

impl BalanceChange {
    pub fn new(address: Address, before: U256, after: U256) -> Result<Self> {
        Ok(Self {
            address: address.to_display_string(),
            before: format_amount(before, BALANCE_UNIT)?,
            after: format_amount(after, BALANCE_UNIT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, nftmarket_shared::units::parse_amount, serde_json::json};

    #[test]
    fn test_report_serializes_in_camel_case_without_absent_balances() {
        let report = Report {
            scenario: "royalty".into(),
            marketplace: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
            asset: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".into(),
            listing_price: "25000000000000000".into(),
            items: vec![ItemView {
                price: "100000000000000000000".into(),
                token_id: "2".into(),
                seller: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into(),
                owner: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into(),
                creator: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".into(),
                token_uri: "https://www.secondNft.com".into(),
            }],
            balances: None,
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["listingPrice"], json!("25000000000000000"));
        assert_eq!(value["items"][0]["tokenId"], json!("2"));
        assert_eq!(value["items"][0]["tokenUri"], json!("https://www.secondNft.com"));
        assert!(value.get("balances").is_none());
    }

    #[test]
    fn test_balance_change_is_formatted_in_ether() {
        let before = parse_amount("10000", "ether").unwrap();
        let after = parse_amount("9900", "ether").unwrap();

        let change = BalanceChange::new(Address::ZERO, before, after).unwrap();

        assert!(change.before.starts_with("10000."));
        assert!(change.after.starts_with("9900."));
    }
}
