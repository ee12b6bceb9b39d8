use {
    crate::Expectations,
    nftmarket_shared::primitives::U256,
    std::collections::BTreeMap,
};

const ROYALTY_MARKETPLACE: &str = "NFTMarket_royalty";
const ASSET: &str = "NFT";
const FIRST_URI: &str = "https://www.firstNft.com";
const SECOND_URI: &str = "https://www.secondNft.com";

/// One end to end marketplace interaction.
///
/// The first ledger account deploys both contracts, mints every URI of `token_uris` and lists
/// each minted token at `price`. The second account then buys listing `sale_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    /// Artifact name of the marketplace contract.
    pub marketplace_contract: String,
    /// Artifact name of the asset contract. Its constructor takes the marketplace address.
    pub asset_contract: String,
    pub token_uris: Vec<String>,
    /// Asking price of every listing as a decimal string in `unit`.
    pub price: String,
    pub unit: String,
    pub sale_item: U256,
    /// Records owner and buyer balances before listing and after the sale.
    pub log_balances: bool,
    pub expectations: Expectations,
}

impl Scenario {
    /// Two tokens listed at 100 ether on the royalty marketplace, the first one bought.
    pub fn royalty() -> Self {
        let expectations = Expectations {
            unsold_token_ids: Some(vec![U256::from(2)]),
            token_uris: BTreeMap::from([(U256::from(1), FIRST_URI.to_owned())]),
        };

        Self {
            name: "royalty".into(),
            marketplace_contract: ROYALTY_MARKETPLACE.into(),
            asset_contract: ASSET.into(),
            token_uris: vec![FIRST_URI.into(), SECOND_URI.into()],
            price: "100".into(),
            unit: "ether".into(),
            sale_item: U256::from(1),
            log_balances: false,
            expectations,
        }
    }

    /// [`Self::royalty`] with balance logging.
    pub fn royalty_balances() -> Self {
        Self {
            name: "royalty-balances".into(),
            log_balances: true,
            ..Self::royalty()
        }
    }
}
