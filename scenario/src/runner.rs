use {
    crate::{BalanceChange, BalanceLog, Error, Expectations, ItemView, Report, Result, Scenario},
    alloy::dyn_abi::DynSolValue,
    nftmarket_ledger::{ContractFactory, Ledger, LedgerClient, Marketplace, MintableAsset},
    nftmarket_shared::{
        primitives::{Address, ToDisplayString, U256},
        units::parse_amount,
    },
};

/// Executes scenarios against a ledger, one step at a time, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct ScenarioRunner<L> {
    ledger: L,
}

impl<L: Ledger> ScenarioRunner<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub async fn run(&self, scenario: &Scenario) -> Result<Report> {
        tracing::info!(scenario = %scenario.name, "running scenario");
        let accounts = self.ledger.list_accounts().await?;
        let (owner, buyer) = match accounts.as_slice() {
            [owner, buyer, ..] => (owner.address, buyer.address),
            _ => return Err(Error::NotEnoughAccounts(accounts.len())),
        };

        let artifact = self.ledger.load(&scenario.marketplace_contract)?;
        let market = self.ledger.deploy(&artifact, owner, &[]).await?;
        tracing::info!(
            contract = %artifact.name,
            address = %market.address,
            "marketplace deployed"
        );
        let artifact = self.ledger.load(&scenario.asset_contract)?;
        let asset = self
            .ledger
            .deploy(&artifact, owner, &[DynSolValue::Address(market.address)])
            .await?;
        tracing::info!(
            contract = %artifact.name,
            address = %asset.address,
            "asset deployed"
        );
        let market = self.ledger.marketplace(&market);
        let asset = self.ledger.asset(&asset);

        let listing_price = market.get_listing_price().await?;
        let price = parse_amount(&scenario.price, &scenario.unit)?;
        tracing::info!(%listing_price, %price, "prices resolved");

        let mut token_ids = Vec::with_capacity(scenario.token_uris.len());
        for uri in &scenario.token_uris {
            let token_id = asset.create_token(uri).await?;
            tracing::info!(%token_id, %uri, "token minted");
            token_ids.push(token_id);
        }

        let before = self.balances(scenario, owner, buyer).await?;
        for token_id in &token_ids {
            let listing = market
                .create_market_item(asset.address(), *token_id, price, listing_price)
                .await?;
            tracing::info!(item_id = %listing.item_id, %token_id, "token listed");
        }

        market
            .connect(buyer)
            .create_market_sale(asset.address(), scenario.sale_item, price)
            .await?;
        tracing::info!(item_id = %scenario.sale_item, %buyer, "item sold");
        let after = self.balances(scenario, owner, buyer).await?;

        let listings = market.fetch_market_items().await?;
        let mut items = Vec::with_capacity(listings.len());
        for listing in &listings {
            let token_uri = asset.token_uri(listing.token_id).await?;
            items.push(ItemView::new(listing, token_uri));
        }

        let expectations = &scenario.expectations;
        let unsold: Vec<U256> = listings.iter().map(|listing| listing.token_id).collect();
        expectations.check_unsold(&unsold)?;
        for (token_id, expected) in &expectations.token_uris {
            let actual = asset.token_uri(*token_id).await?;
            Expectations::check_token_uri(*token_id, expected, &actual)?;
        }

        let balances = match (before, after) {
            (Some((owner_before, buyer_before)), Some((owner_after, buyer_after))) => {
                let log = BalanceLog {
                    owner: BalanceChange::new(owner, owner_before, owner_after)?,
                    buyer: BalanceChange::new(buyer, buyer_before, buyer_after)?,
                };
                tracing::info!(
                    owner_before = %log.owner.before,
                    owner_after = %log.owner.after,
                    buyer_before = %log.buyer.before,
                    buyer_after = %log.buyer.after,
                    "balances"
                );
                Some(log)
            }
            _ => None,
        };
        tracing::info!(scenario = %scenario.name, unsold = items.len(), "scenario passed");

        Ok(Report {
            scenario: scenario.name.clone(),
            marketplace: market.address().to_display_string(),
            asset: asset.address().to_display_string(),
            listing_price: listing_price.to_display_string(),
            items,
            balances,
        })
    }

    async fn balances(
        &self,
        scenario: &Scenario,
        owner: Address,
        buyer: Address,
    ) -> Result<Option<(U256, U256)>> {
        if !scenario.log_balances {
            return Ok(None);
        }
        let owner = self.ledger.get_balance(owner).await?;
        let buyer = self.ledger.get_balance(buyer).await?;
        Ok(Some((owner, buyer)))
    }
}
