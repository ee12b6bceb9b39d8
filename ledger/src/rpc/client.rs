use {
    super::{asset::RpcAsset, market::RpcMarketplace},
    crate::{
        Account, Artifact, ArtifactStore, ContractFactory, Deployed, Error, Ledger, LedgerClient,
        Result,
    },
    alloy::{
        contract::CallBuilder,
        dyn_abi::DynSolValue,
        providers::{DynProvider, Provider, ProviderBuilder},
        transports::http::reqwest::Url,
    },
    nftmarket_shared::primitives::{Address, U256},
};

/// Ledger reached through the JSON-RPC endpoint of a development node.
///
/// Transactions are sent with `eth_sendTransaction`, so every account used as a caller must be
/// unlocked on the node.
#[derive(Clone)]
pub struct RpcLedger {
    provider: DynProvider,
    artifacts: ArtifactStore,
}

impl RpcLedger {
    /// Connects to `endpoint` and checks that it answers, resolving artifacts from `artifacts`.
    pub async fn connect(endpoint: &str, artifacts: ArtifactStore) -> Result<Self> {
        let connection_error = |reason: String| Error::Connection {
            endpoint: endpoint.to_owned(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| connection_error(e.to_string()))?;
        let provider = ProviderBuilder::new().on_http(url).erased();
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| connection_error(e.to_string()))?;
        tracing::info!(endpoint, chain_id, "connected to ledger");

        Ok(Self { provider, artifacts })
    }
}

impl LedgerClient for RpcLedger {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let addresses = self.provider.get_accounts().await?;
        let mut accounts = Vec::with_capacity(addresses.len());
        for address in addresses {
            let balance = self.provider.get_balance(address).await?;
            accounts.push(Account::new(address, balance));
        }

        Ok(accounts)
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }
}

impl ContractFactory for RpcLedger {
    fn load(&self, contract_name: &str) -> Result<Artifact> {
        self.artifacts.load(contract_name)
    }

    async fn deploy(
        &self,
        artifact: &Artifact,
        deployer: Address,
        constructor_args: &[DynSolValue],
    ) -> Result<Deployed> {
        let code = artifact.deployment_code(constructor_args)?;
        let address = CallBuilder::<(), _, _, _>::new_raw_deploy(self.provider.clone(), code)
            .from(deployer)
            .deploy()
            .await
            .map_err(|e| Error::deployment(&artifact.name, Error::from(e)))?;
        tracing::debug!(contract = %artifact.name, %address, %deployer, "contract deployed");

        Ok(Deployed {
            artifact: artifact.clone(),
            address,
            deployer,
        })
    }
}

impl Ledger for RpcLedger {
    type Marketplace = RpcMarketplace;
    type Asset = RpcAsset;

    fn marketplace(&self, deployed: &Deployed) -> Self::Marketplace {
        RpcMarketplace::new(self.provider.clone(), deployed)
    }

    fn asset(&self, deployed: &Deployed) -> Self::Asset {
        RpcAsset::new(self.provider.clone(), deployed)
    }
}
