use {
    super::{
        asset::{AssetProgram, InMemoryAsset},
        config::InMemoryConfig,
        market::{InMemoryMarketplace, MarketProgram},
        state::{Context, LedgerState, Program},
    },
    crate::{Account, Artifact, ContractFactory, Deployed, Error, Ledger, LedgerClient, Result},
    alloy::{dyn_abi::DynSolValue, json_abi::JsonAbi, primitives::keccak256},
    nftmarket_shared::primitives::{Address, Bytes, U256},
    std::{collections::HashMap, sync::Arc},
    tokio::sync::RwLock,
};

/// The simulated program an artifact name deploys on the in-memory ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    Marketplace,
    Asset,
}

const BUILTIN_PROGRAMS: [(&str, ProgramKind); 3] = [
    ("NFTMarket", ProgramKind::Marketplace),
    ("NFTMarket_royalty", ProgramKind::Marketplace),
    ("NFT", ProgramKind::Asset),
];

/// Ledger living entirely in process memory.
///
/// Clones share the same state, so handles created from one clone observe transactions
/// submitted through any other.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
    accounts: Arc<[Address]>,
    programs: HashMap<String, ProgramKind>,
    config: InMemoryConfig,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(InMemoryConfig::default())
    }
}

impl InMemoryLedger {
    pub fn new(config: InMemoryConfig) -> Self {
        let accounts: Arc<[Address]> = (0..config.accounts).map(dev_account).collect();
        let mut state = LedgerState::default();
        for address in accounts.iter() {
            state.credit(*address, config.initial_balance);
        }
        let programs = BUILTIN_PROGRAMS
            .into_iter()
            .map(|(name, kind)| (name.to_owned(), kind))
            .collect();

        Self {
            state: Arc::new(RwLock::new(state)),
            accounts,
            programs,
            config,
        }
    }

    /// Makes `contract_name` resolvable by [`ContractFactory::load`].
    pub fn register(&mut self, contract_name: impl Into<String>, kind: ProgramKind) {
        self.programs.insert(contract_name.into(), kind);
    }

    pub fn marketplace_at(&self, address: Address, caller: Address) -> InMemoryMarketplace {
        InMemoryMarketplace::new(self.clone(), address, caller)
    }

    pub fn asset_at(&self, address: Address, caller: Address) -> InMemoryAsset {
        InMemoryAsset::new(self.clone(), address, caller)
    }

    pub(super) async fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LedgerState) -> Result<T> + Send,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Executes one transaction from `caller` to `contract` carrying `value`.
    ///
    /// A caller unable to pay `value` is rejected before execution and keeps its nonce, like a
    /// node refusing the transaction. Otherwise the nonce is consumed, and the value transfer
    /// and `f` run on a copy of the state which replaces the ledger state only if `f` succeeds.
    pub(super) async fn transact<T, F>(
        &self,
        caller: Address,
        contract: Address,
        value: U256,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut LedgerState, &Context) -> Result<T> + Send,
    {
        let mut state = self.state.write().await;
        let balance = state.balance(caller);
        if balance < value {
            return Err(Error::Rpc(format!(
                "insufficient funds for transfer: {caller} holds {balance}, needs {value}"
            )));
        }
        let nonce = state.use_nonce(caller);
        let ctx = Context {
            caller,
            contract,
            value,
        };

        let mut scratch = state.clone();
        let outcome = scratch
            .transfer(caller, contract, value)
            .and_then(|()| f(&mut scratch, &ctx));
        match outcome {
            Ok(result) => {
                *state = scratch;
                tracing::debug!(%caller, %contract, %value, nonce, "transaction committed");
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(
                    %caller,
                    %contract,
                    %value,
                    nonce,
                    error = %e,
                    "transaction reverted"
                );
                Err(e)
            }
        }
    }
}

/// Deterministic address of the development account at `index`.
fn dev_account(index: usize) -> Address {
    let seed = format!("nftmarket in-memory account {index}");
    Address::from_word(keccak256(seed.as_bytes()))
}

impl LedgerClient for InMemoryLedger {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.read(|state| {
            Ok(self
                .accounts
                .iter()
                .map(|address| Account::new(*address, state.balance(*address)))
                .collect())
        })
        .await
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        self.read(|state| Ok(state.balance(address))).await
    }
}

impl ContractFactory for InMemoryLedger {
    fn load(&self, contract_name: &str) -> Result<Artifact> {
        if !self.programs.contains_key(contract_name) {
            return Err(Error::not_found(format!("Artifact {contract_name}")));
        }
        Ok(Artifact::new(contract_name, JsonAbi::default(), Bytes::new()))
    }

    async fn deploy(
        &self,
        artifact: &Artifact,
        deployer: Address,
        constructor_args: &[DynSolValue],
    ) -> Result<Deployed> {
        let kind = self
            .programs
            .get(&artifact.name)
            .copied()
            .ok_or_else(|| Error::deployment(&artifact.name, "unknown program"))?;
        // Checked before submission, like ABI encoding over RPC, so a mismatch keeps the nonce.
        let program = match (kind, constructor_args) {
            (ProgramKind::Marketplace, []) => Program::Marketplace(MarketProgram::new(
                deployer,
                self.config.listing_price,
                self.config.royalty_basis_points,
            )),
            (ProgramKind::Asset, [DynSolValue::Address(marketplace)]) => {
                Program::Asset(AssetProgram::new(*marketplace))
            }
            (ProgramKind::Marketplace, _) => {
                return Err(Error::deployment(
                    &artifact.name,
                    "constructor takes no arguments",
                ));
            }
            (ProgramKind::Asset, _) => {
                return Err(Error::deployment(
                    &artifact.name,
                    "constructor takes the marketplace address",
                ));
            }
        };

        let mut state = self.state.write().await;
        let address = deployer.create(state.use_nonce(deployer));
        state.install(address, program);
        tracing::debug!(contract = %artifact.name, %address, %deployer, "contract deployed");

        Ok(Deployed {
            artifact: artifact.clone(),
            address,
            deployer,
        })
    }
}

impl Ledger for InMemoryLedger {
    type Marketplace = InMemoryMarketplace;
    type Asset = InMemoryAsset;

    fn marketplace(&self, deployed: &Deployed) -> Self::Marketplace {
        self.marketplace_at(deployed.address, deployed.deployer)
    }

    fn asset(&self, deployed: &Deployed) -> Self::Asset {
        self.asset_at(deployed.address, deployed.deployer)
    }
}
