use {
    super::{decode, revert::ensure_success},
    crate::{Deployed, Error, MintableAsset, Result},
    alloy::{
        contract::{ContractInstance, Interface},
        dyn_abi::DynSolValue,
        providers::DynProvider,
        rpc::types::TransactionReceipt,
        sol_types::SolEvent,
    },
    nftmarket_shared::primitives::{Address, U256},
};

alloy::sol! {
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
}

#[derive(Clone)]
pub struct RpcAsset {
    provider: DynProvider,
    interface: Interface,
    address: Address,
    caller: Address,
}

impl RpcAsset {
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

/// The id of the token minted by this contract in `receipt`, taken from the ERC-721
/// `Transfer` event with a zero sender.
fn minted_token_id(receipt: &TransactionReceipt, contract: Address) -> Option<U256> {
    receipt
        .inner
        .logs()
        .iter()
        .filter(|log| log.address() == contract)
        .filter(|log| log.topic0() == Some(&Transfer::SIGNATURE_HASH))
        .find_map(|log| {
            let event = log.log_decode::<Transfer>().ok()?;
            let transfer = event.data();
            transfer.from.is_zero().then_some(transfer.tokenId)
        })
}

impl MintableAsset for RpcAsset {
    fn address(&self) -> Address {
        self.address
    }

    fn connect(&self, caller: Address) -> Self {
        Self {
            caller,
            ..self.clone()
        }
    }

    async fn create_token(&self, metadata_uri: &str) -> Result<U256> {
        let contract = self.contract();
        let args = [DynSolValue::String(metadata_uri.to_owned())];
        let receipt = contract
            .function("createToken", &args)?
            .from(self.caller)
            .send()
            .await?
            .get_receipt()
            .await?;
        ensure_success(&receipt)?;

        minted_token_id(&receipt, self.address).ok_or_else(|| {
            Error::Abi(format!(
                "mint transaction {} emitted no Transfer event",
                receipt.transaction_hash
            ))
        })
    }

    async fn token_uri(&self, token_id: U256) -> Result<String> {
        let contract = self.contract();
        let args = [DynSolValue::Uint(token_id, 256)];
        let output = match contract.function("tokenURI", &args)?.call().await {
            Ok(output) => output,
            Err(e) => {
                return Err(match Error::from(e) {
                    Error::Revert(_) => Error::not_found(format!("Token {token_id}")),
                    other => other,
                });
            }
        };
        decode::single("tokenURI", output)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::Abi("tokenURI does not return a string".into()))
    }
}
