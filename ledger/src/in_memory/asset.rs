use {
    super::{
        ledger::InMemoryLedger,
        state::{Context, LedgerState},
    },
    crate::{Error, MintableAsset, Result},
    nftmarket_shared::primitives::{Address, U256},
    std::collections::{BTreeMap, HashSet},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub owner: Address,
    pub creator: Address,
    pub uri: String,
}

/// Simulated ERC-721 asset contract with per-token metadata URIs.
///
/// Minting approves the marketplace the contract was deployed for as an operator of the
/// minter, so freshly minted tokens can be listed without a separate approval.
#[derive(Debug, Clone)]
pub(super) struct AssetProgram {
    marketplace: Address,
    last_token_id: U256,
    tokens: BTreeMap<U256, Token>,
    operators: HashSet<(Address, Address)>,
}

impl AssetProgram {
    pub fn new(marketplace: Address) -> Self {
        Self {
            marketplace,
            last_token_id: U256::ZERO,
            tokens: BTreeMap::new(),
            operators: HashSet::new(),
        }
    }

    pub fn token(&self, token_id: U256) -> Option<&Token> {
        self.tokens.get(&token_id)
    }

    fn mint(&mut self, to: Address, uri: &str) -> Result<U256> {
        if uri.is_empty() {
            return Err(Error::revert("token URI must not be empty"));
        }
        self.last_token_id += U256::from(1);
        let token_id = self.last_token_id;
        self.tokens.insert(
            token_id,
            Token {
                owner: to,
                creator: to,
                uri: uri.to_owned(),
            },
        );
        self.operators.insert((to, self.marketplace));
        Ok(token_id)
    }

    fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    /// Moves `token_id` from `from` to `to` on behalf of `operator`.
    pub fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<()> {
        let approved = operator == from || self.operators.contains(&(from, operator));
        let token = self
            .tokens
            .get_mut(&token_id)
            .ok_or_else(|| Error::revert("ERC721: invalid token ID"))?;
        if token.owner != from {
            return Err(Error::revert("ERC721: transfer from incorrect owner"));
        }
        if !approved {
            return Err(Error::revert(
                "ERC721: caller is not token owner or approved",
            ));
        }
        token.owner = to;
        Ok(())
    }
}

fn create_token(state: &mut LedgerState, ctx: &Context, uri: &str) -> Result<U256> {
    state.asset_mut(ctx.contract)?.mint(ctx.caller, uri)
}

fn set_approval_for_all(
    state: &mut LedgerState,
    ctx: &Context,
    operator: Address,
    approved: bool,
) -> Result<()> {
    if operator == ctx.caller {
        return Err(Error::revert("ERC721: approve to caller"));
    }
    state
        .asset_mut(ctx.contract)?
        .set_approval_for_all(ctx.caller, operator, approved);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct InMemoryAsset {
    ledger: InMemoryLedger,
    address: Address,
    caller: Address,
}

impl InMemoryAsset {
    pub(super) fn new(ledger: InMemoryLedger, address: Address, caller: Address) -> Self {
        Self {
            ledger,
            address,
            caller,
        }
    }

    /// Lets `operator` move every token of the caller, e.g. to relist a bought token.
    pub async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<()> {
        self.ledger
            .transact(self.caller, self.address, U256::ZERO, |state, ctx| {
                set_approval_for_all(state, ctx, operator, approved)
            })
            .await
    }

    /// Current holder of `token_id`.
    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        self.ledger
            .read(|state| {
                state
                    .asset(self.address)?
                    .token(token_id)
                    .map(|token| token.owner)
                    .ok_or_else(|| Error::not_found(format!("Token {token_id}")))
            })
            .await
    }
}

impl MintableAsset for InMemoryAsset {
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
        self.ledger
            .transact(self.caller, self.address, U256::ZERO, |state, ctx| {
                create_token(state, ctx, metadata_uri)
            })
            .await
    }

    async fn token_uri(&self, token_id: U256) -> Result<String> {
        self.ledger
            .read(|state| {
                state
                    .asset(self.address)?
                    .token(token_id)
                    .map(|token| token.uri.clone())
                    .ok_or_else(|| Error::not_found(format!("Token {token_id}")))
            })
            .await
    }
}
