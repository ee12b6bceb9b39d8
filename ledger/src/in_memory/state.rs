use {
    super::{asset::AssetProgram, market::MarketProgram},
    crate::{Error, Result},
    nftmarket_shared::primitives::{Address, U256},
    std::collections::HashMap,
};

/// A program instance deployed at some address of the in-memory ledger.
#[derive(Debug, Clone)]
pub(super) enum Program {
    Marketplace(MarketProgram),
    Asset(AssetProgram),
}

/// The environment of one executing transaction.
#[derive(Debug, Clone, Copy)]
pub(super) struct Context {
    pub caller: Address,
    /// The program receiving the call.
    pub contract: Address,
    /// Value attached to the call, already credited to `contract`.
    pub value: U256,
}

#[derive(Debug, Clone, Default)]
pub(super) struct LedgerState {
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    programs: HashMap<Address, Program>,
}

impl LedgerState {
    pub fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    pub fn credit(&mut self, address: Address, amount: U256) {
        let balance = self.balances.entry(address).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or_else(|| Error::revert(format!("{from} has insufficient funds")))?;
        self.balances.insert(from, remaining);
        self.credit(to, amount);
        Ok(())
    }

    /// Returns the current nonce of `address` and increments it.
    pub fn use_nonce(&mut self, address: Address) -> u64 {
        let nonce = self.nonces.entry(address).or_default();
        let current = *nonce;
        *nonce += 1;
        current
    }

    pub fn install(&mut self, address: Address, program: Program) {
        self.programs.insert(address, program);
    }

    pub fn marketplace(&self, address: Address) -> Result<&MarketProgram> {
        match self.programs.get(&address) {
            Some(Program::Marketplace(market)) => Ok(market),
            _ => Err(Error::not_found(format!("Marketplace at {address}"))),
        }
    }

    pub fn marketplace_mut(&mut self, address: Address) -> Result<&mut MarketProgram> {
        match self.programs.get_mut(&address) {
            Some(Program::Marketplace(market)) => Ok(market),
            _ => Err(Error::not_found(format!("Marketplace at {address}"))),
        }
    }

    pub fn asset(&self, address: Address) -> Result<&AssetProgram> {
        match self.programs.get(&address) {
            Some(Program::Asset(asset)) => Ok(asset),
            _ => Err(Error::not_found(format!("Asset contract at {address}"))),
        }
    }

    pub fn asset_mut(&mut self, address: Address) -> Result<&mut AssetProgram> {
        match self.programs.get_mut(&address) {
            Some(Program::Asset(asset)) => Ok(asset),
            _ => Err(Error::not_found(format!("Asset contract at {address}"))),
        }
    }
}
