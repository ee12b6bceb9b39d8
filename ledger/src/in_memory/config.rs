use nftmarket_shared::primitives::U256;

/// 10 000 ether per development account.
const DEFAULT_INITIAL_BALANCE: U256 = U256::from_limbs([0x19e0c9bab2400000, 0x21e, 0, 0]);
/// 0.025 ether.
const DEFAULT_LISTING_PRICE: U256 = U256::from_limbs([25_000_000_000_000_000, 0, 0, 0]);
const DEFAULT_ACCOUNTS: usize = 20;
const DEFAULT_ROYALTY_BASIS_POINTS: u16 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryConfig {
    /// Number of funded development accounts.
    pub accounts: usize,
    pub initial_balance: U256,
    /// Fee every marketplace deployed on this ledger charges for a new listing.
    pub listing_price: U256,
    /// Share of a resale paid to the token creator, in basis points. First sales by the creator
    /// pay no royalty.
    pub royalty_basis_points: u16,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            accounts: DEFAULT_ACCOUNTS,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            listing_price: DEFAULT_LISTING_PRICE,
            royalty_basis_points: DEFAULT_ROYALTY_BASIS_POINTS,
        }
    }
}
