pub use alloy::primitives::{Address, Bytes, U256};

/// Rendering of ledger values in the flat string form used by scenario reports.
pub trait ToDisplayString {
    fn to_display_string(&self) -> String;
}

impl ToDisplayString for U256 {
    fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl ToDisplayString for Address {
    fn to_display_string(&self) -> String {
        self.to_checksum(None)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn test_address_display_string_is_checksummed() {
        let address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

        assert_eq!(
            address.to_display_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_u256_display_string_is_decimal() {
        let amount = U256::from(100_000_000_000_000_000_000_u128);

        assert_eq!(amount.to_display_string(), "100000000000000000000");
    }
}

