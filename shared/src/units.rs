//! Conversion between human-readable decimal amounts and the ledger's smallest unit.
//!
//! Every unit name maps to a fixed decimal exponent (`wei` = 0, `gwei` = 9, `ether` = 18).
//! Scenario prices are written as decimal strings such as `"100"` and scaled with
//! [`parse_amount`] before they reach a contract call.

use {
    crate::primitives::U256,
    alloy::primitives::utils::{ParseUnits, UnitsError, format_units, parse_units},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("{0}")]
    Units(#[from] UnitsError),
    #[error("amount {0} is negative")]
    Negative(String),
}

/// Scales `value`, a decimal string expressed in `unit`, to the ledger's base unit.
pub fn parse_amount(value: &str, unit: &str) -> Result<U256, AmountError> {
    match parse_units(value, unit)? {
        ParseUnits::U256(amount) => Ok(amount),
        ParseUnits::I256(_) => Err(AmountError::Negative(value.to_owned())),
    }
}

/// Inverse of [`parse_amount`]. The result always carries the full number of decimals.
pub fn format_amount(amount: U256, unit: &str) -> Result<String, AmountError> {
    Ok(format_units(amount, unit)?)
}

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("100", "ether", U256::from(100_000_000_000_000_000_000_u128); "whole ether")]
    #[test_case("0.025", "ether", U256::from(25_000_000_000_000_000_u128); "fractional ether")]
    #[test_case("1", "gwei", U256::from(1_000_000_000_u64); "gwei")]
    #[test_case("7", "wei", U256::from(7); "wei")]
    fn test_parse_amount_scales_by_unit_exponent(value: &str, unit: &str, expected: U256) {
        let actual = parse_amount(value, unit).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parse_amount_rejects_unknown_unit() {
        let err = parse_amount("1", "doubloon").unwrap_err();

        assert!(matches!(err, AmountError::Units(_)));
    }

    #[test]
    fn test_parse_amount_rejects_negative_value() {
        let err = parse_amount("-1", "ether").unwrap_err();

        assert!(matches!(err, AmountError::Negative(v) if v == "-1"));
    }

    #[test]
    fn test_format_amount_inverts_parse_amount() {
        let amount = parse_amount("100", "ether").unwrap();
        let formatted = format_amount(amount, "ether").unwrap();

        assert_eq!(parse_amount(&formatted, "ether").unwrap(), amount);
        assert!(formatted.starts_with("100."));
    }
}
