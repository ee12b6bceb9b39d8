use {
    crate::{Error, Result},
    nftmarket_shared::primitives::U256,
    std::collections::BTreeMap,
};

/// Checks applied to the ledger state once a scenario has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    /// Token ids of the listings still for sale, in item order. `None` skips the check.
    pub unsold_token_ids: Option<Vec<U256>>,
    /// Metadata URI each token must resolve to.
    pub token_uris: BTreeMap<U256, String>,
}

impl Expectations {
    pub fn check_unsold(&self, actual: &[U256]) -> Result<()> {
        match &self.unsold_token_ids {
            Some(expected) if expected != actual => Err(Error::ExpectationFailed(format!(
                "unsold tokens are {actual:?}, expected {expected:?}"
            ))),
            _ => Ok(()),
        }
    }

    pub fn check_token_uri(token_id: U256, expected: &str, actual: &str) -> Result<()> {
        if expected == actual {
            return Ok(());
        }
        Err(Error::ExpectationFailed(format!(
            "token {token_id} resolves to {actual:?}, expected {expected:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    fn ids(ids: &[u64]) -> Vec<U256> {
        ids.iter().copied().map(U256::from).collect()
    }

    #[test_case(None, &[1, 2], true; "unchecked")]
    #[test_case(Some(vec![2]), &[2], true; "matching")]
    #[test_case(Some(vec![2]), &[1, 2], false; "extra listing")]
    #[test_case(Some(vec![1, 2]), &[2, 1], false; "wrong order")]
    #[test_case(Some(vec![]), &[], true; "nothing left")]
    fn test_check_unsold(expected: Option<Vec<u64>>, actual: &[u64], passes: bool) {
        let expectations = Expectations {
            unsold_token_ids: expected.map(|e| ids(&e)),
            ..Default::default()
        };

        let result = expectations.check_unsold(&ids(actual));

        assert_eq!(result.is_ok(), passes);
    }

    #[test]
    fn test_token_uri_mismatch_names_the_token() {
        let err = Expectations::check_token_uri(U256::from(1), "a", "b").unwrap_err();

        assert!(matches!(err, Error::ExpectationFailed(msg) if msg.contains("token 1")));
    }
}
