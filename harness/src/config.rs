use {
    clap::{Parser, ValueEnum},
    std::path::PathBuf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// A development node reached over JSON-RPC.
    Rpc,
    /// The simulated single-process ledger.
    InMemory,
}

/// Runs a marketplace scenario end to end and prints the listings left for sale.
#[derive(Debug, Parser)]
#[command(name = "nft-harness", version)]
pub struct Args {
    #[arg(long, value_enum, env = "HARNESS_BACKEND", default_value_t = Backend::Rpc)]
    pub backend: Backend,
    #[arg(long, env = "HARNESS_RPC_URL", default_value = "http://localhost:8545")]
    pub rpc_url: String,
    /// Build output directory searched for compiled contract artifacts.
    #[arg(long, env = "HARNESS_ARTIFACTS", default_value = "artifacts")]
    pub artifacts: PathBuf,
    #[arg(long, default_value = "royalty")]
    pub scenario: String,
    /// Print the registered scenarios and exit.
    #[arg(long)]
    pub list: bool,
    /// Print the whole report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("rpc", Backend::Rpc)]
    #[test_case("in-memory", Backend::InMemory)]
    fn test_backend_is_parsed_from_its_kebab_case_name(name: &str, expected: Backend) {
        let args = Args::try_parse_from(["nft-harness", "--backend", name]).unwrap();

        assert_eq!(args.backend, expected);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Args::try_parse_from(["nft-harness", "--backend", "mainnet"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_scenario_and_output() {
        let args = Args::try_parse_from([
            "nft-harness",
            "--scenario",
            "royalty-balances",
            "--artifacts",
            "out",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.scenario, "royalty-balances");
        assert_eq!(args.artifacts, PathBuf::from("out"));
        assert!(args.json);
        assert!(!args.list);
    }
}
