use {
    anyhow::Result,
    clap::Parser,
    config::{Args, Backend},
    nftmarket_ledger::{ArtifactStore, InMemoryLedger, Ledger, RpcLedger},
    nftmarket_scenario::{Report, Scenario, ScenarioRegistry, ScenarioRunner},
    tracing_subscriber::EnvFilter,
};

mod config;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let registry = ScenarioRegistry::builtin();
    if args.list {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let scenario = registry.require(&args.scenario)?;
    tracing::info!(backend = ?args.backend, scenario = %scenario.name, "starting");
    let report = match args.backend {
        Backend::Rpc => {
            let artifacts = ArtifactStore::new(&args.artifacts);
            let ledger = RpcLedger::connect(&args.rpc_url, artifacts).await?;
            run(ledger, scenario).await?
        }
        Backend::InMemory => run(InMemoryLedger::default(), scenario).await?,
    };

    println!("{}", render(&report, args.json)?);
    Ok(())
}

async fn run<L: Ledger>(ledger: L, scenario: &Scenario) -> Result<Report> {
    Ok(ScenarioRunner::new(ledger).run(scenario).await?)
}

/// `items: [...]` by default, the whole report with `json`.
fn render(report: &Report, json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(report);
    }
    Ok(format!("items: {}", serde_json::to_string_pretty(&report.items)?))
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::Value};

    async fn royalty_report() -> Report {
        run(InMemoryLedger::default(), &Scenario::royalty())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_output_prints_the_unsold_items() {
        let report = royalty_report().await;

        let output = render(&report, false).unwrap();

        let items = output.strip_prefix("items: ").unwrap();
        let items: Value = serde_json::from_str(items).unwrap();
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["tokenUri"], "https://www.secondNft.com");
    }

    #[tokio::test]
    async fn test_json_output_prints_the_whole_report() {
        let report = royalty_report().await;

        let output = render(&report, true).unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["scenario"], "royalty");
        assert_eq!(value["listingPrice"], "25000000000000000");
        assert_eq!(value["items"][0]["tokenId"], "2");
    }
}
