use clap::Parser;
use domainview::core::scheduler::{first_failure_code, summarize};
use domainview::utils::{logger, validation::Validate};
use domainview::{CliConfig, RefreshService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting domainview refresh");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let config = match cli.to_app_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let service = RefreshService::from_config(&config)?;
    let mut kinds = cli.selected_kinds()?;
    if kinds.is_empty() {
        kinds = service.kinds();
    }

    let mut results = Vec::with_capacity(kinds.len());
    for kind in kinds {
        results.push((kind, service.refresh(kind).await));
    }

    let (ok, failed) = summarize(&results);
    tracing::info!("Refresh finished: {} ok, {} failed", ok, failed);

    if let Some(code) = first_failure_code(&results) {
        std::process::exit(code);
    }

    Ok(())
}
