use anyhow::Context;
use clap::Parser;
use domainview::core::scheduler::{run_daily, DailySchedule};
use domainview::utils::{logger, validation::Validate};
use domainview::{AppConfig, RefreshService};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scheduler", about = "Refresh all leaderboards daily")]
struct Args {
    #[arg(long, short = 'c', help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Skip the refresh at startup")]
    no_initial_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_json_logger();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.validate()?;

    let schedule = DailySchedule::parse(&config.scheduler.daily_at)?;
    let service = RefreshService::from_config(&config)?;
    let run_on_startup = config.scheduler.run_on_startup && !args.no_initial_run;

    run_daily(service, schedule, run_on_startup).await;
    Ok(())
}
