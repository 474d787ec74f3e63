use clap::Parser;
use domainview::dashboard::backup::write_backup;
use domainview::utils::logger;
use domainview::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "backup", about = "Export dashboard collections to a dated JSON file")]
struct Args {
    #[arg(long, short = 'c', help = "TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory for the backup file")]
    output_dir: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

async fn run(args: &Args) -> anyhow::Result<PathBuf> {
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    let store = config
        .document_store()?
        .ok_or_else(|| anyhow::anyhow!("storage.document_store_url is not configured"))?;

    let today = chrono::Local::now().date_naive();
    Ok(write_backup(&store, &args.output_dir, today).await?)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match run(&args).await {
        Ok(path) => {
            tracing::info!("✅ Backup completed successfully! Saved to: {}", path.display());
        }
        Err(e) => {
            tracing::error!("❌ Backup failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
