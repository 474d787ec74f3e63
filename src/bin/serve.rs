use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use domainview::api::{self, AppState};
use domainview::utils::{logger, validation::Validate};
use domainview::{AppConfig, RefreshService};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "serve", about = "Serve the leaderboard API")]
struct Args {
    #[arg(long, short = 'c', help = "TOML configuration file")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_json_logger();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.validate()?;

    let state = web::Data::new(AppState::new(RefreshService::from_config(&config)?));
    let (host, port) = config.bind_address();
    tracing::info!("🚀 Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("binding {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
