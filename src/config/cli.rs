use crate::config::AppConfig;
use crate::domain::model::LeaderboardKind;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "domainview")]
#[command(about = "Refresh the AI model leaderboards shown on the domain dashboard")]
pub struct CliConfig {
    /// Boards to refresh (arena, performance, swe-bench). Empty means all enabled boards.
    #[arg(long, value_delimiter = ',')]
    pub leaderboards: Vec<String>,

    /// Directory for the JSON snapshot files. Overrides `storage.data_dir`.
    #[arg(long)]
    pub output_path: Option<String>,

    /// Hosted document store base URL. Overrides `storage.document_store_url`.
    #[arg(long)]
    pub store_url: Option<String>,

    #[arg(long, short = 'c', help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file (if any) and lays the command-line flags over it.
    pub fn to_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.storage.data_dir = output_path.clone();
        }
        if let Some(store_url) = &self.store_url {
            config.storage.document_store_url = Some(store_url.clone());
        }
        if self.timeout_seconds.is_some() {
            config.fetch.timeout_seconds = self.timeout_seconds;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn selected_kinds(&self) -> Result<Vec<LeaderboardKind>> {
        self.leaderboards
            .iter()
            .map(|name| name.parse::<LeaderboardKind>())
            .collect()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        if let Some(store_url) = &self.store_url {
            validation::validate_url("store_url", store_url)?;
        }
        self.selected_kinds()?;
        Ok(())
    }
}
