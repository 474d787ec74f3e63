use crate::core::pipeline::BoardSettings;
use crate::domain::model::LeaderboardKind;
use crate::storage::{HttpDocumentStore, JsonFileStore, LEADERBOARDS_COLLECTION};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// File-based configuration shared by the CLI, the server and the scheduler.
/// Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub fetch: FetchConfig,
    pub scheduler: SchedulerConfig,
    pub leaderboards: Vec<LeaderboardConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory of the local JSON snapshot files.
    pub data_dir: String,
    /// Base URL of the hosted document store. Unset means files only.
    pub document_store_url: Option<String>,
    pub document_store_token: Option<String>,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./public".to_string(),
            document_store_url: None,
            document_store_token: None,
            collection: LEADERBOARDS_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Local wall-clock time, `HH:MM`.
    pub daily_at: String,
    pub run_on_startup: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            daily_at: "03:00".to_string(),
            run_on_startup: true,
        }
    }
}

/// Per-board override. Boards without an entry run with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    pub kind: LeaderboardKind,
    pub source: Option<String>,
    pub min_rows: Option<usize>,
    pub file_name: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| EtlError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }

    fn board_override(&self, kind: LeaderboardKind) -> Option<&LeaderboardConfig> {
        self.leaderboards.iter().find(|board| board.kind == kind)
    }

    /// Settings of every enabled board, in `LeaderboardKind::ALL` order.
    pub fn board_settings(&self) -> Vec<BoardSettings> {
        LeaderboardKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let mut settings = BoardSettings::defaults(kind);
                if let Some(board) = self.board_override(kind) {
                    if !board.enabled {
                        return None;
                    }
                    if let Some(source) = &board.source {
                        settings.source = source.clone();
                    }
                    settings.min_rows = board.min_rows;
                }
                Some(settings)
            })
            .collect()
    }

    /// Local snapshot files. Arena keeps the `data.json` name the dashboard reads.
    pub fn file_store(&self) -> JsonFileStore {
        let mut store = JsonFileStore::new(&self.storage.data_dir)
            .with_file_name(LeaderboardKind::Arena.key(), "data.json");
        for board in &self.leaderboards {
            if let Some(name) = &board.file_name {
                store = store.with_file_name(board.kind.key(), name.clone());
            }
        }
        store
    }

    pub fn document_store(&self) -> Result<Option<HttpDocumentStore>> {
        match &self.storage.document_store_url {
            Some(url) => Ok(Some(HttpDocumentStore::new(
                url,
                self.storage.document_store_token.clone(),
            )?)),
            None => Ok(None),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_non_empty_string("storage.collection", &self.storage.collection)?;

        if let Some(url) = &self.storage.document_store_url {
            validation::validate_url("storage.document_store_url", url)?;
        }

        if let Some(timeout) = self.fetch.timeout_seconds {
            validation::validate_positive_number("fetch.timeout_seconds", timeout as usize, 1)?;
        }

        validation::parse_daily_time("scheduler.daily_at", &self.scheduler.daily_at)?;

        for (i, board) in self.leaderboards.iter().enumerate() {
            if let Some(source) = &board.source {
                validation::validate_url(&format!("leaderboards[{}].source", i), source)?;
            }
            if let Some(name) = &board.file_name {
                validation::validate_path(&format!("leaderboards[{}].file_name", i), name)?;
            }
            if self.leaderboards[..i].iter().any(|b| b.kind == board.kind) {
                return Err(EtlError::InvalidConfigValueError {
                    field: format!("leaderboards[{}].kind", i),
                    value: board.kind.to_string(),
                    reason: "Board configured more than once".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scheduler.daily_at, "03:00");
        assert!(config.scheduler.run_on_startup);
        assert_eq!(config.board_settings().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 8080

[storage]
data_dir = "/var/lib/domainview"
document_store_url = "https://docs.example.com/v1"
collection = "boards"

[fetch]
timeout_seconds = 20

[scheduler]
daily_at = "04:30"
run_on_startup = false

[[leaderboards]]
kind = "swe-bench"
min_rows = 5

[[leaderboards]]
kind = "arena"
enabled = false
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.fetch.timeout_seconds, Some(20));
        assert!(!config.scheduler.run_on_startup);

        let settings = config.board_settings();
        let kinds: Vec<_> = settings.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![LeaderboardKind::Performance, LeaderboardKind::SweBench]);
        assert_eq!(settings[1].min_rows, Some(5));
        assert_eq!(settings[1].source, LeaderboardKind::SweBench.default_source());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOMAINVIEW_TEST_TOKEN", "s3cret");
        let config = AppConfig::from_toml_str(
            r#"
[storage]
document_store_token = "${DOMAINVIEW_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.document_store_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let config = AppConfig::from_toml_str(
            r#"
[storage]
data_dir = "${DOMAINVIEW_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, "${DOMAINVIEW_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 4000").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.scheduler.daily_at = "25:00".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.document_store_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[[leaderboards]]
kind = "arena"

[[leaderboards]]
kind = "arena"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_store_names() {
        let config = AppConfig::from_toml_str(
            r#"
[storage]
data_dir = "out"

[[leaderboards]]
kind = "performance"
file_name = "perf.json"
"#,
        )
        .unwrap();
        let store = config.file_store();
        assert_eq!(store.path_for("arena"), Path::new("out").join("data.json"));
        assert_eq!(store.path_for("performance"), Path::new("out").join("perf.json"));
        assert_eq!(store.path_for("swe-bench"), Path::new("out").join("swe-bench.json"));
    }

    #[test]
    fn test_document_store_only_when_configured() {
        assert!(AppConfig::default().document_store().unwrap().is_none());

        let mut config = AppConfig::default();
        config.storage.document_store_url = Some("https://docs.example.com".to_string());
        assert!(config.document_store().unwrap().is_some());
    }
}
