use crate::core::{LeaderboardSnapshot, SnapshotStore};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per leaderboard under a base directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
    file_names: HashMap<String, String>,
}

impl JsonFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            file_names: HashMap::new(),
        }
    }

    /// Stores `key` under `file_name` instead of `<key>.json`.
    pub fn with_file_name(mut self, key: impl Into<String>, file_name: impl Into<String>) -> Self {
        self.file_names.insert(key.into(), file_name.into());
        self
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        match self.file_names.get(key) {
            Some(name) => self.base_path.join(name),
            None => self.base_path.join(format!("{}.json", key)),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<LeaderboardSnapshot>> {
        let path = self.path_for(key);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(EtlError::store(format!(
                    "reading {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    async fn write(&self, key: &str, snapshot: &LeaderboardSnapshot) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                EtlError::store(format!("creating {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| EtlError::store(format!("writing {}: {}", path.display(), e)))?;
        tracing::debug!("Snapshot saved to {}", path.display());
        Ok(())
    }
}
