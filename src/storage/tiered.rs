use crate::core::{LeaderboardSnapshot, SnapshotStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Hosted store in front of a local mirror.
///
/// Reads prefer `primary` and use `secondary` when the primary misses or
/// errors. Writes must succeed on `primary`; the mirror write is best-effort.
pub struct TieredStore {
    primary: Arc<dyn SnapshotStore>,
    secondary: Arc<dyn SnapshotStore>,
}

impl TieredStore {
    pub fn new(primary: Arc<dyn SnapshotStore>, secondary: Arc<dyn SnapshotStore>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl SnapshotStore for TieredStore {
    async fn read(&self, key: &str) -> Result<Option<LeaderboardSnapshot>> {
        match self.primary.read(key).await {
            Ok(Some(snapshot)) => return Ok(Some(snapshot)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Primary store read failed for '{}': {}", key, e),
        }
        self.secondary.read(key).await
    }

    async fn write(&self, key: &str, snapshot: &LeaderboardSnapshot) -> Result<()> {
        self.primary.write(key, snapshot).await?;
        if let Err(e) = self.secondary.write(key, snapshot).await {
            tracing::warn!("Mirror write failed for '{}': {}", key, e);
        }
        Ok(())
    }
}
