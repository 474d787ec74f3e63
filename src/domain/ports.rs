use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fetches one page or script body over HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Persists the latest snapshot per leaderboard key. Writes replace.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<LeaderboardSnapshot>>;
    async fn write(&self, key: &str, snapshot: &LeaderboardSnapshot) -> Result<()>;
}

/// A schema-less document together with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Hosted per-document persistence, addressed by collection and id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;
    async fn put(&self, collection: &str, id: &str, data: &Value) -> Result<()>;
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

/// One refresh cycle: fetch and extract raw rows, rank and validate them, store the snapshot.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn kind(&self) -> LeaderboardKind;
    async fn extract(&self) -> Result<LeaderboardBoards>;
    async fn transform(&self, raw: LeaderboardBoards) -> Result<LeaderboardBoards>;
    async fn load(&self, boards: LeaderboardBoards) -> Result<LeaderboardSnapshot>;
}

#[async_trait]
impl<P: Pipeline + ?Sized> Pipeline for Box<P> {
    fn kind(&self) -> LeaderboardKind {
        (**self).kind()
    }

    async fn extract(&self) -> Result<LeaderboardBoards> {
        (**self).extract().await
    }

    async fn transform(&self, raw: LeaderboardBoards) -> Result<LeaderboardBoards> {
        (**self).transform(raw).await
    }

    async fn load(&self, boards: LeaderboardBoards) -> Result<LeaderboardSnapshot> {
        (**self).load(boards).await
    }
}
