use crate::core::{DocumentStore, LeaderboardSnapshot, SnapshotStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub const LEADERBOARDS_COLLECTION: &str = "leaderboards";

/// Snapshots as documents, one per leaderboard key, in a single collection.
/// The document body is the same JSON as the file format.
pub struct DocumentSnapshotStore {
    documents: Arc<dyn DocumentStore>,
    collection: String,
}

impl DocumentSnapshotStore {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(documents, LEADERBOARDS_COLLECTION)
    }

    pub fn with_collection(documents: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            documents,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl SnapshotStore for DocumentSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<LeaderboardSnapshot>> {
        match self.documents.get(&self.collection, key).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, key: &str, snapshot: &LeaderboardSnapshot) -> Result<()> {
        let doc = serde_json::to_value(snapshot)?;
        self.documents.put(&self.collection, key, &doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LeaderboardBoards, LeaderboardRow};
    use crate::storage::MemoryDocumentStore;

    #[tokio::test]
    async fn test_round_trip_through_documents() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let store = DocumentSnapshotStore::new(documents.clone());
        let snapshot = LeaderboardSnapshot::new(
            "https://www.marc0.dev/en/leaderboard",
            LeaderboardBoards::SweBench {
                verified: vec![LeaderboardRow::new(1, "X", 80.9, "Other")],
                pro: vec![LeaderboardRow::new(1, "Y", 40.0, "Other")],
            },
        );

        assert!(store.read("swe-bench").await.unwrap().is_none());
        store.write("swe-bench", &snapshot).await.unwrap();
        assert_eq!(store.read("swe-bench").await.unwrap(), Some(snapshot));

        let raw = documents
            .get(LEADERBOARDS_COLLECTION, "swe-bench")
            .await
            .unwrap()
            .unwrap();
        assert!(raw.get("verified").is_some());
        assert!(raw.get("updatedAt").is_some());
    }
}
