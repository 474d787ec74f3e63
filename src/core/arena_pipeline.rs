use crate::core::extract::extract_table_rows;
use crate::core::pipeline::{single_board, store_snapshot, BoardSettings};
use crate::core::rank::dedup_by_model;
use crate::core::{PageFetcher, Pipeline, SnapshotStore};
use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardSnapshot};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Scrapes the arena code leaderboard table. There is no fallback dataset:
/// an empty scrape fails the refresh and leaves the stored snapshot untouched.
pub struct ArenaPipeline {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SnapshotStore>,
    settings: BoardSettings,
}

impl ArenaPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn SnapshotStore>,
        settings: BoardSettings,
    ) -> Self {
        Self {
            fetcher,
            store,
            settings,
        }
    }
}

#[async_trait]
impl Pipeline for ArenaPipeline {
    fn kind(&self) -> LeaderboardKind {
        LeaderboardKind::Arena
    }

    async fn extract(&self) -> Result<LeaderboardBoards> {
        let html = self.fetcher.fetch(&self.settings.source).await?;
        let leaderboard = extract_table_rows(&html);
        tracing::debug!("Arena table yielded {} rows", leaderboard.len());
        Ok(LeaderboardBoards::Arena { leaderboard })
    }

    async fn transform(&self, raw: LeaderboardBoards) -> Result<LeaderboardBoards> {
        // Upstream ranks carry a confidence spread, so they are kept as published.
        let leaderboard = dedup_by_model(single_board(self.kind(), raw)?);
        let min_rows = self.settings.min_rows.unwrap_or(1);
        if leaderboard.len() < min_rows {
            return Err(EtlError::parse(format!(
                "arena table yielded {} rows, need {}",
                leaderboard.len(),
                min_rows
            )));
        }
        Ok(LeaderboardBoards::Arena { leaderboard })
    }

    async fn load(&self, boards: LeaderboardBoards) -> Result<LeaderboardSnapshot> {
        store_snapshot(self.store.as_ref(), &self.settings, boards).await
    }
}
