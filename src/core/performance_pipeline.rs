use crate::core::extract::extract_performance_rows;
use crate::core::fallback;
use crate::core::pipeline::{single_board, store_snapshot, BoardSettings};
use crate::core::rank::dedup_and_rank;
use crate::core::{PageFetcher, Pipeline, SnapshotStore};
use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Model performance board. The upstream page is mostly client rendered, so
/// in practice this usually lands on the checked-in dataset.
pub struct PerformancePipeline {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SnapshotStore>,
    settings: BoardSettings,
}

impl PerformancePipeline {
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
impl Pipeline for PerformancePipeline {
    fn kind(&self) -> LeaderboardKind {
        LeaderboardKind::Performance
    }

    async fn extract(&self) -> Result<LeaderboardBoards> {
        let models = match self.fetcher.fetch(&self.settings.source).await {
            Ok(html) => extract_performance_rows(&html),
            Err(e) if e.is_replaceable_by_fallback() => {
                tracing::warn!("⚠️ Performance page fetch failed, continuing with fallback: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(LeaderboardBoards::Performance { models })
    }

    async fn transform(&self, raw: LeaderboardBoards) -> Result<LeaderboardBoards> {
        let ranked = dedup_and_rank(single_board(self.kind(), raw)?);
        let dataset = self
            .settings
            .fallback_datasets()
            .into_iter()
            .next()
            .unwrap_or_else(fallback::performance);
        Ok(LeaderboardBoards::Performance {
            models: dataset.apply(ranked),
        })
    }

    async fn load(&self, boards: LeaderboardBoards) -> Result<LeaderboardSnapshot> {
        store_snapshot(self.store.as_ref(), &self.settings, boards).await
    }
}
