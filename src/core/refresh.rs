use crate::config::toml_config::AppConfig;
use crate::core::arena_pipeline::ArenaPipeline;
use crate::core::etl::EtlEngine;
use crate::core::fetch::HttpFetcher;
use crate::core::performance_pipeline::PerformancePipeline;
use crate::core::pipeline::BoardSettings;
use crate::core::swe_bench_pipeline::SweBenchPipeline;
use crate::core::{PageFetcher, Pipeline, SnapshotStore};
use crate::domain::model::{LeaderboardKind, LeaderboardSnapshot};
use crate::storage;
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Entry point for reading and refreshing leaderboards.
///
/// Holds the shared fetcher and store handles explicitly; build one at
/// startup and clone it into whatever needs it (handlers, scheduler, CLI).
#[derive(Clone)]
pub struct RefreshService {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SnapshotStore>,
    boards: BTreeMap<LeaderboardKind, BoardSettings>,
    seed_missing: bool,
}

impl RefreshService {
    /// All boards with default settings, no seeding.
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            fetcher,
            store,
            boards: LeaderboardKind::ALL
                .into_iter()
                .map(|kind| (kind, BoardSettings::defaults(kind)))
                .collect(),
            seed_missing: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = HttpFetcher::with_timeout(config.fetch.timeout_seconds.map(Duration::from_secs))?;
        let (store, hosted) = storage::build_snapshot_store(config)?;

        let mut service = Self::new(Arc::new(fetcher), store).with_seeding(hosted);
        service.boards = config
            .board_settings()
            .into_iter()
            .map(|settings| (settings.kind, settings))
            .collect();
        Ok(service)
    }

    /// Replaces the settings of one board (enabling it if it was not).
    pub fn with_board(mut self, settings: BoardSettings) -> Self {
        self.boards.insert(settings.kind, settings);
        self
    }

    /// When on, reading a board that has never been stored seeds it with fallback data.
    pub fn with_seeding(mut self, seed_missing: bool) -> Self {
        self.seed_missing = seed_missing;
        self
    }

    pub fn kinds(&self) -> Vec<LeaderboardKind> {
        self.boards.keys().copied().collect()
    }

    pub fn settings(&self, kind: LeaderboardKind) -> Result<&BoardSettings> {
        self.boards
            .get(&kind)
            .ok_or_else(|| EtlError::UnknownLeaderboard(kind.key().to_string()))
    }

    pub fn pipeline(&self, kind: LeaderboardKind) -> Result<Box<dyn Pipeline>> {
        let settings = self.settings(kind)?.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let store = Arc::clone(&self.store);
        let pipeline: Box<dyn Pipeline> = match kind {
            LeaderboardKind::Arena => Box::new(ArenaPipeline::new(fetcher, store, settings)),
            LeaderboardKind::Performance => {
                Box::new(PerformancePipeline::new(fetcher, store, settings))
            }
            LeaderboardKind::SweBench => Box::new(SweBenchPipeline::new(fetcher, store, settings)),
        };
        Ok(pipeline)
    }

    /// Runs one fetch → extract → fallback → store cycle.
    pub async fn refresh(&self, kind: LeaderboardKind) -> Result<LeaderboardSnapshot> {
        EtlEngine::new(self.pipeline(kind)?).run().await
    }

    /// Latest stored snapshot. With seeding on, a board that has fallback data
    /// and nothing stored yet is answered with (and written as) the fallback.
    pub async fn latest(&self, kind: LeaderboardKind) -> Result<Option<LeaderboardSnapshot>> {
        let settings = self.settings(kind)?;
        if let Some(snapshot) = self.store.read(&settings.store_key).await? {
            return Ok(Some(snapshot));
        }
        if !self.seed_missing {
            return Ok(None);
        }

        let Some(seeded) = settings.seeded_snapshot() else {
            return Ok(None);
        };
        tracing::info!("Seeding empty {} board with fallback data", kind);
        if let Err(e) = self.store.write(&settings.store_key, &seeded).await {
            tracing::warn!("Error saving seeded {} snapshot: {}", kind, e);
        }
        Ok(Some(seeded))
    }

    /// Refreshes every enabled board in turn. One failure does not stop the rest.
    pub async fn refresh_all(&self) -> Vec<(LeaderboardKind, Result<LeaderboardSnapshot>)> {
        let mut results = Vec::new();
        for kind in self.kinds() {
            let result = self.refresh(kind).await;
            if let Err(e) = &result {
                tracing::error!("❌ {} refresh failed: {}", kind, e);
            }
            results.push((kind, result));
        }
        results
    }
}
