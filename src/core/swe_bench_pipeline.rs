use crate::core::extract::{classify_entries, extract_entries, find_script_sources};
use crate::core::fetch::resolve_url;
use crate::core::fallback::{self, FallbackDataset};
use crate::core::pipeline::{store_snapshot, unexpected_boards, BoardSettings};
use crate::core::rank::dedup_and_rank;
use crate::core::{PageFetcher, Pipeline, SnapshotStore};
use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardRow, LeaderboardSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// SWE-bench verified and pro boards. The page ships its data inside bundled
/// chunk scripts as `entries:[...]` literals, so every chunk is fetched and
/// scanned until both boards are found.
pub struct SweBenchPipeline {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SnapshotStore>,
    settings: BoardSettings,
}

impl SweBenchPipeline {
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

    async fn scrape(&self) -> Result<(Vec<LeaderboardRow>, Vec<LeaderboardRow>)> {
        let page_url = &self.settings.source;
        let html = self.fetcher.fetch(page_url).await?;
        let sources = find_script_sources(&html);
        tracing::debug!("Found {} chunk scripts on {}", sources.len(), page_url);

        let mut verified = Vec::new();
        let mut pro = Vec::new();

        for src in sources {
            let url = match resolve_url(page_url, &src) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping script {}: {}", src, e);
                    continue;
                }
            };
            let script = match self.fetcher.fetch(&url).await {
                Ok(script) => script,
                Err(e) => {
                    tracing::warn!("Error fetching script {}: {}", url, e);
                    continue;
                }
            };

            for rows in extract_entries(&script) {
                let matched = classify_entries(&rows);
                if matched.verified && verified.is_empty() {
                    verified = rows;
                } else if matched.pro && pro.is_empty() {
                    pro = rows;
                }
            }

            if !verified.is_empty() && !pro.is_empty() {
                break;
            }
        }

        Ok((verified, pro))
    }

    fn datasets(&self) -> (FallbackDataset, FallbackDataset) {
        let mut datasets = self.settings.fallback_datasets().into_iter();
        let verified = datasets.next().unwrap_or_else(fallback::swe_bench_verified);
        let pro = datasets.next().unwrap_or_else(fallback::swe_bench_pro);
        (verified, pro)
    }
}

#[async_trait]
impl Pipeline for SweBenchPipeline {
    fn kind(&self) -> LeaderboardKind {
        LeaderboardKind::SweBench
    }

    async fn extract(&self) -> Result<LeaderboardBoards> {
        let (verified, pro) = match self.scrape().await {
            Ok(boards) => boards,
            Err(e) if e.is_replaceable_by_fallback() => {
                tracing::warn!("⚠️ Error scraping SWE-Bench, continuing with fallback: {}", e);
                (Vec::new(), Vec::new())
            }
            Err(e) => return Err(e),
        };
        Ok(LeaderboardBoards::SweBench { verified, pro })
    }

    async fn transform(&self, raw: LeaderboardBoards) -> Result<LeaderboardBoards> {
        let (verified, pro) = match raw {
            LeaderboardBoards::SweBench { verified, pro } => (verified, pro),
            other => return Err(unexpected_boards(self.kind(), &other)),
        };
        let (verified_fallback, pro_fallback) = self.datasets();

        Ok(LeaderboardBoards::SweBench {
            verified: verified_fallback.apply(dedup_and_rank(verified)),
            pro: pro_fallback.apply(dedup_and_rank(pro)),
        })
    }

    async fn load(&self, boards: LeaderboardBoards) -> Result<LeaderboardSnapshot> {
        store_snapshot(self.store.as_ref(), &self.settings, boards).await
    }
}
