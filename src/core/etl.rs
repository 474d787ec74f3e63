use crate::core::Pipeline;
use crate::domain::model::LeaderboardSnapshot;
use crate::utils::error::Result;
use tracing::Instrument;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LeaderboardSnapshot> {
        let kind = self.pipeline.kind();
        let span = tracing::info_span!("refresh", board = %kind);

        async {
            tracing::info!("🚀 Refreshing {} leaderboard", kind);

            let raw = self.pipeline.extract().await?;
            tracing::info!("Extracted {} rows", raw.row_count());

            let boards = self.pipeline.transform(raw).await?;
            tracing::info!("Ranked {} rows", boards.row_count());

            let snapshot = self.pipeline.load(boards).await?;
            tracing::info!(
                "✅ {} snapshot stored ({} rows, updated {})",
                kind,
                snapshot.boards.row_count(),
                snapshot.updated_at.to_rfc3339()
            );

            Ok(snapshot)
        }
        .instrument(span)
        .await
    }
}
