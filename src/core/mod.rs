pub mod arena_pipeline;
pub mod etl;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod performance_pipeline;
pub mod pipeline;
pub mod rank;
pub mod refresh;
pub mod scheduler;
pub mod swe_bench_pipeline;

pub use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardRow, LeaderboardSnapshot};
pub use crate::domain::ports::{Document, DocumentStore, PageFetcher, Pipeline, SnapshotStore};
pub use crate::utils::error::Result;
