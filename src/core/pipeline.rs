use crate::core::fallback::{self, FallbackDataset};
use crate::core::SnapshotStore;
use crate::domain::model::{LeaderboardBoards, LeaderboardKind, LeaderboardRow, LeaderboardSnapshot};
use crate::utils::error::{EtlError, Result};

/// Resolved per-board settings a pipeline runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    pub kind: LeaderboardKind,
    pub source: String,
    pub store_key: String,
    /// Overrides the minimum row count of every fallback dataset of the board
    /// (or, for arena, the minimum before a refresh counts as failed).
    pub min_rows: Option<usize>,
}

impl BoardSettings {
    pub fn defaults(kind: LeaderboardKind) -> Self {
        Self {
            kind,
            source: kind.default_source().to_string(),
            store_key: kind.key().to_string(),
            min_rows: None,
        }
    }

    pub fn fallback_datasets(&self) -> Vec<FallbackDataset> {
        fallback::datasets_for(self.kind)
            .into_iter()
            .map(|dataset| match self.min_rows {
                Some(min) => dataset.with_min_rows(min),
                None => dataset,
            })
            .collect()
    }

    /// Snapshot made only of fallback data, for boards that have it.
    pub fn seeded_snapshot(&self) -> Option<LeaderboardSnapshot> {
        let mut datasets = self.fallback_datasets().into_iter().map(|d| d.rows);
        let boards = match self.kind {
            LeaderboardKind::Arena => return None,
            LeaderboardKind::Performance => LeaderboardBoards::Performance {
                models: datasets.next().unwrap_or_default(),
            },
            LeaderboardKind::SweBench => LeaderboardBoards::SweBench {
                verified: datasets.next().unwrap_or_default(),
                pro: datasets.next().unwrap_or_default(),
            },
        };
        Some(LeaderboardSnapshot::new(self.source.clone(), boards))
    }
}

pub(crate) fn unexpected_boards(expected: LeaderboardKind, got: &LeaderboardBoards) -> EtlError {
    EtlError::parse(format!(
        "{} pipeline received {} rows",
        expected,
        got.kind()
    ))
}

/// Returns the rows of a single-list board of the expected kind.
pub(crate) fn single_board(kind: LeaderboardKind, boards: LeaderboardBoards) -> Result<Vec<LeaderboardRow>> {
    match (kind, boards) {
        (LeaderboardKind::Arena, LeaderboardBoards::Arena { leaderboard }) => Ok(leaderboard),
        (LeaderboardKind::Performance, LeaderboardBoards::Performance { models }) => Ok(models),
        (kind, other) => Err(unexpected_boards(kind, &other)),
    }
}

/// Wraps `boards` into a fresh snapshot and writes it under the board's key.
pub(crate) async fn store_snapshot(
    store: &dyn SnapshotStore,
    settings: &BoardSettings,
    boards: LeaderboardBoards,
) -> Result<LeaderboardSnapshot> {
    let snapshot = LeaderboardSnapshot::new(settings.source.clone(), boards);
    tracing::debug!(
        "Writing {} snapshot ({} rows) under key '{}'",
        settings.kind,
        snapshot.boards.row_count(),
        settings.store_key
    );
    store.write(&settings.store_key, &snapshot).await?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_snapshot_uses_fallback_rows() {
        let snapshot = BoardSettings::defaults(LeaderboardKind::SweBench)
            .seeded_snapshot()
            .unwrap();
        match snapshot.boards {
            LeaderboardBoards::SweBench { verified, pro } => {
                assert_eq!(verified, fallback::swe_bench_verified().rows);
                assert_eq!(pro, fallback::swe_bench_pro().rows);
            }
            other => panic!("unexpected boards: {:?}", other),
        }
        assert_eq!(snapshot.source, LeaderboardKind::SweBench.default_source());
    }

    #[test]
    fn test_arena_has_no_seed() {
        assert!(BoardSettings::defaults(LeaderboardKind::Arena)
            .seeded_snapshot()
            .is_none());
    }

    #[test]
    fn test_min_rows_override_applies_to_every_dataset() {
        let settings = BoardSettings {
            min_rows: Some(5),
            ..BoardSettings::defaults(LeaderboardKind::SweBench)
        };
        assert!(settings.fallback_datasets().iter().all(|d| d.min_rows == 5));
    }
}
