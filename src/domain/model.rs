use crate::utils::error::EtlError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The scraped leaderboards the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardKind {
    Arena,
    Performance,
    SweBench,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 3] = [Self::Arena, Self::Performance, Self::SweBench];

    /// Store key and URL path segment.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Arena => "arena",
            Self::Performance => "performance",
            Self::SweBench => "swe-bench",
        }
    }

    pub fn default_source(&self) -> &'static str {
        match self {
            Self::Arena => "https://arena.ai/ar/leaderboard/code",
            Self::Performance => "https://artificialanalysis.ai/leaderboards/models",
            Self::SweBench => "https://www.marc0.dev/en/leaderboard",
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LeaderboardKind {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arena" => Ok(Self::Arena),
            "performance" => Ok(Self::Performance),
            "swe-bench" | "swe_bench" | "swebench" => Ok(Self::SweBench),
            other => Err(EtlError::UnknownLeaderboard(other.to_string())),
        }
    }
}

/// One row of a leaderboard. `model` is unique within a snapshot.
///
/// `rank` and `score` also read from the text form older arena files
/// carry (`"rank": "1"`, `"score": "1,510"`); they always write as numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(deserialize_with = "number_or_text::rank")]
    pub rank: u32,
    pub model: String,
    #[serde(deserialize_with = "number_or_text::score")]
    pub score: f64,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_spread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl LeaderboardRow {
    pub fn new(rank: u32, model: impl Into<String>, score: f64, provider: impl Into<String>) -> Self {
        Self {
            rank,
            model: model.into(),
            score,
            provider: provider.into(),
            ..Self::default()
        }
    }

    pub fn with_pricing(mut self, price: impl Into<String>, context: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self.context = Some(context.into());
        self
    }
}

/// Row payload of a snapshot. Serialized flat next to `source`/`updatedAt`,
/// under the field names each board has always been stored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeaderboardBoards {
    SweBench {
        verified: Vec<LeaderboardRow>,
        pro: Vec<LeaderboardRow>,
    },
    Arena {
        leaderboard: Vec<LeaderboardRow>,
    },
    Performance {
        models: Vec<LeaderboardRow>,
    },
}

impl LeaderboardBoards {
    pub fn empty(kind: LeaderboardKind) -> Self {
        match kind {
            LeaderboardKind::Arena => Self::Arena {
                leaderboard: Vec::new(),
            },
            LeaderboardKind::Performance => Self::Performance { models: Vec::new() },
            LeaderboardKind::SweBench => Self::SweBench {
                verified: Vec::new(),
                pro: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> LeaderboardKind {
        match self {
            Self::Arena { .. } => LeaderboardKind::Arena,
            Self::Performance { .. } => LeaderboardKind::Performance,
            Self::SweBench { .. } => LeaderboardKind::SweBench,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Arena { leaderboard } => leaderboard.len(),
            Self::Performance { models } => models.len(),
            Self::SweBench { verified, pro } => verified.len() + pro.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// One complete capture of a leaderboard. A new snapshot fully replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    pub source: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(flatten)]
    pub boards: LeaderboardBoards,
}

impl LeaderboardSnapshot {
    pub fn new(source: impl Into<String>, boards: LeaderboardBoards) -> Self {
        Self::at(source, boards, Utc::now())
    }

    pub fn at(source: impl Into<String>, boards: LeaderboardBoards, updated_at: DateTime<Utc>) -> Self {
        // Only the arena file has ever carried a row total.
        let total = match &boards {
            LeaderboardBoards::Arena { leaderboard } => Some(leaderboard.len()),
            _ => None,
        };
        Self {
            source: source.into(),
            updated_at,
            total,
            boards,
        }
    }

    pub fn kind(&self) -> LeaderboardKind {
        self.boards.kind()
    }
}

mod number_or_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    fn parse<E: Error>(raw: Raw) -> Result<f64, E> {
        match raw {
            Raw::Number(n) => Ok(n),
            Raw::Text(text) => {
                let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return Ok(0.0);
                }
                cleaned
                    .parse()
                    .map_err(|_| E::custom(format!("invalid number: {:?}", text)))
            }
        }
    }

    pub fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        parse(Raw::deserialize(deserializer)?)
    }

    pub fn rank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let n = parse::<D::Error>(Raw::deserialize(deserializer)?)?;
        if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
            return Err(D::Error::custom(format!("invalid rank: {}", n)));
        }
        Ok(n as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_kind_round_trips_through_key() {
        for kind in LeaderboardKind::ALL {
            assert_eq!(kind.key().parse::<LeaderboardKind>().unwrap(), kind);
        }
        assert!("chatbot".parse::<LeaderboardKind>().is_err());
    }

    #[test]
    fn test_swe_bench_snapshot_serializes_flat() {
        let updated_at = Utc.with_ymd_and_hms(2026, 2, 20, 3, 0, 0).unwrap();
        let snapshot = LeaderboardSnapshot::at(
            "https://www.marc0.dev/en/leaderboard",
            LeaderboardBoards::SweBench {
                verified: vec![LeaderboardRow::new(1, "Claude Opus 4.5", 80.9, "Anthropic")],
                pro: vec![],
            },
            updated_at,
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            json!({
                "source": "https://www.marc0.dev/en/leaderboard",
                "updatedAt": "2026-02-20T03:00:00Z",
                "verified": [{"rank": 1, "model": "Claude Opus 4.5", "score": 80.9, "provider": "Anthropic"}],
                "pro": []
            })
        );
    }

    #[test]
    fn test_arena_snapshot_carries_total_and_reads_back() {
        let snapshot = LeaderboardSnapshot::new(
            "https://arena.ai/ar/leaderboard/code",
            LeaderboardBoards::Arena {
                leaderboard: vec![LeaderboardRow {
                    organization: Some("Anthropic".to_string()),
                    confidence: Some("+15/-15".to_string()),
                    ..LeaderboardRow::new(1, "claude-opus-4-5", 1510.0, "Anthropic")
                }],
            },
        );
        assert_eq!(snapshot.total, Some(1));

        let text = serde_json::to_string(&snapshot).unwrap();
        assert!(text.contains("\"leaderboard\""));
        let back: LeaderboardSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.kind(), LeaderboardKind::Arena);
    }

    #[test]
    fn test_performance_rows_keep_pricing_fields() {
        let value = json!({
            "source": "https://artificialanalysis.ai/leaderboards/models",
            "updatedAt": "2026-02-20T00:00:00Z",
            "models": [{"rank": 1, "model": "GLM-5", "score": 50, "price": "$1.55", "context": "200k", "provider": "Z AI"}]
        });
        let snapshot: LeaderboardSnapshot = serde_json::from_value(value).unwrap();
        match snapshot.boards {
            LeaderboardBoards::Performance { models } => {
                assert_eq!(models[0].price.as_deref(), Some("$1.55"));
                assert_eq!(models[0].score, 50.0);
            }
            other => panic!("unexpected boards: {:?}", other),
        }
    }

    #[test]
    fn test_rows_read_text_rank_and_score() {
        let row: LeaderboardRow = serde_json::from_value(json!({
            "rank": "2",
            "rankSpread": "1-3",
            "model": "gpt-5.2",
            "score": "1,495",
            "confidence": "+9/-9"
        }))
        .unwrap();
        assert_eq!(row.rank, 2);
        assert_eq!(row.score, 1495.0);
        assert_eq!(row.rank_spread.as_deref(), Some("1-3"));

        let written = serde_json::to_value(&row).unwrap();
        assert_eq!(written["rank"], json!(2));
        assert_eq!(written["score"], json!(1495.0));

        let bad = serde_json::from_value::<LeaderboardRow>(json!({"rank": "first", "model": "x", "score": 1}));
        assert!(bad.is_err());
    }
}
