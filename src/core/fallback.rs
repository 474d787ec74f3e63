use crate::domain::model::{LeaderboardKind, LeaderboardRow};

/// A checked-in dataset returned when live extraction yields fewer than `min_rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackDataset {
    pub name: &'static str,
    pub min_rows: usize,
    pub rows: Vec<LeaderboardRow>,
}

impl FallbackDataset {
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// `rows` when there are enough of them, otherwise this dataset verbatim.
    pub fn apply(&self, rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
        if rows.len() >= self.min_rows {
            rows
        } else {
            tracing::warn!(
                "⚠️ {}: extracted {} rows, need {}; using fallback data",
                self.name,
                rows.len(),
                self.min_rows
            );
            self.rows.clone()
        }
    }
}

fn rows(data: &[(u32, &str, f64, &str)]) -> Vec<LeaderboardRow> {
    data.iter()
        .map(|(rank, model, score, provider)| LeaderboardRow::new(*rank, *model, *score, *provider))
        .collect()
}

// Captured February 2026.
pub fn swe_bench_verified() -> FallbackDataset {
    FallbackDataset {
        name: "swe-bench verified",
        min_rows: 3,
        rows: rows(&[
            (1, "Claude Opus 4.5", 80.9, "Anthropic"),
            (2, "Claude Opus 4.6", 80.8, "Anthropic"),
            (3, "MiniMax M2.5", 80.2, "MiniMax"),
            (4, "GPT-5.2", 80.0, "OpenAI"),
            (5, "Gemini 3 Flash", 78.0, "Google"),
            (6, "GLM-5", 77.8, "Zhipu AI"),
            (7, "Claude Sonnet 4.5", 77.2, "Anthropic"),
        ]),
    }
}

pub fn swe_bench_pro() -> FallbackDataset {
    FallbackDataset {
        name: "swe-bench pro",
        min_rows: 2,
        rows: rows(&[
            (1, "GPT-5.3-Codex", 56.8, "OpenAI"),
            (2, "GPT-5.2-Codex", 56.4, "OpenAI"),
            (3, "GPT-5.2", 55.6, "OpenAI"),
            (4, "GPT-5.1-Codex", 50.8, "OpenAI"),
            (5, "Claude Opus 4.5", 45.9, "Anthropic"),
            (6, "Claude Sonnet 4.5", 45.8, "Anthropic"),
            (7, "Qwen3-Coder-Next", 44.3, "Alibaba"),
        ]),
    }
}

// Captured 2026-02-20.
pub fn performance() -> FallbackDataset {
    let models = [
        (1, "Gemini 3.1 Pro Preview", 57.0, "$4.50", "1m", "Google"),
        (2, "Claude Opus 4.6 (max)", 53.0, "$10.00", "200k", "Anthropic"),
        (3, "Claude Sonnet 4.6 (max)", 51.0, "$6.00", "200k", "Anthropic"),
        (4, "GPT-5.2 (xhigh)", 51.0, "$4.81", "400k", "OpenAI"),
        (5, "Claude Opus 4.5", 50.0, "$10.00", "200k", "Anthropic"),
        (6, "GLM-5", 50.0, "$1.55", "200k", "Z AI"),
        (7, "GPT-5.2 Codex (xhigh)", 49.0, "$4.81", "400k", "OpenAI"),
        (8, "Gemini 3 Pro Preview (high)", 48.0, "$4.50", "1m", "Google"),
        (9, "Kimi K2.5", 47.0, "$1.20", "256k", "Kimi"),
        (10, "Gemini 3 Flash", 46.0, "$1.13", "1m", "Google"),
    ];
    FallbackDataset {
        name: "performance",
        min_rows: 3,
        rows: models
            .iter()
            .map(|(rank, model, score, price, context, provider)| {
                LeaderboardRow::new(*rank, *model, *score, *provider).with_pricing(*price, *context)
            })
            .collect(),
    }
}

/// Fallback datasets for a board, in board order. Arena has none.
pub fn datasets_for(kind: LeaderboardKind) -> Vec<FallbackDataset> {
    match kind {
        LeaderboardKind::Arena => Vec::new(),
        LeaderboardKind::Performance => vec![performance()],
        LeaderboardKind::SweBench => vec![swe_bench_verified(), swe_bench_pro()],
    }
}
