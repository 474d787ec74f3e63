use crate::domain::model::LeaderboardRow;
use std::collections::HashSet;

/// Keeps the first row seen for each model name, preserving order.
pub fn dedup_by_model(rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.model.clone()))
        .collect()
}

/// Dedups by model, sorts by score descending (stable, NaN last) and
/// renumbers ranks 1..=N in that order.
pub fn dedup_and_rank(rows: Vec<LeaderboardRow>) -> Vec<LeaderboardRow> {
    let mut unique = dedup_by_model(rows);
    unique.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));
    for (i, row) in unique.iter_mut().enumerate() {
        row.rank = (i + 1) as u32;
    }
    unique
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(model: &str, score: f64) -> LeaderboardRow {
        LeaderboardRow::new(0, model, score, "Other")
    }

    #[test]
    fn test_duplicate_keeps_first_occurrence() {
        let ranked = dedup_and_rank(vec![row("X", 80.9), row("X", 79.0)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 80.9);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = dedup_and_rank(vec![row("A", 51.0), row("B", 53.0), row("C", 51.0)]);
        let models: Vec<&str> = ranked.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["B", "A", "C"]);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![row("solo", 1.0)])]
    #[case(vec![row("a", 1.0), row("b", 3.0), row("a", 9.0), row("c", 2.0), row("b", 0.5)])]
    #[case(vec![row("n", f64::NAN), row("m", -1.0), row("o", 4.0)])]
    fn test_ranked_output_is_unique_sorted_and_contiguous(#[case] input: Vec<LeaderboardRow>) {
        let ranked = dedup_and_rank(input.clone());

        let unique: HashSet<&str> = input.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(ranked.len(), unique.len());

        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        let expected: Vec<u32> = (1..=ranked.len() as u32).collect();
        assert_eq!(ranks, expected);

        for pair in ranked.windows(2) {
            assert!(sort_key(pair[0].score) >= sort_key(pair[1].score));
        }
    }

    #[test]
    fn test_nan_scores_sort_last() {
        let ranked = dedup_and_rank(vec![row("n", f64::NAN), row("z", 0.0)]);
        assert_eq!(ranked[0].model, "z");
        assert_eq!(ranked[1].model, "n");
    }
}
