//! Text-pattern extraction of leaderboard rows from HTML pages and bundled scripts.
//!
//! Every function here is best effort: upstream markup changes degrade the
//! result to fewer rows (possibly none), never to an error or a half-filled
//! row. Callers decide what "too few" means.

use crate::domain::model::LeaderboardRow;
use regex::Regex;
use std::sync::LazyLock;

static TBODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tbody\b[^>]*>(.*?)</tbody>").expect("tbody pattern"));
static THEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<thead\b[^>]*>(.*?)</thead>").expect("thead pattern"));
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("row pattern"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("cell pattern"));
static HEADER_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<th\b[^>]*>(.*?)</th>").expect("header pattern"));
static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span>").expect("span pattern"));
static SPAN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(/?)span\b([^>]*)>").expect("span tag pattern"));
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("anchor pattern"));
static SVG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<svg\b[^>]*>.*?<title\b[^>]*>(.*?)</title>").expect("svg title pattern")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));
static SCRIPT_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("script src pattern")
});
static ENTRIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"entries:(\[\{.*?\}\])").expect("entries pattern"));
static MODEL_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"model:"(.*?)""#).expect("model field pattern"));
static SCORE_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"score:(\d*\.?\d+)").expect("score field pattern"));
static PROVIDER_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"provider:"(.*?)""#).expect("provider field pattern"));

/// Only bundles under this path have carried page data.
pub const CHUNK_PATH_MARKER: &str = "/_next/static/chunks/";

/// Visible text of an HTML fragment: tags removed, common entities decoded, trimmed.
pub fn text_of(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Leading number in `text`, ignoring thousands separators. Zero when absent.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .skip_while(|c| !(c.is_ascii_digit() || *c == '-' || *c == '.'))
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

fn body_rows(html: &str) -> Vec<Vec<String>> {
    TBODY_RE
        .captures_iter(html)
        .flat_map(|tbody| {
            let body = tbody.get(1).map_or("", |m| m.as_str()).to_string();
            ROW_RE
                .captures_iter(&body)
                .map(|row| {
                    let inner = row.get(1).map_or("", |m| m.as_str());
                    CELL_RE
                        .captures_iter(inner)
                        .map(|cell| cell.get(1).map_or("", |m| m.as_str()).to_string())
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Text of each span in a cell whose spans do not nest.
fn spans(cell: &str) -> Vec<String> {
    SPAN_RE
        .captures_iter(cell)
        .map(|c| text_of(c.get(1).map_or("", |m| m.as_str())))
        .collect()
}

/// Text of the first span whose attributes contain `class`, including any
/// nested spans up to its matching close tag.
fn span_text_with_class(cell: &str, class: &str) -> Option<String> {
    let mut tags = SPAN_TAG_RE.captures_iter(cell);
    let start = tags
        .by_ref()
        .find(|tag| tag[1].is_empty() && tag[2].contains(class))?
        .get(0)?
        .end();

    let mut depth = 1;
    let mut end = cell.len();
    for tag in tags {
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                end = tag.get(0).map_or(cell.len(), |m| m.start());
                break;
            }
        }
    }
    Some(text_of(&cell[start..end]))
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| text_of(m.as_str()))
        .filter(|s| !s.is_empty())
}

/// Rows of the arena code leaderboard table.
///
/// Column layout: rank, rank spread, model cell (organization logo title,
/// linked model name, secondary license text), score cell (score, confidence).
/// Rows without a rank or a model name are dropped.
pub fn extract_table_rows(html: &str) -> Vec<LeaderboardRow> {
    body_rows(html)
        .into_iter()
        .filter_map(|cells| {
            let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

            let rank_text = text_of(cell(0));
            let spread_spans = spans(cell(1));
            let rank_spread = if spread_spans.is_empty() {
                text_of(cell(1))
            } else {
                spread_spans.join("-")
            };

            let model_cell = cell(2);
            let organization = first_capture(&SVG_TITLE_RE, model_cell)
                .unwrap_or_else(|| "Unknown".to_string());
            let model = first_capture(&ANCHOR_RE, model_cell).unwrap_or_default();
            let license = span_text_with_class(model_cell, "text-text-secondary").unwrap_or_default();

            let score_spans = spans(cell(3));
            let score = score_spans.first().map(|t| parse_number(t)).unwrap_or(0.0);
            let confidence = score_spans.get(1).cloned().unwrap_or_default();

            if rank_text.is_empty() || model.is_empty() {
                return None;
            }

            Some(LeaderboardRow {
                rank: parse_number(&rank_text) as u32,
                model,
                score,
                provider: organization.clone(),
                organization: Some(organization),
                license: Some(license),
                confidence: Some(confidence),
                rank_spread: Some(rank_spread),
                ..LeaderboardRow::default()
            })
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct ColumnMap {
    model: Option<usize>,
    provider: Option<usize>,
    score: Option<usize>,
    price: Option<usize>,
    context: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let mut map = Self::default();
        for (i, header) in headers.iter().enumerate() {
            let h = header.to_lowercase();
            if map.model.is_none() && h.contains("model") {
                map.model = Some(i);
            } else if map.provider.is_none() && (h.contains("creator") || h.contains("provider")) {
                map.provider = Some(i);
            } else if map.score.is_none()
                && (h.contains("intelligence") || h.contains("index") || h.contains("score"))
            {
                map.score = Some(i);
            } else if map.price.is_none() && h.contains("price") {
                map.price = Some(i);
            } else if map.context.is_none() && h.contains("context") {
                map.context = Some(i);
            }
        }
        map
    }

    /// Positional layout used when the table has no recognizable header.
    fn positional() -> Self {
        Self {
            model: Some(0),
            provider: Some(1),
            score: Some(2),
            price: Some(3),
            context: Some(4),
        }
    }
}

/// Rows of a model comparison table, located by header labels
/// (model, creator/provider, intelligence/score, price, context window).
/// Rows without a model name are dropped; rank is the row position.
pub fn extract_performance_rows(html: &str) -> Vec<LeaderboardRow> {
    let headers: Vec<String> = THEAD_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|head| {
            HEADER_CELL_RE
                .captures_iter(head.as_str())
                .map(|c| text_of(c.get(1).map_or("", |m| m.as_str())))
                .collect()
        })
        .unwrap_or_default();

    let mapped = ColumnMap::from_headers(&headers);
    let columns = if mapped.model.is_some() {
        mapped
    } else {
        ColumnMap::positional()
    };

    let mut rows = Vec::new();
    for cells in body_rows(html) {
        let text = |idx: Option<usize>| {
            idx.and_then(|i| cells.get(i))
                .map(|c| text_of(c))
                .unwrap_or_default()
        };

        let model = text(columns.model);
        if model.is_empty() {
            continue;
        }
        let provider = columns
            .provider
            .and_then(|i| cells.get(i))
            .and_then(|c| first_capture(&SVG_TITLE_RE, c))
            .unwrap_or_else(|| text(columns.provider));

        rows.push(
            LeaderboardRow::new(
                (rows.len() + 1) as u32,
                model,
                parse_number(&text(columns.score)),
                provider,
            )
            .with_pricing(text(columns.price), text(columns.context)),
        );
    }
    rows
}

/// `src` of every script tag pointing into the bundled chunk directory.
pub fn find_script_sources(html: &str) -> Vec<String> {
    SCRIPT_SRC_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .filter(|src| src.contains(CHUNK_PATH_MARKER))
        .collect()
}

/// Every `entries:[{...}]` array literal in a script, each as its own row list.
/// Arrays that yield no rows are omitted.
pub fn extract_entries(script: &str) -> Vec<Vec<LeaderboardRow>> {
    ENTRIES_RE
        .captures_iter(script)
        .filter_map(|c| c.get(1))
        .map(|m| parse_entries_array(m.as_str()))
        .filter(|rows| !rows.is_empty())
        .collect()
}

/// Splits an object-array literal on `},{` (not nesting aware) and reads
/// `model`, `score` and `provider` from each fragment. Fragments missing
/// model or score are skipped. Every returned row has rank 0.
pub fn parse_entries_array(raw: &str) -> Vec<LeaderboardRow> {
    let content = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);

    content
        .split("},{")
        .filter_map(|fragment| {
            let model = MODEL_FIELD_RE
                .captures(fragment)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())?;
            let score: f64 = SCORE_FIELD_RE
                .captures(fragment)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())?;
            let provider = PROVIDER_FIELD_RE
                .captures(fragment)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| provider_for(&model).to_string());

            Some(LeaderboardRow::new(0, model, score, provider))
        })
        .collect()
}

/// Provider guessed from a model name when the payload omits it.
pub fn provider_for(model: &str) -> &'static str {
    const PREFIXES: [(&str, &str); 8] = [
        ("Claude", "Anthropic"),
        ("GPT", "OpenAI"),
        ("Gemini", "Google"),
        ("MiniMax", "MiniMax"),
        ("GLM", "Zhipu AI"),
        ("Kimi", "Moonshot AI"),
        ("Qwen", "Alibaba"),
        ("DeepSeek", "DeepSeek"),
    ];
    PREFIXES
        .iter()
        .find(|(needle, _)| model.contains(needle))
        .map(|(_, provider)| *provider)
        .unwrap_or("Other")
}

/// Which SWE-bench boards an entries array looks like. An array can match both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardMatch {
    pub verified: bool,
    pub pro: bool,
}

/// Recognizes a board by a reference model/score pair known to be on it.
///
/// These anchors age out as the upstream boards move on; once they do,
/// nothing classifies and the fallback datasets take over.
pub fn classify_entries(rows: &[LeaderboardRow]) -> BoardMatch {
    let has = |model: &str, score: f64| {
        rows.iter()
            .any(|r| r.model.contains(model) && (r.score - score).abs() < 0.5)
    };
    BoardMatch {
        verified: has("Claude Opus 4.5", 80.9),
        pro: has("GPT-5.3-Codex", 56.8),
    }
}
