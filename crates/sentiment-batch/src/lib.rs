
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sentiment_rules::{analyze_one, SentimentResult};
use thiserror::Error;

/// Identifier echoed on every response.
pub const MODEL_ID: &str = "rule-local-v2";
/// Language reported when a client omits `lang`.
pub const DEFAULT_LANG: &str = "und";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TextItem {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl TextItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: Some(text.into()), lang: None }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct BatchRequest {
    #[serde(default)]
    pub items: Vec<TextItem>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct BatchResponse { pub model_id: String, pub items: Vec<SentimentResult> }

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthResponse { pub status: String, pub model_id: String }

impl HealthResponse {
    pub fn ok() -> Self { Self { status: "ok".into(), model_id: MODEL_ID.into() } }
}

#[derive(Debug, Error)]
pub enum BatchInputError {
    #[error("invalid batch document: {0}")]
    Document(#[source] serde_json::Error),
    #[error("invalid item on line {line}: {source}")]
    Line { line: usize, #[source] source: serde_json::Error },
}

/// Score a single wire item; a missing text scores like an empty one.
pub fn score_item(item: &TextItem) -> SentimentResult {
    let text = item.text.as_deref().unwrap_or_default();
    let lang = item.lang.as_deref().unwrap_or(DEFAULT_LANG);
    analyze_one(&item.id, text, lang)
}

/// Score every item of the request. Items are independent and run on the rayon
/// pool; `collect` on an indexed parallel iterator keeps input order.
pub fn handle_batch(req: &BatchRequest) -> BatchResponse {
    tracing::debug!(items = req.items.len(), "scoring batch");
    let items: Vec<SentimentResult> = req.items.par_iter().map(score_item).collect();
    BatchResponse { model_id: MODEL_ID.to_string(), items }
}

/// Parse CLI batch input: either a `{"items": [...]}` document or JSON lines
/// holding one `TextItem` each (blank lines skipped).
pub fn parse_batch_input(input: &str) -> Result<BatchRequest, BatchInputError> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(input) {
        if value.get("items").is_some() {
            return serde_json::from_value(value).map_err(BatchInputError::Document);
        }
    }

    let mut items = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item = serde_json::from_str::<TextItem>(line)
            .map_err(|source| BatchInputError::Line { line: i + 1, source })?;
        items.push(item);
    }
    Ok(BatchRequest { items })
}
