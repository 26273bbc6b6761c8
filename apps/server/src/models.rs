use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel stored in [`LineResult::sentiment`] when the remote call for
/// that line failed.
pub const ERROR_SENTINEL: &str = "error";

/// Request body shared by `POST /analyze` and `POST /mine`.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// The text to classify. An absent field deserializes to an empty
    /// string, and handlers reject both the same way.
    #[serde(default)]
    pub text: String,
}

/// Response body of `POST /analyze`: the classifier payload, verbatim.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: Value,
}

/// One entry of the mining `results` list: the original line plus either
/// the raw classifier payload or the `"error"` sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct LineResult {
    pub text: String,
    pub sentiment: Value,
}

impl LineResult {
    pub fn classified(text: String, sentiment: Value) -> Self {
        Self { text, sentiment }
    }

    pub fn failed(text: String) -> Self {
        Self {
            text,
            sentiment: Value::String(ERROR_SENTINEL.to_string()),
        }
    }
}

/// Three-bucket tally over the classified lines of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentSummary {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

/// Response body of `POST /mine`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MineResponse {
    pub sentiment_summary: SentimentSummary,
    pub word_counts: HashMap<String, u32>,
    /// Number of non-empty input lines, failed classifications included.
    pub total: usize,
    pub results: Vec<LineResult>,
}

/// Reads the top-ranked label out of a raw classifier payload.
///
/// The remote model answers with one ranking per input, each ranking being a
/// list of `{label, score}` pairs in descending score order, so the top
/// prediction lives at `[0][0]`. Returns `None` for the `"error"` sentinel
/// and for any payload without that shape.
pub fn top_label(sentiment: &Value) -> Option<&str> {
    sentiment
        .as_array()?
        .first()?
        .as_array()?
        .first()?
        .get("label")?
        .as_str()
}
