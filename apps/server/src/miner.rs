//! Bulk line mining.
//!
//! Splits a blob into non-empty lines, classifies each one sequentially, and
//! aggregates a three-bucket sentiment summary plus a global word-frequency
//! histogram. One bad line never aborts the batch: its result carries the
//! `"error"` sentinel and the loop moves on.

use std::collections::HashMap;

use tracing::error;

use crate::classifier::SentimentClassifier;
use crate::models::{top_label, LineResult, MineResponse, SentimentSummary};

/// Splits a blob into the lines that remain non-empty after trimming.
///
/// Lines keep their original content; trimming only decides whether a line
/// counts. Order and duplicates are preserved.
fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Lowercases a line and folds its word tokens into the running histogram.
///
/// Tokens are produced by splitting on runs of non-word characters
/// (alphanumerics and underscore count as word characters); only tokens
/// longer than two characters are tallied.
fn count_words(line: &str, counts: &mut HashMap<String, u32>) {
    for word in line
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
    {
        if word.chars().count() > 2 {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }
}

/// Buckets each classified line by its top label.
///
/// `"5 stars"` and `"4 stars"` count as positive and `"3 stars"` as neutral;
/// every other label falls into the negative bucket, including labels the
/// model was never expected to produce. Entries whose sentiment is not an
/// array-shaped ranking (the failure sentinel, malformed payloads) are
/// skipped entirely.
fn summarize(results: &[LineResult]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();

    for result in results {
        let Some(label) = top_label(&result.sentiment) else {
            continue;
        };
        match label {
            "5 stars" | "4 stars" => summary.positive += 1,
            "3 stars" => summary.neutral += 1,
            _ => summary.negative += 1,
        }
    }

    summary
}

/// Runs the full mining pipeline over a multi-line blob.
///
/// Remote calls are issued strictly in input order with at most one in
/// flight. Word counting happens only for lines whose call succeeded, so a
/// failed line contributes nothing to the histogram even though its text was
/// available.
pub async fn mine(classifier: &dyn SentimentClassifier, text: &str) -> MineResponse {
    let lines = non_empty_lines(text);
    let total = lines.len();

    let mut results = Vec::with_capacity(total);
    let mut word_counts = HashMap::new();

    for line in lines {
        match classifier.classify(line).await {
            Ok(sentiment) => {
                results.push(LineResult::classified(line.to_string(), sentiment));
                count_words(line, &mut word_counts);
            }
            Err(e) => {
                error!("Classification failed for line: {}", e);
                results.push(LineResult::failed(line.to_string()));
            }
        }
    }

    let sentiment_summary = summarize(&results);

    MineResponse {
        sentiment_summary,
        word_counts,
        total,
        results,
    }
}
