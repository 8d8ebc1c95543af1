use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advice::Advice;

/// A fetched page and the text extracted from it. Lives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    #[serde(skip)]
    pub raw_html: Vec<u8>,
    pub extracted_text: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source_url: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: String,
    /// Score of the top label, in `[0, 1]`.
    pub confidence: f64,
}

impl SentimentResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Confidence rendered as a percentage with two decimals, e.g. `87.00%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// Bounds passed to the summarization backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub truncation: bool,
    pub max_input_tokens: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 150,
            truncation: true,
            max_input_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Summarize,
    Sentiment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Summarize => "summarize",
            Stage::Sentiment => "sentiment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

/// Outcome of one analysis request.
///
/// Stages fill their field in order. When `failure` is set, only the fields of
/// the stages that completed before it are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<Advice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StageFailure>,
}

impl Analysis {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            article: None,
            summary: None,
            sentiment: None,
            advice: None,
            failure: None,
        }
    }

    pub fn fail(mut self, stage: Stage, error: &crate::Error) -> Self {
        self.failure = Some(StageFailure {
            stage,
            message: error.to_string(),
        });
        self
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.advice.is_some()
    }
}
