use ra_core::SummaryOptions;

pub mod cache;
pub mod models;

pub const DEFAULT_BACKEND: &str = "huggingface";
pub const DEFAULT_MODEL_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Which backend serves the two pipelines and how to reach it.
#[derive(Clone)]
pub struct InferenceConfig {
    pub backend: String,
    pub api_token: Option<String>,
    pub model_url: String,
    pub summarization_model: String,
    pub sentiment_model: String,
    pub summary: SummaryOptions,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("backend", &self.backend)
            .field("api_token", &self.api_token.as_deref().map(|_| "<redacted>"))
            .field("model_url", &self.model_url)
            .field("summarization_model", &self.summarization_model)
            .field("sentiment_model", &self.sentiment_model)
            .field("summary", &self.summary)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            api_token: None,
            model_url: DEFAULT_MODEL_URL.to_string(),
            summarization_model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            summary: SummaryOptions::default(),
        }
    }
}

impl InferenceConfig {
    pub fn dummy() -> Self {
        Self {
            backend: "dummy".to_string(),
            ..Self::default()
        }
    }
}

pub mod prelude {
    pub use super::cache::ModelCache;
    pub use super::models::{create_sentiment_model, create_summarizer};
    pub use super::InferenceConfig;
    pub use ra_core::{Error, Result, SentimentModel, Summarizer};
}

pub use cache::ModelCache;
pub use models::{create_sentiment_model, create_summarizer};
