use std::sync::Arc;

use ra_core::{Error, Result, SentimentModel, Summarizer};
use tracing::debug;

use crate::InferenceConfig;

pub mod dummy;
pub mod huggingface;

pub use dummy::{DummySentimentModel, DummySummarizer};
pub use huggingface::{HuggingFaceClient, HuggingFaceSentimentModel, HuggingFaceSummarizer};

pub async fn create_summarizer(config: &InferenceConfig) -> Result<Arc<dyn Summarizer>> {
    debug!("Creating summarizer for backend {}", config.backend);
    match config.backend.as_str() {
        "huggingface" | "hf" => {
            let client = HuggingFaceClient::new(config)?;
            Ok(Arc::new(HuggingFaceSummarizer::new(client, config.summarization_model.clone())))
        }
        "dummy" => Ok(Arc::new(DummySummarizer::new())),
        other => Err(unknown_backend(other)),
    }
}

pub async fn create_sentiment_model(config: &InferenceConfig) -> Result<Arc<dyn SentimentModel>> {
    debug!("Creating sentiment model for backend {}", config.backend);
    match config.backend.as_str() {
        "huggingface" | "hf" => {
            let client = HuggingFaceClient::new(config)?;
            Ok(Arc::new(HuggingFaceSentimentModel::new(client, config.sentiment_model.clone())))
        }
        "dummy" => Ok(Arc::new(DummySentimentModel::new())),
        other => Err(unknown_backend(other)),
    }
}

fn unknown_backend(name: &str) -> Error {
    Error::Inference(format!(
        "Unknown inference backend '{}'. Available backends: huggingface (default), dummy",
        name
    ))
}

/// Keeps at most `max_tokens` whitespace-separated tokens of `text`.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let mut tokens = text.split_whitespace();
    let kept: Vec<&str> = tokens.by_ref().take(max_tokens).collect();
    if tokens.next().is_none() {
        return text.to_string();
    }
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_dummy_models() {
        let config = InferenceConfig::dummy();
        let summarizer = create_summarizer(&config).await.unwrap();
        let sentiment = create_sentiment_model(&config).await.unwrap();
        assert_eq!(summarizer.name(), "dummy-summarizer");
        assert_eq!(sentiment.name(), "dummy-sentiment");
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let config = InferenceConfig {
            backend: "torch".to_string(),
            ..InferenceConfig::default()
        };
        let err = create_summarizer(&config).await.unwrap_err();
        assert!(err.to_string().contains("Unknown inference backend 'torch'"));
        assert!(create_sentiment_model(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_huggingface_requires_token() {
        let config = InferenceConfig::default();
        let err = create_summarizer(&config).await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn test_truncate_tokens() {
        assert_eq!(truncate_tokens("one two three four", 2), "one two");
        assert_eq!(truncate_tokens("one  two\nthree", 3), "one  two\nthree");
        assert_eq!(truncate_tokens("", 5), "");
    }
}
