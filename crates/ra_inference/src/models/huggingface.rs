use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use ra_core::{Error, Result, SentimentModel, SentimentResult, Summarizer, SummaryOptions};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use super::truncate_tokens;
use crate::InferenceConfig;

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
    options: RequestOptions,
}

#[derive(Serialize)]
struct SummarizationParameters {
    min_length: usize,
    max_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncation: Option<&'static str>,
}

#[derive(Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

#[derive(Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
    options: RequestOptions,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct ApiError {
    error: serde_json::Value,
}

/// Shared HTTP access to the hosted inference API.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Arc<Client>,
    api_token: String,
    base_url: String,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let api_token = config
            .api_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| Error::Inference("Hugging Face API token is required".to_string()))?;
        let base_url = Url::parse(&config.model_url)
            .map_err(|e| Error::Config(format!("Invalid model URL '{}': {}", config.model_url, e)))?;

        Ok(Self {
            client: Arc::new(Client::new()),
            api_token,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// Posts `body` to the model endpoint. Errors are plain messages so each
    /// pipeline can wrap them in its own stage error.
    async fn post<B, T>(&self, model: &str, body: &B) -> std::result::Result<T, String>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(model))
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiError>(&bytes) {
                Ok(ApiError { error: serde_json::Value::String(s) }) => s,
                Ok(ApiError { error }) => error.to_string(),
                Err(_) => String::from_utf8_lossy(&bytes).trim().to_string(),
            };
            return Err(format!("{} returned {}: {}", model, status, message));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| format!("Unexpected response from {}: {}", model, e))
    }
}

#[derive(Debug)]
pub struct HuggingFaceSummarizer {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceSummarizer {
    pub fn new(client: HuggingFaceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::Summarization("No text to summarize".to_string()));
        }

        let inputs = if options.truncation {
            truncate_tokens(text, options.max_input_tokens)
        } else {
            text.to_string()
        };
        let request = SummarizationRequest {
            inputs: &inputs,
            parameters: SummarizationParameters {
                min_length: options.min_length,
                max_length: options.max_length,
                truncation: options.truncation.then_some("only_first"),
            },
            options: RequestOptions { wait_for_model: true },
        };

        let output: Vec<SummarizationOutput> = self
            .client
            .post(&self.model, &request)
            .await
            .map_err(Error::Summarization)?;

        let summary = output
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Summarization(format!("{} returned no summary", self.model)))?;
        tracing::debug!("Generated summary with {}: {}", self.model, summary);
        Ok(summary)
    }
}

#[derive(Debug)]
pub struct HuggingFaceSentimentModel {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceSentimentModel {
    pub fn new(client: HuggingFaceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceSentimentModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult> {
        let request = ClassificationRequest {
            inputs: text,
            options: RequestOptions { wait_for_model: true },
        };

        let output: ClassificationOutput = self
            .client
            .post(&self.model, &request)
            .await
            .map_err(Error::Sentiment)?;

        let scores = match output {
            ClassificationOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassificationOutput::Flat(scores) => scores,
        };

        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .filter(|top| !top.label.trim().is_empty())
            .map(|top| SentimentResult::new(top.label, top.score))
            .ok_or_else(|| Error::Sentiment(format!("{} returned no labels", self.model)))
    }
}
