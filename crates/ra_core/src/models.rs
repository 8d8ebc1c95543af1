use std::fmt;

use async_trait::async_trait;

use crate::types::{SentimentResult, SummaryOptions};
use crate::Result;

/// Retrieves the raw body of a page.
#[async_trait]
pub trait Fetcher: Send + Sync + fmt::Debug {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    /// Name of the backing model, recorded on every summary
    fn name(&self) -> &str;

    /// Produce an abstractive summary of `text` within the given bounds
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String>;
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify `text` and return the top label with its score
    async fn classify(&self, text: &str) -> Result<SentimentResult>;
}
