use std::fmt;
use std::sync::Arc;

use ra_core::{Error, Result, SentimentModel, Summarizer};
use tokio::sync::OnceCell;
use tracing::info;

use crate::models::{create_sentiment_model, create_summarizer};
use crate::InferenceConfig;

/// Process-lifetime holder for the two pipelines.
///
/// Each model is built on first use and then shared by every request.
pub struct ModelCache {
    config: InferenceConfig,
    summarizer: OnceCell<Arc<dyn Summarizer>>,
    sentiment: OnceCell<Arc<dyn SentimentModel>>,
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("config", &self.config)
            .field("summarizer_loaded", &self.summarizer.initialized())
            .field("sentiment_loaded", &self.sentiment.initialized())
            .finish()
    }
}

impl ModelCache {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            config,
            summarizer: OnceCell::new(),
            sentiment: OnceCell::new(),
        }
    }

    /// A cache that starts out holding the given models.
    pub fn with_models(
        config: InferenceConfig,
        summarizer: Arc<dyn Summarizer>,
        sentiment: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            config,
            summarizer: OnceCell::new_with(Some(summarizer)),
            sentiment: OnceCell::new_with(Some(sentiment)),
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub async fn summarizer(&self) -> Result<Arc<dyn Summarizer>> {
        let model = self
            .summarizer
            .get_or_try_init(|| async {
                let model = create_summarizer(&self.config).await?;
                info!("🧠 Summarization model loaded (using {})", model.name());
                Ok::<_, Error>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    pub async fn sentiment(&self) -> Result<Arc<dyn SentimentModel>> {
        let model = self
            .sentiment
            .get_or_try_init(|| async {
                let model = create_sentiment_model(&self.config).await?;
                info!("🧠 Sentiment model loaded (using {})", model.name());
                Ok::<_, Error>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Loads both models up front so configuration errors surface at startup.
    pub async fn preload(&self) -> Result<()> {
        self.summarizer().await?;
        self.sentiment().await?;
        Ok(())
    }
}
