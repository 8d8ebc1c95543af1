use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use ra_core::{
    generate_advice, Analysis, Article, Error, Fetcher, Result, SentimentResult, Stage, Summary,
};
use ra_inference::ModelCache;
use url::Url;

use crate::extract::extract_text;
use crate::logging::Logger;

pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL to analyze.";

pub const STAGES: [(&str, &str); 4] = [
    ("Article Input", "Fetch the article from its URL and extract the paragraph text"),
    ("Text Summarization", "Condense the article with a pre-trained summarization model"),
    ("Sentiment Analysis", "Score the summary with a pre-trained sentiment classifier"),
    ("Investment Advice", "Map the sentiment to a short advisory message"),
];

/// Runs fetch, summarize, classify and advise for one URL at a time.
pub struct AnalysisManager {
    fetcher: Arc<dyn Fetcher>,
    models: Arc<ModelCache>,
}

impl fmt::Debug for AnalysisManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisManager")
            .field("fetcher", &self.fetcher)
            .field("models", &self.models)
            .finish()
    }
}

impl AnalysisManager {
    pub fn new(fetcher: Arc<dyn Fetcher>, models: Arc<ModelCache>) -> Self {
        Self { fetcher, models }
    }

    pub fn models(&self) -> &ModelCache {
        &self.models
    }

    /// Analyzes one article.
    ///
    /// Only a blank URL is an error. Stage failures are recorded in the
    /// returned [`Analysis`], and the stages after a failure do not run.
    pub async fn analyze(&self, url: &str) -> Result<Analysis> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::InvalidUrl(EMPTY_URL_MESSAGE.to_string()));
        }

        let logger = Logger::new().with_prefix(format!("[{}]", host_of(url)));
        let mut analysis = Analysis::new(url);

        logger.info("📰 Fetching article");
        let article = match self.fetch_article(url).await {
            Ok(article) => article,
            Err(e) => {
                return Ok(fail(&logger, analysis, Stage::Fetch, &e));
            }
        };
        logger.debug(&format!("Extracted {} characters", article.extracted_text.len()));

        logger.info("🤖 Generating summary");
        let summary = match self.summarize(&article).await {
            Ok(summary) => summary,
            Err(e) => {
                analysis.article = Some(article);
                return Ok(fail(&logger, analysis, Stage::Summarize, &e));
            }
        };
        analysis.article = Some(article);
        logger.info("✨ Summary generated successfully");

        logger.info("📊 Analyzing sentiment");
        let sentiment = match self.classify(&summary).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                analysis.summary = Some(summary);
                return Ok(fail(&logger, analysis, Stage::Sentiment, &e));
            }
        };
        analysis.summary = Some(summary);

        let advice = generate_advice(&sentiment.label, sentiment.confidence);
        logger.info(&format!(
            "✨ Sentiment {} ({}), advice: {}",
            sentiment.label,
            sentiment.confidence_percent(),
            advice.kind()
        ));
        analysis.sentiment = Some(sentiment);
        analysis.advice = Some(advice);

        Ok(analysis)
    }

    pub async fn fetch_article(&self, url: &str) -> Result<Article> {
        let raw_html = self.fetcher.fetch(url).await?;
        let extracted_text = extract_text(&raw_html);
        Ok(Article {
            url: url.to_string(),
            raw_html,
            extracted_text,
            fetched_at: Utc::now(),
        })
    }

    pub async fn summarize(&self, article: &Article) -> Result<Summary> {
        let summarizer = self.models.summarizer().await?;
        let options = self.models.config().summary;
        let text = summarizer.summarize(&article.extracted_text, &options).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Summarization(format!(
                "{} returned an empty summary",
                summarizer.name()
            )));
        }
        Ok(Summary {
            text: text.to_string(),
            source_url: article.url.clone(),
            model: summarizer.name().to_string(),
        })
    }

    pub async fn classify(&self, summary: &Summary) -> Result<SentimentResult> {
        let model = self.models.sentiment().await?;
        let result = model.classify(&summary.text).await?;
        if result.label.trim().is_empty() {
            return Err(Error::Sentiment(format!("{} returned an empty label", model.name())));
        }
        Ok(result)
    }
}

fn fail(logger: &Logger, analysis: Analysis, stage: Stage, error: &Error) -> Analysis {
    logger.error(&format!("❌ {} stage failed: {}", stage, error));
    analysis.fail(stage, error)
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
