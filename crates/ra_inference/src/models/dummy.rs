use std::fmt;

use async_trait::async_trait;
use ra_core::{Error, Result, SentimentModel, SentimentResult, Summarizer, SummaryOptions};

const POSITIVE_TERMS: &[&str] = &[
    "beat", "beats", "bullish", "gain", "gains", "grew", "growth", "higher", "outperform",
    "profit", "profits", "rallied", "rally", "record", "rise", "rises", "rose", "soar", "soared",
    "strong", "surge", "surged", "upgrade", "upgraded",
];

const NEGATIVE_TERMS: &[&str] = &[
    "bearish", "cut", "cuts", "decline", "declined", "downgrade", "downgraded", "drop", "dropped",
    "fell", "fall", "falls", "layoffs", "lawsuit", "lower", "loss", "losses", "miss", "missed",
    "plunge", "plunged", "recession", "slump", "weak",
];

/// Offline extractive stand-in: keeps leading sentences.
pub struct DummySummarizer;

impl fmt::Debug for DummySummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummySummarizer").finish()
    }
}

impl DummySummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummySummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for DummySummarizer {
    fn name(&self) -> &str {
        "dummy-summarizer"
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::Summarization("No text to summarize".to_string()));
        }

        // Whole sentences until min_length words, then cap at max_length.
        let mut words: Vec<&str> = Vec::new();
        for sentence in text.split_inclusive(|c: char| matches!(c, '.' | '!' | '?')) {
            if words.len() >= options.min_length {
                break;
            }
            words.extend(sentence.split_whitespace());
        }
        words.truncate(options.max_length);

        Ok(words.join(" "))
    }
}

/// Offline lexicon classifier over a handful of market terms.
pub struct DummySentimentModel;

impl fmt::Debug for DummySentimentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummySentimentModel").finish()
    }
}

impl DummySentimentModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummySentimentModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentModel for DummySentimentModel {
    fn name(&self) -> &str {
        "dummy-sentiment"
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().is_empty() {
            return Err(Error::Sentiment("No text to classify".to_string()));
        }

        let mut positive = 0usize;
        let mut negative = 0usize;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
        {
            if POSITIVE_TERMS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_TERMS.contains(&word.as_str()) {
                negative += 1;
            }
        }

        if positive == negative {
            return Ok(SentimentResult::new("NEUTRAL", 0.5));
        }
        let margin = positive.abs_diff(negative) as f64 / (positive + negative) as f64;
        let label = if positive > negative { "POSITIVE" } else { "NEGATIVE" };
        Ok(SentimentResult::new(label, 0.5 + 0.5 * margin))
    }
}
