pub mod advice;
pub mod error;
pub mod models;
pub mod types;

pub use advice::{generate_advice, Advice, DISCLAIMER};
pub use error::{Error, Result};
pub use models::{Fetcher, SentimentModel, Summarizer};
pub use types::{Analysis, Article, SentimentResult, Stage, StageFailure, Summary, SummaryOptions};
