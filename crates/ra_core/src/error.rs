use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidUrl(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Sentiment error: {0}")]
    Sentiment(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_message_is_shown_verbatim() {
        let err = Error::InvalidUrl("Please enter a URL to analyze.".to_string());
        assert_eq!(err.to_string(), "Please enter a URL to analyze.");
    }

    #[test]
    fn test_stage_errors_are_prefixed() {
        assert_eq!(
            Error::Fetch("connection refused".to_string()).to_string(),
            "Fetch error: connection refused"
        );
        assert_eq!(
            Error::Sentiment("model unavailable".to_string()).to_string(),
            "Sentiment error: model unavailable"
        );
    }
}
