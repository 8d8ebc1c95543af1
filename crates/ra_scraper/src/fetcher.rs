use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ra_core::{Error, Fetcher, Result};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::Client;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Single-attempt GET with a browser-like header set.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("client", &"<reqwest::Client>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        // Accept-Encoding is negotiated by reqwest's gzip and deflate features.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url).map_err(|e| Error::Fetch(format!("Invalid URL '{}': {}", url, e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        tracing::debug!("Fetched {} bytes", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets/article"))
            .and(header("upgrade-insecure-requests", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>Hello</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let body = fetcher
            .fetch(&format!("{}/markets/article", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, b"<p>Hello</p>");

        let requests = server.received_requests().await.unwrap();
        let headers = &requests[0].headers;
        let value = |name: &str| headers.get(name).unwrap().to_str().unwrap().to_string();
        assert_eq!(value("user-agent"), USER_AGENT);
        assert_eq!(value("accept"), ACCEPT_VALUE);
        assert_eq!(value("accept-language"), ACCEPT_LANGUAGE_VALUE);
        assert!(value("accept-encoding").contains("gzip"));
        assert!(value("connection").eq_ignore_ascii_case("keep-alive"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch(&format!("{}/missing", server.uri())).await.unwrap_err();
        match err {
            Error::Fetch(message) => assert!(message.contains("404")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = FetchConfig {
            timeout: Duration::from_millis(100),
            ..FetchConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let result = fetcher.fetch(&server.uri()).await;
        assert!(matches!(result, Err(Error::Fetch(_))));
    }

    #[tokio::test]
    async fn test_malformed_url_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert!(err.to_string().contains("not a url"));
    }
}
