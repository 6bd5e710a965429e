//! HTTP client for the briefing API.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// "GET a path, hand back JSON". The resource layer only depends on this.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value>;
}

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed client for the briefing API. GET only, JSON only, no retries.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("nordpuls/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path, e.g. for opening in a browser.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the body into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get_json(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn rate_limit(&self) {
        self.rate_limiter.lock().await.wait().await;
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        self.rate_limit().await;

        let url = self.api_url(path);
        tracing::debug!(%url, "GET");

        let response = self.http.get(&url).send().await.inspect_err(|e| {
            tracing::warn!(%url, error = %e, "Request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "API returned an error status");
            return Err(Error::request(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Token bucket limiting outgoing requests per second.
struct RateLimiter {
    requests_per_second: u32,
    last_request: Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        let requests_per_second = requests_per_second.max(1);
        Self {
            requests_per_second,
            last_request: Instant::now(),
            tokens: f64::from(requests_per_second),
        }
    }

    async fn wait(&mut self) {
        let rate = f64::from(self.requests_per_second);
        let elapsed = self.last_request.elapsed().as_secs_f64();

        self.tokens = (self.tokens + elapsed * rate).min(rate);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / rate;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and return the base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/")
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = ApiClientBuilder::new()
            .base_url("http://localhost:8000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.api_url("/api/stocks/watchlist"),
            "http://localhost:8000/api/stocks/watchlist"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_error() {
        let base = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = ApiClientBuilder::new().base_url(base).build().unwrap();

        let err = client.get_json("/api/briefings/latest").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 503 Service Unavailable");
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_fetch_decodes_body() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 25\r\nconnection: close\r\n\r\n{\"caps\":[{\"id\":\"large\"}]}",
        )
        .await;
        let client = ApiClientBuilder::new().base_url(base).build().unwrap();

        let caps: crate::models::CapSizes = client.fetch("/api/stocks/caps").await.unwrap();
        assert_eq!(caps.caps[0].id, "large");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 5\r\nconnection: close\r\n\r\nnope!",
        )
        .await;
        let client = ApiClientBuilder::new().base_url(base).build().unwrap();

        let err = client.get_json("/api/stocks/caps").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_waits_when_bucket_is_empty() {
        let mut limiter = RateLimiter::new(2);
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(400));
    }
}
