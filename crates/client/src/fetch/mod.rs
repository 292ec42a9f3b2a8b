//! HTTP fetch client backing the engine's network leg.
//!
//! - Only http(s) URLs are sent; the fragment never leaves the process.
//! - Max redirects: 5 (configurable)
//! - Max body bytes: 10MB (configurable), checked against `Content-Length`
//!   and again against the received body.
//!
//! Non-2xx statuses are returned as responses, not errors: whether a status
//! is worth caching is the strategy's decision, not the transport's.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize};

use offcache_core::{AppConfig, Error, Network, RequestDescriptor, Response};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "offcache/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "offcache/0.1".to_string(),
            max_bytes: 10 * 1024 * 1024,
            timeout: Duration::from_millis(15_000),
            max_redirects: 5,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// reqwest-backed [`Network`] implementation.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn too_large(&self, len: usize) -> Error {
        Error::FetchTooLarge(format!("{len} bytes exceeds {}", self.config.max_bytes))
    }
}

fn transport_error(err: &reqwest::Error) -> Error {
    if err.is_timeout() { Error::FetchTimeout(err.to_string()) } else { Error::Network(err.to_string()) }
}

#[async_trait]
impl Network for FetchClient {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Response, Error> {
        let start = Instant::now();
        url::ensure_http(&request.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut target = request.url.clone();
        target.set_fragment(None);

        let response = self
            .http
            .request(request.method.clone(), target.as_str())
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(self.too_large(len as usize));
        }

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter(|(name, _)| *name != header::CONTENT_LENGTH && *name != header::CONTENT_ENCODING)
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string())))
            .collect();

        let body = response.bytes().await.map_err(|e| transport_error(&e))?;

        if body.len() > self.config.max_bytes {
            return Err(self.too_large(body.len()));
        }

        tracing::debug!(
            url = %target,
            status = status.as_u16(),
            bytes = body.len(),
            fetch_ms = start.elapsed().as_millis() as u64,
            "fetched"
        );

        Ok(Response {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
