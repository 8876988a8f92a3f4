//! Transport layer for MCP communication.
//!
//! One HTTP POST per JSON-RPC call, bounded by a fixed timeout. Non-2xx
//! statuses are reported with their raw body and never parsed as JSON-RPC.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::{McpError, Result};

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Maximum number of redirects followed per call.
const MAX_REDIRECTS: usize = 10;

/// Moves raw JSON-RPC bodies to a server and back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request body and return the raw response body.
    async fn send(&self, body: Vec<u8>) -> Result<Vec<u8>>;

    /// Release held resources. Later sends fail.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Human-readable endpoint, for logs.
    fn endpoint(&self) -> &str;
}

/// Strip surrounding whitespace and trailing slashes from an endpoint URL.
pub fn normalize_endpoint(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Configuration for HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Endpoint URL of the MCP server, without a trailing slash.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }
}

impl HttpTransportConfig {
    /// Create a new HTTP transport config with the given URL.
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: normalize_endpoint(url.as_ref()),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// HTTP POST transport backed by a pooled `reqwest::Client`.
///
/// The pool lives as long as the transport; dropping it closes every
/// connection, whichever path the last call took.
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpTransportConfig,
    closed: AtomicBool,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn connect(config: HttpTransportConfig) -> Result<Self> {
        url::Url::parse(&config.url)
            .map_err(|e| McpError::invalid_config(format!("invalid URL '{}': {}", config.url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| McpError::invalid_config(format!("invalid header '{}': {}", key, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                McpError::invalid_config(format!("invalid value for header '{}': {}", key, e))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(format!("nowcast/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| McpError::invalid_config(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(
            url = %config.url,
            timeout_secs = config.timeout.as_secs(),
            "created HTTP transport"
        );

        Ok(Self {
            client,
            config,
            closed: AtomicBool::new(false),
        })
    }

    /// The transport configuration.
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Whether [`Transport::shutdown`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: Vec<u8>) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(McpError::connection("transport closed"));
        }

        tracing::trace!(
            url = %self.config.url,
            json = %String::from_utf8_lossy(&body),
            "sending MCP HTTP request"
        );

        let timeout = self.config.timeout;
        let response = self
            .client
            .post(&self.config.url)
            .body(body)
            .send()
            .await
            .map_err(|e| McpError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| McpError::from_reqwest(e, timeout))?;

        tracing::trace!(
            json = %String::from_utf8_lossy(&bytes),
            "received MCP HTTP response"
        );

        Ok(bytes.to_vec())
    }

    async fn shutdown(&self) -> Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!(url = %self.config.url, "HTTP transport closed");
        }
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.config.url
    }
}
