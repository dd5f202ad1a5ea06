//! HTTP implementation of the PageTransport trait.

use std::error::Error as _;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rclog_core::{LogEntry, LogKind};
use reqwest::{header, Client, StatusCode};
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::page::decode_page;
use crate::transport::PageTransport;

/// Base URL of the public cloud API.
pub const DEFAULT_BASE_URL: &str = "https://api.redislabs.com/v1";

/// Connection settings for [`HttpTransport`].
#[derive(Clone)]
pub struct ApiConfig {
    /// API root; the log resource is appended to it.
    pub base_url: String,
    /// Sent as `x-api-key`.
    pub api_key: String,
    /// Sent as `x-api-secret-key`.
    pub secret_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Settings for the public API with the given credentials.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the resource holding `kind`.
    pub fn resource_url(&self, kind: LogKind) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), kind.resource())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fetches pages from the cloud API over HTTPS.
pub struct HttpTransport {
    http_client: Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// Build a transport. Fails if either credential is empty.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SyncError::InvalidConfig("API key is required".into()));
        }
        if config.secret_key.is_empty() {
            return Err(SyncError::InvalidConfig("secret key is required".into()));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("rc-log-fetch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::Transport(describe(&e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Map a response status to the error it stands for, if any.
fn classify(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => Err(SyncError::Credential {
            status: status.as_u16(),
            reason: "unauthorized",
        }),
        StatusCode::FORBIDDEN => Err(SyncError::Credential {
            status: status.as_u16(),
            reason: "forbidden",
        }),
        other => Err(SyncError::UnexpectedStatus {
            status: other.as_u16(),
        }),
    }
}

/// Render a reqwest error with its causes, which carry the useful detail.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn fetch_page<E: LogEntry>(&self, offset: u64, limit: u32) -> Result<Vec<E>> {
        let url = self.config.resource_url(E::KIND);
        debug!(%url, offset, limit, "requesting page");

        let response = self
            .http_client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .header("x-api-secret-key", &self.config.secret_key)
            .header(header::ACCEPT, "application/json")
            .query(&[("offset", offset), ("limit", u64::from(limit))])
            .send()
            .await
            .map_err(|e| SyncError::Transport(describe(&e)))?;

        // Dropping the response on the error path releases the connection.
        classify(response.status())?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::Transport(describe(&e)))?;
        decode_page(&body)
    }
}
