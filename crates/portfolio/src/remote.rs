//! Remote project feeds.
//!
//! A [`RemoteSource`] produces the raw JSON payload; decoding it into
//! records is left to [`crate::record::records_from_payload`] so every
//! source shares the same tolerant shape rules.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Something that can fetch a project payload.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx status, or a body that
    /// is not JSON.
    async fn fetch(&self) -> Result<Value>;
}

/// HTTP GET against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpSource {
    /// Create a source for `endpoint` with the given request timeout.
    ///
    /// A `None` endpoint yields a source whose every fetch fails with
    /// [`Error::RemoteNotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Create a source reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    /// The configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch(&self) -> Result<Value> {
        let url = self.endpoint.as_deref().ok_or(Error::RemoteNotConfigured)?;

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
