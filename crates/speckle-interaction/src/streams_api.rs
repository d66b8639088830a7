//! HTTP client for the Speckle streams endpoint.
//!
//! Talks to the REST API of a Speckle server:
//!
//! ```text
//! GET {rest_api}/streams?omit=objects,layers,baseProperties
//! Authorization: Bearer <token>
//!
//! { "success": true, "message": "...", "resources": [ { "streamId": "...", ... } ] }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use speckle_core::account::Session;
use speckle_core::stream::{StreamSummary, StreamsApi, StreamsApiFactory};
use speckle_core::{Result, SpeckleError};
use std::sync::Arc;
use std::time::Duration;

/// Fields dropped from each stream for the lean listing.
const LEAN_OMIT: &str = "objects,layers,baseProperties";

#[derive(Debug, Deserialize)]
struct StreamsResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    resources: Vec<StreamSummary>,
}

fn default_success() -> bool {
    true
}

/// Streams API client bound to one endpoint and token.
#[derive(Clone)]
pub struct HttpStreamsApi {
    client: Client,
    base_url: String,
    auth_token: String,
    timeout: Duration,
}

impl HttpStreamsApi {
    /// Creates a client for `base_url` that authenticates with `auth_token`.
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            timeout,
        }
    }

    /// The REST API base this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn streams_url(&self) -> String {
        format!("{}/streams", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl StreamsApi for HttpStreamsApi {
    async fn list_streams_lean(&self) -> Result<Vec<StreamSummary>> {
        let url = self.streams_url();
        tracing::debug!(url = %url, "Listing streams");

        let response = self
            .client
            .get(&url)
            .query(&[("omit", LEAN_OMIT)])
            .bearer_auth(&self.auth_token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SpeckleError::remote_fetch(format!("Failed to list streams: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SpeckleError::remote_status(status.as_u16(), error_text));
        }

        let body: StreamsResponse = response
            .json()
            .await
            .map_err(|e| SpeckleError::remote_fetch(format!("Failed to parse streams response: {}", e)))?;

        if !body.success {
            return Err(SpeckleError::remote_fetch(
                body.message.unwrap_or_else(|| "Server reported failure".to_string()),
            ));
        }

        Ok(body.resources)
    }
}

/// Builds [`HttpStreamsApi`] clients sharing one connection pool.
#[derive(Clone)]
pub struct HttpStreamsApiFactory {
    client: Client,
    timeout: Duration,
    rest_api_override: Option<String>,
}

impl HttpStreamsApiFactory {
    /// Creates a factory whose clients time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
            rest_api_override: None,
        }
    }

    /// Sends every request to `rest_api` regardless of the session's endpoint.
    pub fn with_rest_api_override(mut self, rest_api: Option<String>) -> Self {
        self.rest_api_override = rest_api.filter(|url| !url.is_empty());
        self
    }
}

impl StreamsApiFactory for HttpStreamsApiFactory {
    fn create(&self, session: &Session) -> Result<Arc<dyn StreamsApi>> {
        let base_url = self
            .rest_api_override
            .clone()
            .unwrap_or_else(|| session.endpoint_url.clone());

        if base_url.is_empty() {
            return Err(SpeckleError::config("Session has no REST API endpoint"));
        }

        Ok(Arc::new(HttpStreamsApi::new(
            self.client.clone(),
            base_url,
            session.auth_token.clone(),
            self.timeout,
        )))
    }
}
