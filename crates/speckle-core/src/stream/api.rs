//! Remote streams API traits.

use super::model::StreamSummary;
use crate::account::Session;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the remote service's stream endpoints.
///
/// Implementations are bound to one endpoint and token at construction time.
#[async_trait]
pub trait StreamsApi: Send + Sync {
    /// Lists every stream visible to the bound account using the lean
    /// projection, in the order returned by the service.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<StreamSummary>)`: The service answered successfully
    /// - `Err(SpeckleError::RemoteFetch)`: Network, status or payload failure
    async fn list_streams_lean(&self) -> Result<Vec<StreamSummary>>;
}

/// Builds API clients for a resolved session.
pub trait StreamsApiFactory: Send + Sync {
    /// Creates a client configured with the session's endpoint and token.
    fn create(&self, session: &Session) -> Result<Arc<dyn StreamsApi>>;
}
