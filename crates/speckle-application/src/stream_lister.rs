//! Stream listing with a shared freshness cache.

use crate::stream_cache::StreamCache;
use speckle_core::account::Session;
use speckle_core::stream::{StreamSummary, StreamsApi, StreamsApiFactory};
use speckle_core::{Result, SpeckleError};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one listing attempt.
#[derive(Debug, Clone)]
pub enum Listing {
    /// Served from the shared cache; no remote call was made
    Cached(Arc<[StreamSummary]>),
    /// Fetched from the service and written to the cache
    Fetched(Arc<[StreamSummary]>),
    /// The remote call failed; the cache was left alone
    Failed(SpeckleError),
}

impl Listing {
    /// The listed streams, if the attempt produced any.
    pub fn streams(&self) -> Option<&Arc<[StreamSummary]>> {
        match self {
            Self::Cached(streams) | Self::Fetched(streams) => Some(streams),
            Self::Failed(_) => None,
        }
    }
}

/// Lists the streams visible to a session.
#[derive(Clone)]
pub struct StreamLister {
    cache: Arc<StreamCache>,
    factory: Arc<dyn StreamsApiFactory>,
    freshness: Duration,
}

impl StreamLister {
    pub fn new(
        cache: Arc<StreamCache>,
        factory: Arc<dyn StreamsApiFactory>,
        freshness: Duration,
    ) -> Self {
        Self {
            cache,
            factory,
            freshness,
        }
    }

    /// The cache this lister reads and writes.
    pub fn cache(&self) -> &Arc<StreamCache> {
        &self.cache
    }

    /// Lists streams, from cache when fresh, otherwise with one remote call.
    ///
    /// Never fails; remote errors come back as [`Listing::Failed`].
    pub async fn list_streams(&self, session: &Session) -> Listing {
        self.list_streams_with(session, |_| async {}).await
    }

    /// Like [`StreamLister::list_streams`], awaiting `on_fetch` with the new
    /// client after a cache miss and before the remote call goes out.
    pub async fn list_streams_with<F, Fut>(&self, session: &Session, on_fetch: F) -> Listing
    where
        F: FnOnce(Arc<dyn StreamsApi>) -> Fut,
        Fut: Future<Output = ()>,
    {
        if let Some(streams) = self.cached() {
            return Listing::Cached(streams);
        }

        let client = match self.factory.create(session) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Could not create streams client");
                return Listing::Failed(e);
            }
        };

        on_fetch(client.clone()).await;

        match self.fetch(client).await {
            Ok(streams) => Listing::Fetched(streams),
            Err(e) => Listing::Failed(e),
        }
    }

    fn cached(&self) -> Option<Arc<[StreamSummary]>> {
        let streams = self.cache.fresh(self.freshness)?;
        tracing::debug!(count = streams.len(), "Serving streams from cache");
        Some(streams)
    }

    /// Performs the remote listing on a runtime worker and caches the result.
    ///
    /// The spawned task runs to completion even if the caller stops waiting, so
    /// a successful fetch always reaches the cache.
    async fn fetch(&self, client: Arc<dyn StreamsApi>) -> Result<Arc<[StreamSummary]>> {
        let cache = self.cache.clone();
        let task = tokio::spawn(async move {
            let streams = client.list_streams_lean().await?;
            Ok::<_, SpeckleError>(cache.store(streams))
        });

        let outcome = task
            .await
            .unwrap_or_else(|e| Err(SpeckleError::remote_fetch(format!("Fetch task aborted: {}", e))));

        match &outcome {
            Ok(streams) => tracing::info!(count = streams.len(), "Fetched streams"),
            Err(e) => tracing::warn!(error = %e, "Failed to fetch streams"),
        }
        outcome
    }
}
