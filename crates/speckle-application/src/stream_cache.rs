use speckle_core::stream::StreamSummary;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// One successful listing, as last written to the cache.
#[derive(Debug)]
pub struct CacheEntry {
    checked_at: Instant,
    streams: Arc<[StreamSummary]>,
}

impl CacheEntry {
    /// Monotonic time the listing was stored.
    pub fn checked_at(&self) -> Instant {
        self.checked_at
    }

    /// Streams in the order the service returned them.
    pub fn streams(&self) -> &Arc<[StreamSummary]> {
        &self.streams
    }

    /// Returns `true` while the entry is younger than `window`.
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.checked_at.elapsed() < window
    }
}

/// Short-lived stream listing cache shared by every node.
///
/// Entries are replaced as a whole; readers see either the previous or the
/// next entry, never a mix. Concurrent writers resolve last-writer-wins.
#[derive(Debug, Default)]
pub struct StreamCache {
    entry: RwLock<Option<Arc<CacheEntry>>>,
}

static SHARED: OnceLock<Arc<StreamCache>> = OnceLock::new();

impl StreamCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache instance.
    pub fn shared() -> Arc<Self> {
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// Returns the cached streams if they were stored less than `window` ago.
    pub fn fresh(&self, window: Duration) -> Option<Arc<[StreamSummary]>> {
        self.current()
            .filter(|entry| entry.is_fresh(window))
            .map(|entry| entry.streams.clone())
    }

    /// Returns the latest entry regardless of age.
    pub fn current(&self) -> Option<Arc<CacheEntry>> {
        self.entry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Overwrites the cache with a new listing stamped with the current time.
    pub fn store(&self, streams: Vec<StreamSummary>) -> Arc<[StreamSummary]> {
        let entry = Arc::new(CacheEntry {
            checked_at: Instant::now(),
            streams: streams.into(),
        });
        let streams = entry.streams.clone();

        *self
            .entry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(entry);

        streams
    }
}
