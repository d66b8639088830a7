//! Configuration models.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section and
//! field is optional in the file; missing values fall back to the defaults
//! below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default freshness window for the shared stream cache, in seconds.
pub const DEFAULT_FRESHNESS_SECS: u64 = 10;

/// Default timeout for a single remote request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Root configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeckleConfig {
    #[serde(default)]
    pub streams: StreamsSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Stream listing settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamsSettings {
    /// Window after a successful fetch during which listings are served from cache
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    /// Transport timeout for the listing request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl StreamsSettings {
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for StreamsSettings {
    fn default() -> Self {
        Self {
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn default_freshness_secs() -> u64 {
    DEFAULT_FRESHNESS_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Server settings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSettings {
    /// Overrides the REST API of every resolved account (e.g., a local dev server)
    #[serde(default)]
    pub rest_api_override: Option<String>,
}
