//! Error types for the Speckle streams node.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// The variants follow the node's failure taxonomy: authentication failures are
/// user-visible and terminal for one attach cycle, remote fetch failures are
/// absorbed into a stale listing, and local store failures are swallowed by the
/// session resolver.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SpeckleError {
    /// No usable account could be resolved
    #[error("{0}")]
    AuthFailure(String),

    /// Listing streams from the remote service failed
    #[error("Remote fetch failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RemoteFetch { status: Option<u16>, message: String },

    /// Reading the local account store failed
    #[error("Local account store error: {0}")]
    LocalStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// The UI-affinity context has shut down and can no longer run jobs
    #[error("UI context is no longer running")]
    UiUnavailable,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpeckleError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an AuthFailure error
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self::AuthFailure(message.into())
    }

    /// Creates a RemoteFetch error without an HTTP status
    pub fn remote_fetch(message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a RemoteFetch error carrying the HTTP status code
    pub fn remote_status(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteFetch {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a LocalStore error
    pub fn local_store(message: impl Into<String>) -> Self {
        Self::LocalStore(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an authentication failure
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailure(_))
    }

    /// Check if this is a remote fetch failure
    pub fn is_remote_fetch(&self) -> bool {
        matches!(self, Self::RemoteFetch { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SpeckleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SpeckleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SpeckleError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SpeckleError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for SpeckleError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SpeckleError>`.
pub type Result<T> = std::result::Result<T, SpeckleError>;
