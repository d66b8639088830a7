//! Node domain models.

use crate::account::Session;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of one node attachment.
///
/// ```text
/// Unbound -> Resolving -> Cached   -> Idle
///                      -> Fetching -> Idle | Stale
///            Resolving -> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// No session bound yet
    #[default]
    Unbound,
    /// Session resolver running
    Resolving,
    /// Serving the stream list from the shared cache
    Cached,
    /// Remote fetch in flight
    Fetching,
    /// Listing settled
    Idle,
    /// Remote fetch failed; the previous list is kept
    Stale,
    /// No account could be resolved
    Failed,
}

/// Severity of a node annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A user-visible annotation shown on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMessage {
    pub severity: Severity,
    pub text: String,
}

impl NodeMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

impl fmt::Display for NodeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.text),
            Severity::Error => write!(f, "error: {}", self.text),
        }
    }
}

/// Declaration of one output port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
}

/// Static metadata a host uses to register the node in its library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub outputs: &'static [PortSpec],
}

/// Value emitted on an output port for downstream evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputValue {
    pub port: String,
    pub value: String,
}

/// Persisted state of a streams node.
///
/// Authentication fields are saved so a reloaded node reattaches without an
/// account prompt. The stream list is never part of the snapshot.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node_id: Uuid,
    #[serde(default)]
    pub rest_api: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub stream_id: Option<String>,
}

impl NodeSnapshot {
    /// Rebuilds the bound session, if the snapshot holds a token and endpoint.
    pub fn session(&self) -> Option<Session> {
        let auth_token = self.auth_token.clone().filter(|t| !t.is_empty())?;
        let endpoint_url = self.rest_api.clone().filter(|u| !u.is_empty())?;
        Some(Session {
            auth_token,
            endpoint_url,
            account_email: self.email.clone().unwrap_or_default(),
            server_name: self.server.clone().unwrap_or_default(),
        })
    }
}

impl fmt::Debug for NodeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSnapshot")
            .field("node_id", &self.node_id)
            .field("rest_api", &self.rest_api)
            .field("email", &self.email)
            .field("server", &self.server)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("stream_id", &self.stream_id)
            .finish()
    }
}
