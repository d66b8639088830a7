//! Host graph runtime trait.

use uuid::Uuid;

/// The host graph a node is attached to.
pub trait GraphHost: Send + Sync {
    /// Marks the node as modified so the host re-evaluates its output and
    /// everything downstream of it.
    fn request_reevaluation(&self, node_id: Uuid);
}

/// A host that ignores re-evaluation requests, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl GraphHost for DetachedHost {
    fn request_reevaluation(&self, _node_id: Uuid) {}
}
