//! Node domain module.
//!
//! - `model`: Lifecycle state, annotations, port metadata and persisted snapshot
//! - `host`: Host graph runtime trait (`GraphHost`)

mod host;
mod model;

pub use host::{DetachedHost, GraphHost};
pub use model::{
    NodeDescriptor, NodeMessage, NodeSnapshot, NodeState, OutputValue, PortSpec, Severity,
};
