//! Application layer for the Speckle streams node.
//!
//! Coordinates the domain traits into the node lifecycle: session resolution,
//! cached stream listing and publication of results on the UI context.

pub mod session_resolver;
pub mod stream_cache;
pub mod stream_lister;
pub mod streams_node;
pub mod ui_dispatch;

#[cfg(test)]
mod test_support;

pub use session_resolver::SessionResolver;
pub use stream_cache::StreamCache;
pub use stream_lister::{Listing, StreamLister};
pub use streams_node::{NodeOutputs, NodeServices, StreamsNode};
pub use ui_dispatch::{InlineDispatcher, UiThread};
