//! Domain layer for the Speckle streams node.
//!
//! Holds the data model, the shared error type and the traits behind which
//! every external collaborator sits: the local account store, the account
//! picker, the remote streams API, the UI context and the host graph.

pub mod account;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod node;
pub mod observable;
pub mod stream;

// Re-export common error type
pub use error::{Result, SpeckleError};
