//! Account domain module.
//!
//! # Module Structure
//!
//! - `model`: Stored account record (`Account`) and resolved `Session`
//! - `store`: Local account store trait (`AccountStore`)
//! - `picker`: Interactive account selection trait (`AccountPicker`)

mod model;
mod picker;
mod store;

// Re-export public API
pub use model::{Account, Session};
pub use picker::AccountPicker;
pub use store::AccountStore;
