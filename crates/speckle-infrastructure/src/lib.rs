//! Infrastructure layer: file locations, configuration loading, the JSON
//! account store and node snapshot persistence.

pub mod account_store;
pub mod config_service;
pub mod paths;
pub mod snapshot_storage;

pub use account_store::JsonAccountStore;
pub use config_service::ConfigService;
pub use paths::SpecklePaths;
pub use snapshot_storage::NodeSnapshotStorage;
