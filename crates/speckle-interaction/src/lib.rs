//! Remote service clients.

pub mod streams_api;

pub use streams_api::{HttpStreamsApi, HttpStreamsApiFactory};
