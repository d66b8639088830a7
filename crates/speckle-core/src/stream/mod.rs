//! Stream domain module.
//!
//! - `model`: Lean stream projection (`StreamSummary`)
//! - `api`: Remote service traits (`StreamsApi`, `StreamsApiFactory`)

mod api;
mod model;

pub use api::{StreamsApi, StreamsApiFactory};
pub use model::StreamSummary;
