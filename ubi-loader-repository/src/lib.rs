//! # UBI Loader Repository
//!
//! This crate provides the trait and the OpenSearch implementation used by the
//! UBI loader to talk to a search cluster: connection setup, index
//! administration and bulk document writes.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{ConnectionConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchProvider;
pub use types::{BulkFailure, BulkIndexSummary, BulkRecord};
