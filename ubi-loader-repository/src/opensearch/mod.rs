//! OpenSearch implementation of the search index provider.
//!
//! The `opensearch` client speaks the same REST dialect as Elasticsearch for
//! every call the loader makes (ping, index admin, bulk), so this provider is
//! used for both.

mod auth;
mod bulk;
mod provider;

pub use provider::OpenSearchProvider;
