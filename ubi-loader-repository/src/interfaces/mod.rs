//! Interface definitions for the search index provider.
//!
//! The `SearchIndexProvider` trait lets the loader run against OpenSearch or
//! Elasticsearch in production and against in-memory mocks in tests.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
