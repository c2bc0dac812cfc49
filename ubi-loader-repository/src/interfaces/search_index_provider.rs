//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the cluster operations the
//! loader needs: liveness, index administration and bulk writes.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BulkIndexSummary, BulkRecord};

/// Abstracts the underlying search cluster (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are shared behind an `Arc` between the index provisioner and
/// the bulk loader. Every method returns `Result<T, SearchIndexError>`; callers
/// decide whether an error is fatal.
///
/// # Per-document failures
///
/// `bulk_index` only returns `Err` when the request itself fails (transport
/// error, timeout, non-success HTTP status). Documents rejected by the cluster
/// inside an accepted request are reported through
/// [`BulkIndexSummary::failures`].
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check that the cluster is reachable and accepts our credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the cluster answered the ping with a success status
    /// * `Err(SearchIndexError)` - If the request failed or was rejected
    async fn ping(&self) -> Result<(), SearchIndexError>;

    /// Check whether an index with the given name exists.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(SearchIndexError)` - If the check could not be performed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Delete an index together with its mapping and all of its documents.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Create an index using `body` (settings and mappings) as the creation request.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - The index creation body, passed through unmodified
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError>;

    /// Write a batch of records with a single bulk request.
    ///
    /// Each record is routed to its own `target_index`.
    ///
    /// # Arguments
    ///
    /// * `records` - The records to index, in order
    ///
    /// # Returns
    ///
    /// * `Ok(BulkIndexSummary)` - Per-request statistics and per-document failures
    /// * `Err(SearchIndexError)` - If the bulk request as a whole failed
    async fn bulk_index(&self, records: &[BulkRecord]) -> Result<BulkIndexSummary, SearchIndexError>;
}
