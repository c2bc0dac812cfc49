//! Search index error types.
//!
//! This module defines the unified error type returned by every
//! `SearchIndexProvider` operation.

use thiserror::Error;

/// Unified errors from search backend operations.
///
/// Covers both transport-level failures (connection, timeouts) and cluster-side
/// rejections of a whole request. Rejections of individual documents inside a
/// successful bulk request are not errors; they are reported as
/// [`BulkFailure`](crate::types::BulkFailure) values.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Invalid input (e.g., an empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish or verify the connection to the cluster.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to check whether an index exists.
    #[error("Index check error: {0}")]
    IndexCheckError(String),

    /// Failed to delete an index.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The bulk request as a whole failed.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to parse a response from the cluster.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index check error.
    pub fn index_check(msg: impl Into<String>) -> Self {
        Self::IndexCheckError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchIndexError::connection("ping returned 401").to_string(),
            "Connection error: ping returned 401"
        );
        assert_eq!(
            SearchIndexError::index_creation("mapper_parsing_exception").to_string(),
            "Index creation error: mapper_parsing_exception"
        );
        assert_eq!(
            SearchIndexError::bulk_index("timed out").to_string(),
            "Bulk index error: timed out"
        );
    }
}
