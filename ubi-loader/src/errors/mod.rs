//! Error types for the loader components.
//!
//! Each component returns its own error type; the orchestrator converts them
//! into [`LoaderError`](crate::LoaderError) and `main` decides the exit status.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use ubi_loader_repository::SearchIndexError;

/// Errors from reading the index mapping file.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The mapping file does not exist.
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    /// The mapping file is not valid JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The mapping file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from reading the NDJSON bulk file.
///
/// Malformed lines are not errors; they become
/// [`ParseWarning`](crate::parser::ParseWarning)s.
#[derive(Error, Debug)]
pub enum BulkFileError {
    /// The bulk file does not exist.
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    /// The bulk file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BulkFileError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// The step of index provisioning that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    /// Checking whether the index exists.
    Check,
    /// Deleting the existing index.
    Delete,
    /// Creating the index with its mapping.
    Create,
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            Self::Check => "check",
            Self::Delete => "delete",
            Self::Create => "create",
        };
        f.write_str(step)
    }
}

/// Failed to (re)create an index.
#[derive(Error, Debug)]
#[error("Failed to {step} index '{index}': {source}")]
pub struct ProvisionError {
    /// The index being provisioned.
    pub index: String,
    /// The step that failed.
    pub step: ProvisionStep,
    /// The underlying cluster error.
    #[source]
    pub source: SearchIndexError,
}

/// Errors from submitting records to the cluster.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Nothing to submit.
    #[error("No documents to index")]
    EmptyBatch,

    /// A bulk request failed as a whole (connectivity loss, timeout, rejected request).
    #[error("Bulk request for chunk {chunk} failed after {accepted} documents were accepted: {source}")]
    Bulk {
        /// 1-based number of the chunk that failed.
        chunk: usize,
        /// Documents accepted by earlier chunks.
        accepted: usize,
        #[source]
        source: SearchIndexError,
    },
}
