//! # UBI Loader
//!
//! Provisions the User Behavior Insights indices (`ubi_events`, `ubi_queries`)
//! from a mapping file and bulk-loads sample documents from an NDJSON export.
//!
//! ## Architecture
//!
//! The loader is a single sequential pipeline:
//!
//! 1. **Mapping**: Reads the index mapping file
//! 2. **Provisioner**: Drops and recreates each index with the mapping
//! 3. **Parser**: Turns the NDJSON action/document pairs into bulk records
//! 4. **Loader**: Submits the records in chunks and reports per-document failures
//! 5. **Orchestrator**: Runs the steps in order and stops at the first fatal error
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency wiring
//! - [`mapping`]: Mapping file loading
//! - [`provisioner`]: Index (re)creation
//! - [`parser`]: NDJSON bulk file parsing
//! - [`loader`]: Chunked bulk submission
//! - [`orchestrator`]: Pipeline sequencing
//! - [`status`]: Operator-facing console lines
//! - [`errors`]: Component error types

pub mod config;
pub mod errors;
pub mod loader;
pub mod mapping;
pub mod orchestrator;
pub mod parser;
pub mod provisioner;
pub mod status;

pub use config::{AppConfig, Dependencies};
pub use errors::{BulkFileError, MappingError, ProvisionError, SubmitError};

use thiserror::Error;
use ubi_loader_repository::SearchIndexError;

/// Errors that stop the loader. Any of these makes the process exit non-zero.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Could not connect to the search cluster.
    #[error("Connection error: {0}")]
    ConnectionError(#[from] SearchIndexError),

    /// Could not load the index mapping.
    #[error("Mapping error: {0}")]
    MappingError(#[from] MappingError),

    /// Could not (re)create an index.
    #[error("Provision error: {0}")]
    ProvisionError(#[from] ProvisionError),

    /// Could not read the bulk file.
    #[error("Bulk file error: {0}")]
    BulkFileError(#[from] BulkFileError),

    /// Bulk submission failed as a whole.
    #[error("Submit error: {0}")]
    SubmitError(#[from] SubmitError),
}

impl LoaderError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
