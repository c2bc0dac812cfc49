//! Dependency initialization and wiring for the UBI loader.

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::loader::{BulkLoader, LoaderConfig};
use crate::orchestrator::{Orchestrator, RunPlan};
use crate::provisioner::IndexProvisioner;
use crate::LoaderError;
use ubi_loader_repository::{OpenSearchProvider, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect to the cluster and wire the pipeline.
    ///
    /// The connection is attempted once. A failed ping is returned as
    /// `LoaderError::ConnectionError` before any index is touched.
    pub async fn new(config: &AppConfig) -> Result<Self, LoaderError> {
        info!(
            host = %config.connection.host,
            timeout_secs = config.connection.request_timeout.as_secs(),
            mapping_file = %config.mapping_file.display(),
            bulk_file = %config.bulk_file.display(),
            indices = ?config.index_names,
            chunk_size = config.chunk_size,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::connect(&config.connection).await?;

        Ok(Self::with_provider(Arc::new(provider), config))
    }

    /// Wire the pipeline around an existing provider.
    pub fn with_provider(provider: Arc<dyn SearchIndexProvider>, config: &AppConfig) -> Self {
        let provisioner = IndexProvisioner::new(provider.clone());
        let loader = BulkLoader::with_config(
            provider,
            LoaderConfig {
                chunk_size: config.chunk_size,
            },
        );
        let plan = RunPlan {
            mapping_file: config.mapping_file.clone(),
            index_names: config.index_names.clone(),
            bulk_file: config.bulk_file.clone(),
        };

        Self {
            orchestrator: Orchestrator::new(provisioner, loader, plan),
        }
    }
}
