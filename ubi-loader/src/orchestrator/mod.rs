//! Orchestrator module for the UBI loader.
//!
//! Runs the pipeline in order: load mappings, provision indices, parse the
//! bulk file, submit records. The first fatal error stops the run.

use std::path::PathBuf;
use tracing::{info, instrument};

use crate::loader::BulkLoader;
use crate::mapping::load_mapping;
use crate::parser::parse_bulk_file;
use crate::provisioner::{IndexProvisioner, ProvisionOutcome};
use crate::LoaderError;
use ubi_loader_repository::BulkFailure;

/// Files and indices a run operates on.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Mapping file, read once per index.
    pub mapping_file: PathBuf,
    /// Indices to drop and recreate, in order.
    pub index_names: Vec<String>,
    /// NDJSON bulk file.
    pub bulk_file: PathBuf,
}

/// What a successful run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Each provisioned index and whether it already existed.
    pub provisioned: Vec<(String, ProvisionOutcome)>,
    /// Records parsed from the bulk file.
    pub records_parsed: usize,
    /// Lines skipped by the parser.
    pub skipped_lines: usize,
    /// Records the cluster accepted.
    pub accepted: usize,
    /// Records the cluster rejected. These do not fail the run.
    pub failures: Vec<BulkFailure>,
}

/// Orchestrator that sequences the loader components.
pub struct Orchestrator {
    provisioner: IndexProvisioner,
    loader: BulkLoader,
    plan: RunPlan,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(provisioner: IndexProvisioner, loader: BulkLoader, plan: RunPlan) -> Self {
        Self {
            provisioner,
            loader,
            plan,
        }
    }

    /// The plan this orchestrator runs.
    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Run the pipeline once.
    ///
    /// All mappings are loaded before any index is deleted, so a bad mapping
    /// file never leaves the cluster with a dropped index.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary, LoaderError> {
        info!(indices = ?self.plan.index_names, "Starting UBI loader run");

        let mut mappings = Vec::with_capacity(self.plan.index_names.len());
        for index in &self.plan.index_names {
            let mapping = load_mapping(&self.plan.mapping_file).await?;
            mappings.push((index, mapping));
        }

        let mut summary = RunSummary::default();

        for (index, mapping) in &mappings {
            let outcome = self.provisioner.provision(index, mapping).await?;
            summary.provisioned.push((index.to_string(), outcome));
        }

        let parsed = parse_bulk_file(&self.plan.bulk_file).await?;
        summary.records_parsed = parsed.records.len();
        summary.skipped_lines = parsed.warnings.len();

        let report = self.loader.submit(&parsed.records).await?;
        summary.accepted = report.accepted;
        summary.failures = report.failures;

        info!(
            provisioned = summary.provisioned.len(),
            parsed = summary.records_parsed,
            skipped = summary.skipped_lines,
            accepted = summary.accepted,
            failed = summary.failures.len(),
            "UBI loader run completed"
        );

        Ok(summary)
    }
}
