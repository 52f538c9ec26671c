//! # Inventory Pipeline
//!
//! Orchestrates one batch run over the store:
//!
//! Loader → (raw tables) → Summary Builder → Metric Enricher → Persister
//!
//! Each stage is owned by its own crate; this crate only sequences them,
//! carries the settings through, and reports what happened.

use analytics::MetricEnricher;
use configuration::Settings;
use database::DbRepository;
use ingest::{BulkLoader, IngestReport};
use uuid::Uuid;

pub mod error;

pub use error::PipelineError;

/// How many rows of each intermediate relation are written to the debug log.
const LOG_HEAD_ROWS: usize = 5;

/// What the summarize stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub table: String,
    pub rows_written: u64,
    /// (vendor, brand) pairs with purchases but no matching sales.
    pub rows_without_sales: usize,
}

pub struct Pipeline {
    run_id: Uuid,
    settings: Settings,
    db_repo: DbRepository,
}

impl Pipeline {
    pub fn new(settings: Settings, db_repo: DbRepository) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            settings,
            db_repo,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Loads every CSV in the configured data directory.
    ///
    /// Per-file failures are returned inside the report; see `ensure_complete`.
    pub async fn ingest(&self) -> Result<IngestReport, PipelineError> {
        let data_dir = &self.settings.ingest.data_dir;
        tracing::info!(run_id = %self.run_id, dir = %data_dir.display(), "Loading raw CSV data...");

        let loader = BulkLoader::new(self.db_repo.clone(), &self.settings.ingest);
        Ok(loader.load_directory(data_dir).await?)
    }

    /// Builds, enriches and persists the vendor summary.
    ///
    /// All-or-nothing: if any stage fails, nothing is written and the previous
    /// summary table (if any) is left as it was.
    pub async fn summarize(&self) -> Result<SummaryOutcome, PipelineError> {
        let table = &self.settings.summary.table_name;

        tracing::info!(run_id = %self.run_id, "Creating Vendor Summary Table...");
        let summary = self.db_repo.build_vendor_summary().await?;
        tracing::info!(rows = summary.len(), "Vendor summary built.");
        for row in summary.iter().take(LOG_HEAD_ROWS) {
            tracing::debug!(?row, "Summary row.");
        }

        tracing::info!(run_id = %self.run_id, "Cleaning Data...");
        let enriched = MetricEnricher::new().enrich(&summary)?;
        for row in enriched.iter().take(LOG_HEAD_ROWS) {
            tracing::debug!(?row, "Enriched row.");
        }
        let rows_without_sales = summary
            .iter()
            .filter(|r| r.total_sales_dollars.is_none())
            .count();
        if rows_without_sales > 0 {
            tracing::warn!(rows_without_sales, "Some vendor/brand pairs have purchases but no sales.");
        }

        tracing::info!(run_id = %self.run_id, table = %table, "Ingesting data...");
        let rows_written = self.db_repo.save_vendor_summary(table, &enriched).await?;

        tracing::info!(run_id = %self.run_id, table = %table, rows_written, "Completed");
        Ok(SummaryOutcome {
            table: table.clone(),
            rows_written,
            rows_without_sales,
        })
    }

    /// Runs the full batch: load, then summarize.
    ///
    /// Files that failed to load do not stop the summary as long as every
    /// source table it reads exists (possibly from an earlier load).
    pub async fn run(&self) -> Result<(IngestReport, SummaryOutcome), PipelineError> {
        let report = self.ingest().await?;
        if !report.is_success() {
            tracing::warn!(
                failed = report.failed().count(),
                "Continuing to the summary despite failed files."
            );
        }
        let outcome = self.summarize().await?;
        Ok((report, outcome))
    }
}

/// Turns a report with failed files into an error, for callers that treat
/// any failed file as a failed run.
pub fn ensure_complete(report: &IngestReport) -> Result<(), PipelineError> {
    let failed = report.failed().count();
    if failed == 0 {
        Ok(())
    } else {
        Err(PipelineError::PartialLoad {
            failed,
            total: report.loads.len(),
        })
    }
}
