use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),

    #[error("Enrichment error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("{failed} of {total} files failed to load")]
    PartialLoad { failed: usize, total: usize },
}
