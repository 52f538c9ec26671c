use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header in {}: {message}", .path.display())]
    InvalidHeader { path: PathBuf, message: String },

    #[error("Cannot derive a table name from {}", .0.display())]
    NoTableName(PathBuf),

    #[error("Database error while loading: {0}")]
    Database(#[from] database::DbError),

    #[error("Table construction error: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Progress bar template error: {0}")]
    ProgressBarTemplate(String),
}

impl From<indicatif::style::TemplateError> for IngestError {
    fn from(error: indicatif::style::TemplateError) -> Self {
        IngestError::ProgressBarTemplate(error.to_string())
    }
}
