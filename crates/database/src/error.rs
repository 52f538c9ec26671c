use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("'{0}' is not a usable table or column name")]
    InvalidIdentifier(String),

    #[error("Table '{0}' has no columns")]
    EmptySchema(String),

    #[error("Required source table '{0}' does not exist; load it first")]
    MissingTable(String),

    #[error("Column '{0}' is NULL but a value is required")]
    UnexpectedNull(String),

    #[error("Invalid table data: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Column '{column}' holds a value that is not a finite number: {value}")]
    Decode { column: String, value: String },
}
