//! # Inventory Ingest Crate
//!
//! The bulk loader: turns a directory of CSV files into tables in the store,
//! one table per file, named after the file stem.
//!
//! Each file is parsed into a typed `Table` (column types inferred from the
//! data) and written with replace semantics. Failures are reported per file
//! in an `IngestReport` instead of aborting the whole batch, unless the loader
//! is configured to fail fast.

pub mod csv_table;
pub mod error;
pub mod loader;

pub use csv_table::read_csv_table;
pub use error::IngestError;
pub use loader::{discover_csv_files, table_name_for, BulkLoader, IngestReport, TableLoad};
