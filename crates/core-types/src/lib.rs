pub mod error;
pub mod records;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use records::{EnrichedSummaryRow, VendorSummaryRow, VENDOR_SUMMARY_COLUMNS};
pub use table::{CellValue, Column, ColumnType, Table};
