use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Row {row} of table '{table}' has {found} cells, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}
