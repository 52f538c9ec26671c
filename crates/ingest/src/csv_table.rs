use crate::error::IngestError;
use core_types::{CellValue, Column, ColumnType, Table};
use std::collections::HashSet;
use std::path::Path;

/// Parses a CSV file (header row required) into a typed table.
///
/// The file is read twice: a first pass infers each column's type from every
/// non-empty field, the second converts the fields. A column whose fields are
/// all empty is typed `Real` and holds only NULLs.
pub fn read_csv_table(path: &Path, table_name: &str) -> Result<Table, IngestError> {
    let headers = read_headers(path)?;
    let column_types = infer_column_types(path, headers.len())?;

    let columns = headers
        .into_iter()
        .zip(&column_types)
        .map(|(name, column_type)| Column::new(name, *column_type))
        .collect();
    let mut table = Table::new(table_name, columns);

    let mut reader = open_reader(path)?;
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let row = record
            .iter()
            .zip(&column_types)
            .map(|(field, column_type)| CellValue::from_field(field, *column_type))
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().has_headers(true).from_reader(file))
}

fn read_headers(path: &Path) -> Result<Vec<String>, IngestError> {
    let mut reader = open_reader(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let invalid = |message: String| IngestError::InvalidHeader {
        path: path.to_path_buf(),
        message,
    };

    if headers.is_empty() {
        return Err(invalid("file has no header row".to_string()));
    }
    {
        let mut seen = HashSet::new();
        for (index, name) in headers.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(invalid(format!("column {} has an empty name", index + 1)));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!("column '{name}' appears more than once")));
            }
        }
    }
    Ok(headers)
}

fn infer_column_types(path: &Path, width: usize) -> Result<Vec<ColumnType>, IngestError> {
    let mut inferred: Vec<Option<ColumnType>> = vec![None; width];

    let mut reader = open_reader(path)?;
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        for (slot, field) in inferred.iter_mut().zip(record.iter()) {
            if let Some(field_type) = ColumnType::classify(field) {
                *slot = Some(slot.map_or(field_type, |current| current.widen(field_type)));
            }
        }
    }

    Ok(inferred
        .into_iter()
        .map(|t| t.unwrap_or(ColumnType::Real))
        .collect())
}
