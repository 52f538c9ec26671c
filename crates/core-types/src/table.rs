use crate::error::CoreError;
use serde::Serialize;

/// The storage class of a column, mirroring SQLite's type affinities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    /// The SQL type name used in `CREATE TABLE`.
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }

    /// Classifies a single raw field. Returns `None` for an empty field,
    /// which carries no type information.
    pub fn classify(raw: &str) -> Option<ColumnType> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.parse::<i64>().is_ok() {
            Some(ColumnType::Integer)
        } else if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
            Some(ColumnType::Real)
        } else {
            Some(ColumnType::Text)
        }
    }

    /// The narrowest type able to hold values of both `self` and `other`.
    pub fn widen(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (ColumnType::Text, _) | (_, ColumnType::Text) => ColumnType::Text,
            (ColumnType::Real, _) | (_, ColumnType::Real) => ColumnType::Real,
            _ => ColumnType::Integer,
        }
    }
}

/// A single cell of a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    /// Converts a raw field into a value of the given column type.
    ///
    /// Empty fields become `Null`. The column type must have been inferred
    /// from the same data, so a numeric column only ever sees numeric fields;
    /// anything that still fails to parse is kept as text rather than dropped.
    pub fn from_field(raw: &str, column_type: ColumnType) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match column_type {
            ColumnType::Integer => trimmed
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnType::Real => trimmed
                .parse::<f64>()
                .map(CellValue::Real)
                .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
            ColumnType::Text => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Real)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// An in-memory relation: a named, typed set of columns and its rows.
///
/// This is the unit the loader produces from a CSV file and the unit the
/// database writes with replace semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, rejecting one whose width does not match the columns.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), CoreError> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                table: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_fields() {
        assert_eq!(ColumnType::classify(""), None);
        assert_eq!(ColumnType::classify("   "), None);
        assert_eq!(ColumnType::classify("42"), Some(ColumnType::Integer));
        assert_eq!(ColumnType::classify(" -7 "), Some(ColumnType::Integer));
        assert_eq!(ColumnType::classify("3.25"), Some(ColumnType::Real));
        assert_eq!(ColumnType::classify("1e3"), Some(ColumnType::Real));
        assert_eq!(ColumnType::classify("750mL"), Some(ColumnType::Text));
        assert_eq!(ColumnType::classify("inf"), Some(ColumnType::Text));
        assert_eq!(ColumnType::classify("NaN"), Some(ColumnType::Text));
    }

    #[test]
    fn widen_prefers_the_more_general_type() {
        use ColumnType::*;
        assert_eq!(Integer.widen(Integer), Integer);
        assert_eq!(Integer.widen(Real), Real);
        assert_eq!(Real.widen(Integer), Real);
        assert_eq!(Real.widen(Text), Text);
        assert_eq!(Text.widen(Integer), Text);
    }

    #[test]
    fn from_field_respects_column_type() {
        assert_eq!(CellValue::from_field("", ColumnType::Integer), CellValue::Null);
        assert_eq!(CellValue::from_field("12", ColumnType::Integer), CellValue::Integer(12));
        assert_eq!(CellValue::from_field("12", ColumnType::Real), CellValue::Real(12.0));
        assert_eq!(
            CellValue::from_field(" Tito's  ", ColumnType::Text),
            CellValue::Text(" Tito's  ".to_string())
        );
    }

    #[test]
    fn push_row_checks_width() {
        let mut table = Table::new(
            "t",
            vec![
                Column::new("a", ColumnType::Integer),
                Column::new("b", ColumnType::Text),
            ],
        );
        table
            .push_row(vec![CellValue::Integer(1), CellValue::Null])
            .unwrap();
        let err = table.push_row(vec![CellValue::Integer(2)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::RowWidth { row: 1, expected: 2, found: 1, .. }
        ));
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
