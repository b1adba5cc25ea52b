use crate::core::models::structure::Structure;
use std::fmt;

/// Identifies a row in progress messages and error reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RowKey(pub String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// A single input cell.
///
/// `Missing` is an absent value. It is distinct from a present cell that
/// happens to hold the wrong kind of value.
#[derive(Debug, Clone)]
pub enum Cell {
    Missing,
    Structure(Structure),
    Real(f64),
    Integer(i64),
    Text(String),
}

impl Cell {
    /// Short name of the cell's value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Missing => "missing",
            Cell::Structure(_) => "structure",
            Cell::Real(_) => "real",
            Cell::Integer(_) => "integer",
            Cell::Text(_) => "text",
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub key: RowKey,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(key: impl Into<RowKey>, cells: Vec<Cell>) -> Self {
        Self {
            key: key.into(),
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCell {
    Values(Vec<f64>),
    Missing,
}

impl OutputCell {
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, OutputCell::Missing)
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            OutputCell::Values(values) => Some(values),
            OutputCell::Missing => None,
        }
    }
}

/// One output cell per declared output column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow(Vec<OutputCell>);

impl OutputRow {
    pub fn new(cells: Vec<OutputCell>) -> Self {
        Self(cells)
    }

    /// A row of `width` missing cells.
    pub fn missing(width: usize) -> Self {
        Self(vec![OutputCell::Missing; width])
    }

    pub fn cells(&self) -> &[OutputCell] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<OutputCell> {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all_missing(&self) -> bool {
        self.0.iter().all(OutputCell::is_missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_has_requested_width() {
        let row = OutputRow::missing(4);
        assert_eq!(row.len(), 4);
        assert!(row.is_all_missing());
        assert!(OutputRow::missing(0).is_empty());
    }

    #[test]
    fn cell_kinds_distinguish_missing_from_wrong_kind() {
        assert!(Cell::Missing.is_missing());
        assert!(!Cell::Text(String::new()).is_missing());
        assert_eq!(Cell::Integer(3).kind(), "integer");
        assert_eq!(Cell::Structure(Structure::new()).kind(), "structure");
    }

    #[test]
    fn output_cell_exposes_values() {
        let cell = OutputCell::Values(vec![1.0, 2.0]);
        assert_eq!(cell.values(), Some(&[1.0, 2.0][..]));
        assert_eq!(OutputCell::Missing.values(), None);
    }
}
