use thiserror::Error;

use super::row::RowKey;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Output column {index} ('{name}') does not name a known weighting scheme")]
    UnmatchedColumn { index: usize, name: String },

    #[error("Duplicate weighting scheme identifier: {0}")]
    DuplicateScheme(String),

    #[error("Duplicate weighting scheme title: {0}")]
    DuplicateTitle(String),

    #[error("Unknown weighting scheme: {0}")]
    UnknownScheme(String),

    #[error("A fixed weighting scheme needs exactly one output column, got {found}")]
    FixedSchemeWidth { found: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Row {row}: column {column} holds {found}, expected a structure")]
    TypeMismatch {
        row: RowKey,
        column: usize,
        found: &'static str,
    },

    #[error("Row {row}: structure column {column} is out of range (row has {width} cells)")]
    ColumnOutOfRange {
        row: RowKey,
        column: usize,
        width: usize,
    },

    #[error("Row {row}: descriptor computation for scheme '{scheme}' failed: {message}")]
    Computation {
        row: RowKey,
        scheme: String,
        message: String,
    },
}
