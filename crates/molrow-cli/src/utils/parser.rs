use molrow::engine::config::{FragmentSelection, RowErrorPolicy, UnmatchedColumnPolicy};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Column '{0}' is neither a header name nor a valid index.")]
    UnknownColumn(String),

    #[error("Column index {index} is out of range; the table has {width} columns.")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    #[error("Invalid value '{value}' for {kind}. Expected one of: {expected}.")]
    InvalidChoice {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Resolves a column given by header name, or failing that by zero-based index.
pub fn parse_column(column: &str, headers: &[String]) -> Result<usize, ParseError> {
    let column = column.trim();
    if let Some(index) = headers.iter().position(|h| h == column) {
        return Ok(index);
    }
    let index: usize = column
        .parse()
        .map_err(|_| ParseError::UnknownColumn(column.to_string()))?;
    check_column_index(index, headers)
}

/// Accepts a zero-based column index that lies inside the header row.
pub fn check_column_index(index: usize, headers: &[String]) -> Result<usize, ParseError> {
    if index >= headers.len() {
        return Err(ParseError::ColumnIndexOutOfRange {
            index,
            width: headers.len(),
        });
    }
    Ok(index)
}

pub fn parse_fragment_selection(value: &str) -> Result<FragmentSelection, ParseError> {
    match value.trim() {
        "first" => Ok(FragmentSelection::First),
        "largest" => Ok(FragmentSelection::Largest),
        other => Err(ParseError::InvalidChoice {
            kind: "fragment selection",
            value: other.to_string(),
            expected: "first, largest",
        }),
    }
}

pub fn parse_unmatched_policy(value: &str) -> Result<UnmatchedColumnPolicy, ParseError> {
    match value.trim() {
        "reject" => Ok(UnmatchedColumnPolicy::Reject),
        "fill-missing" => Ok(UnmatchedColumnPolicy::FillMissing),
        other => Err(ParseError::InvalidChoice {
            kind: "unmatched column policy",
            value: other.to_string(),
            expected: "reject, fill-missing",
        }),
    }
}

pub fn parse_row_error_policy(value: &str) -> Result<RowErrorPolicy, ParseError> {
    match value.trim() {
        "abort" => Ok(RowErrorPolicy::Abort),
        "mark-missing" => Ok(RowErrorPolicy::MarkMissing),
        other => Err(ParseError::InvalidChoice {
            kind: "row error policy",
            value: other.to_string(),
            expected: "abort, mark-missing",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["id".to_string(), "structure".to_string(), "3".to_string()]
    }

    #[test]
    fn columns_resolve_by_name_before_index() {
        assert_eq!(parse_column("structure", &headers()), Ok(1));
        assert_eq!(parse_column("0", &headers()), Ok(0));
        // A header literally named "3" wins over the (out of range) index 3.
        assert_eq!(parse_column("3", &headers()), Ok(2));
    }

    #[test]
    fn unknown_or_out_of_range_columns_fail() {
        assert_eq!(
            parse_column("smiles", &headers()),
            Err(ParseError::UnknownColumn("smiles".to_string()))
        );
        assert_eq!(
            parse_column("7", &headers()),
            Err(ParseError::ColumnIndexOutOfRange { index: 7, width: 3 })
        );
    }

    #[test]
    fn policies_parse_kebab_case_names() {
        assert_eq!(parse_fragment_selection("largest"), Ok(FragmentSelection::Largest));
        assert_eq!(
            parse_unmatched_policy("fill-missing"),
            Ok(UnmatchedColumnPolicy::FillMissing)
        );
        assert_eq!(parse_row_error_policy("abort"), Ok(RowErrorPolicy::Abort));
        assert!(matches!(
            parse_fragment_selection("biggest"),
            Err(ParseError::InvalidChoice { kind: "fragment selection", .. })
        ));
    }
}
