use super::error::ConfigError;
use crate::core::descriptors::DescriptorKind;
use serde::Deserialize;

/// How the active weighting schemes are derived from the output columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchemeSelection {
    /// Each output column whose name equals a scheme title activates that scheme.
    #[default]
    ByColumnTitle,
    /// A single scheme, looked up by identifier, feeds the only output column.
    Fixed(String),
}

/// What to do with output columns that do not name a known scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedColumnPolicy {
    /// Refuse to build the transformer.
    #[default]
    Reject,
    /// Keep the column and emit a missing marker in it for every row.
    FillMissing,
}

/// Which connected component represents a disconnected structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentSelection {
    /// The component containing the earliest atom.
    #[default]
    First,
    /// The component with the most atoms; ties go to the earlier component.
    Largest,
}

/// What the driver does when a row fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowErrorPolicy {
    /// Stop at the first failing row and return its error.
    #[default]
    Abort,
    /// Log the failure, emit an all-missing row and carry on.
    MarkMissing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    pub structure_column: usize,
    pub output_columns: Vec<String>,
    pub descriptor: DescriptorKind,
    pub scheme_selection: SchemeSelection,
    pub unmatched_columns: UnmatchedColumnPolicy,
    pub fragment_selection: FragmentSelection,
}

#[derive(Default)]
pub struct TransformConfigBuilder {
    structure_column: Option<usize>,
    output_columns: Option<Vec<String>>,
    descriptor: Option<DescriptorKind>,
    scheme_selection: Option<SchemeSelection>,
    unmatched_columns: Option<UnmatchedColumnPolicy>,
    fragment_selection: Option<FragmentSelection>,
}

impl TransformConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_column(mut self, index: usize) -> Self {
        self.structure_column = Some(index);
        self
    }
    pub fn output_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
    pub fn descriptor(mut self, kind: DescriptorKind) -> Self {
        self.descriptor = Some(kind);
        self
    }
    pub fn scheme_selection(mut self, selection: SchemeSelection) -> Self {
        self.scheme_selection = Some(selection);
        self
    }
    pub fn unmatched_columns(mut self, policy: UnmatchedColumnPolicy) -> Self {
        self.unmatched_columns = Some(policy);
        self
    }
    pub fn fragment_selection(mut self, selection: FragmentSelection) -> Self {
        self.fragment_selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<TransformConfig, ConfigError> {
        Ok(TransformConfig {
            structure_column: self
                .structure_column
                .ok_or(ConfigError::MissingParameter("structure_column"))?,
            output_columns: self
                .output_columns
                .ok_or(ConfigError::MissingParameter("output_columns"))?,
            descriptor: self.descriptor.unwrap_or_default(),
            scheme_selection: self.scheme_selection.unwrap_or_default(),
            unmatched_columns: self.unmatched_columns.unwrap_or_default(),
            fragment_selection: self.fragment_selection.unwrap_or_default(),
        })
    }
}
