use crate::error::{CliError, Result};
use molrow::core::descriptors::DescriptorKind;
use molrow::engine::config::{FragmentSelection, RowErrorPolicy, UnmatchedColumnPolicy};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A column given either by header name or by zero-based index.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FileColumn {
    Index(usize),
    Name(String),
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInputConfig {
    pub structure_column: Option<FileColumn>,
    pub key_column: Option<FileColumn>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDescriptorConfig {
    pub kind: Option<DescriptorKind>,
    pub fragment_selection: Option<FragmentSelection>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub columns: Option<Vec<String>>,
    pub unmatched_columns: Option<UnmatchedColumnPolicy>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub input: Option<FileInputConfig>,
    pub descriptor: Option<FileDescriptorConfig>,
    pub output: Option<FileOutputConfig>,
    pub on_row_error: Option<RowErrorPolicy>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_deserializes() {
        let config: FileConfig = toml::from_str(
            r#"
            on-row-error = "mark-missing"

            [input]
            structure-column = 2
            key-column = "name"

            [descriptor]
            kind = "composition"
            fragment-selection = "largest"

            [output]
            columns = ["All Atoms", "Heavy Atoms"]
            unmatched-columns = "fill-missing"
            "#,
        )
        .unwrap();

        let input = config.input.unwrap();
        assert_eq!(input.structure_column, Some(FileColumn::Index(2)));
        assert_eq!(input.key_column, Some(FileColumn::Name("name".to_string())));
        let descriptor = config.descriptor.unwrap();
        assert_eq!(descriptor.kind, Some(DescriptorKind::Composition));
        assert_eq!(descriptor.fragment_selection, Some(FragmentSelection::Largest));
        let output = config.output.unwrap();
        assert_eq!(output.columns.unwrap(), vec!["All Atoms", "Heavy Atoms"]);
        assert_eq!(output.unmatched_columns, Some(UnmatchedColumnPolicy::FillMissing));
        assert_eq!(config.on_row_error, Some(RowErrorPolicy::MarkMissing));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[descriptor]\nweighting = \"mass\"\n").unwrap();
        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
