use super::defaults::DefaultsConfig;
use super::file::{FileColumn, FileConfig};
use super::models::AppConfig;
use crate::cli::AnnotateArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use molrow::engine::catalog::SchemeCatalog;
use molrow::engine::config::{RowErrorPolicy, TransformConfigBuilder, UnmatchedColumnPolicy};
use molrow::workflows::annotate::AnnotationConfig;

/// Merges defaults, the config file, `--set` values and CLI flags, in
/// increasing order of precedence. Columns are resolved against `headers`.
pub fn build_config(args: &AnnotateArgs, headers: &[String]) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input_file = file_config.input.take().unwrap_or_default();
    let descriptor_file = file_config.descriptor.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let structure_column = match (&args.structure_column, input_file.structure_column) {
        (Some(name), _) => resolve_column(&FileColumn::Name(name.clone()), headers)?,
        (None, Some(column)) => resolve_column(&column, headers)?,
        (None, None) => {
            resolve_column(&FileColumn::Name(defaults.structure_column.clone()), headers)?
        }
    };
    let key_column = match (&args.key_column, input_file.key_column) {
        (Some(name), _) => Some(resolve_column(&FileColumn::Name(name.clone()), headers)?),
        (None, Some(column)) => Some(resolve_column(&column, headers)?),
        (None, None) => None,
    };

    let descriptor = args
        .descriptor
        .or(descriptor_file.kind)
        .unwrap_or(defaults.descriptor);

    let fragment_selection = match &args.fragment {
        Some(value) => parser::parse_fragment_selection(value)
            .map_err(|e| CliError::Argument(e.to_string()))?,
        None => descriptor_file
            .fragment_selection
            .unwrap_or(defaults.fragment_selection),
    };

    let unmatched_columns = if args.fill_unmatched {
        UnmatchedColumnPolicy::FillMissing
    } else {
        output_file
            .unmatched_columns
            .unwrap_or(defaults.unmatched_columns)
    };

    let on_row_error = if args.keep_going {
        RowErrorPolicy::MarkMissing
    } else {
        file_config.on_row_error.unwrap_or(defaults.on_row_error)
    };

    let output_columns = if !args.columns.is_empty() {
        args.columns.clone()
    } else if let Some(columns) = output_file.columns {
        columns
    } else {
        SchemeCatalog::for_descriptor(descriptor)
            .iter()
            .map(|s| s.title.clone())
            .collect()
    };

    let transform = TransformConfigBuilder::new()
        .structure_column(structure_column)
        .output_columns(output_columns)
        .descriptor(descriptor)
        .fragment_selection(fragment_selection)
        .unmatched_columns(unmatched_columns)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        key_column,
        annotation: AnnotationConfig {
            transform,
            on_row_error,
        },
    })
}

fn resolve_column(column: &FileColumn, headers: &[String]) -> Result<usize> {
    let resolved = match column {
        FileColumn::Name(name) => parser::parse_column(name, headers),
        FileColumn::Index(index) => parser::check_column_index(*index, headers),
    };
    resolved.map_err(|e| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let invalid = |e: parser::ParseError| CliError::Config(format!("{}: {}", key, e));

        match key {
            "input.structure-column" => {
                config
                    .input
                    .get_or_insert_with(Default::default)
                    .structure_column = Some(FileColumn::Name(value_str.to_string()));
            }
            "input.key-column" => {
                config.input.get_or_insert_with(Default::default).key_column =
                    Some(FileColumn::Name(value_str.to_string()));
            }
            "descriptor.kind" => {
                config.descriptor.get_or_insert_with(Default::default).kind =
                    Some(value_str.parse().map_err(|e| {
                        CliError::Config(format!("Invalid value for {}: {}", key, e))
                    })?);
            }
            "descriptor.fragment-selection" => {
                config
                    .descriptor
                    .get_or_insert_with(Default::default)
                    .fragment_selection =
                    Some(parser::parse_fragment_selection(value_str).map_err(invalid)?);
            }
            "output.unmatched-columns" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .unmatched_columns =
                    Some(parser::parse_unmatched_policy(value_str).map_err(invalid)?);
            }
            "on-row-error" => {
                config.on_row_error =
                    Some(parser::parse_row_error_policy(value_str).map_err(invalid)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use molrow::core::descriptors::DescriptorKind;
    use molrow::engine::config::FragmentSelection;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn headers() -> Vec<String> {
        ["id", "name", "structure"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn base_annotate_args() -> AnnotateArgs {
        AnnotateArgs {
            input: PathBuf::from("in.csv"),
            output: PathBuf::from("out.csv"),
            config: None,
            structure_column: None,
            key_column: None,
            descriptor: None,
            columns: vec![],
            fragment: None,
            fill_unmatched: false,
            keep_going: false,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let app = build_config(&base_annotate_args(), &headers()).expect("build ok");
        let transform = &app.annotation.transform;

        assert_eq!(transform.structure_column, 2);
        assert_eq!(transform.descriptor, DescriptorKind::Whim);
        assert_eq!(transform.output_columns.len(), 5);
        assert_eq!(transform.output_columns[0], "Unity Weights");
        assert_eq!(transform.fragment_selection, FragmentSelection::First);
        assert_eq!(transform.unmatched_columns, UnmatchedColumnPolicy::Reject);
        assert_eq!(app.annotation.on_row_error, RowErrorPolicy::Abort);
        assert_eq!(app.key_column, None);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("molrow.toml");
        fs::write(
            &config_path,
            r#"
            on-row-error = "mark-missing"

            [input]
            structure-column = 2
            key-column = "name"

            [descriptor]
            kind = "composition"

            [output]
            columns = ["Heavy Atoms"]
            "#,
        )
        .unwrap();

        let mut args = base_annotate_args();
        args.config = Some(config_path);
        let app = build_config(&args, &headers()).unwrap();

        assert_eq!(app.key_column, Some(1));
        assert_eq!(app.annotation.transform.descriptor, DescriptorKind::Composition);
        assert_eq!(app.annotation.transform.output_columns, vec!["Heavy Atoms"]);
        assert_eq!(app.annotation.on_row_error, RowErrorPolicy::MarkMissing);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("molrow.toml");
        fs::write(
            &config_path,
            "[descriptor]\nkind = \"composition\"\nfragment-selection = \"first\"\n",
        )
        .unwrap();

        let mut args = base_annotate_args();
        args.config = Some(config_path);
        args.descriptor = Some(DescriptorKind::Whim);
        args.fragment = Some("largest".to_string());
        args.columns = vec!["Atomic Masses".to_string(), "Other".to_string()];
        args.fill_unmatched = true;
        args.structure_column = Some("0".to_string());

        let app = build_config(&args, &headers()).unwrap();
        let transform = &app.annotation.transform;
        assert_eq!(transform.descriptor, DescriptorKind::Whim);
        assert_eq!(transform.fragment_selection, FragmentSelection::Largest);
        assert_eq!(transform.output_columns, vec!["Atomic Masses", "Other"]);
        assert_eq!(transform.unmatched_columns, UnmatchedColumnPolicy::FillMissing);
        assert_eq!(transform.structure_column, 0);
    }

    #[test]
    fn set_values_override() {
        let mut args = base_annotate_args();
        args.set_values = vec![
            "input.key-column=id".to_string(),
            "descriptor.fragment-selection=largest".to_string(),
            "on-row-error=mark-missing".to_string(),
        ];
        let app = build_config(&args, &headers()).unwrap();
        assert_eq!(app.key_column, Some(0));
        assert_eq!(
            app.annotation.transform.fragment_selection,
            FragmentSelection::Largest
        );
        assert_eq!(app.annotation.on_row_error, RowErrorPolicy::MarkMissing);
    }

    #[test]
    fn invalid_set_values_are_reported() {
        let mut args = base_annotate_args();
        args.set_values = vec!["descriptor.kind".to_string()];
        assert!(matches!(
            build_config(&args, &headers()),
            Err(CliError::Config(_))
        ));

        args.set_values = vec!["descriptor.weighting=mass".to_string()];
        assert!(matches!(
            build_config(&args, &headers()),
            Err(CliError::Config(_))
        ));

        args.set_values = vec!["on-row-error=retry".to_string()];
        assert!(matches!(
            build_config(&args, &headers()),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn integer_column_in_file_is_an_index_not_a_header_name() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("molrow.toml");
        fs::write(&config_path, "[input]\nstructure-column = 2\n").unwrap();

        let headers: Vec<String> = ["2", "id", "structure"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let mut args = base_annotate_args();
        args.config = Some(config_path);
        let app = build_config(&args, &headers).unwrap();
        assert_eq!(app.annotation.transform.structure_column, 2);

        let narrow = vec!["2".to_string()];
        assert!(matches!(
            build_config(&args, &narrow),
            Err(CliError::Config(msg)) if msg.contains("out of range")
        ));
    }

    #[test]
    fn missing_structure_column_is_a_config_error() {
        let headers = vec!["id".to_string(), "smiles".to_string()];
        let result = build_config(&base_annotate_args(), &headers);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("structure")));
    }
}
