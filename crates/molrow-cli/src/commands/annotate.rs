use crate::cli::AnnotateArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::table::{InputTable, write_table};
use crate::utils::progress::CliProgressHandler;
use molrow::engine::config::RowErrorPolicy;
use molrow::engine::progress::ProgressReporter;
use molrow::workflows;
use tracing::{info, warn};

pub fn run(args: AnnotateArgs) -> Result<()> {
    info!("Loading input table from {:?}", &args.input);
    let table = InputTable::read(&args.input)?;

    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args, &table.headers)?;

    let sources = table.to_rows(
        config.annotation.transform.structure_column,
        config.key_column,
    );

    let mut rows = Vec::with_capacity(sources.len());
    let mut unreadable = Vec::new();
    for source in sources {
        if let Some(err) = source.load_error {
            match config.annotation.on_row_error {
                RowErrorPolicy::Abort => return Err(err),
                RowErrorPolicy::MarkMissing => {
                    warn!(row = %source.row.key, error = %err, "Structure could not be loaded; emitting missing values.");
                    unreadable.push(source.row.key.clone());
                }
            }
        }
        rows.push(source.row);
    }

    info!("Loaded {} row(s) from {:?}", rows.len(), &config.input_path);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Computing {} descriptors for {} row(s)...",
        config.annotation.transform.descriptor,
        rows.len()
    );
    info!("Invoking the core annotation workflow...");
    let mut result = workflows::annotate::run(&rows, &config.annotation, &reporter)?;
    result.failed_rows.extend(unreadable);

    if !result.failed_rows.is_empty() {
        warn!(
            "{} row(s) failed and were written with empty descriptor cells.",
            result.failed_rows.len()
        );
        let keys: Vec<_> = result.failed_rows.iter().map(|k| k.as_str()).collect();
        println!(
            "Warning: {} row(s) failed: {}",
            result.failed_rows.len(),
            keys.join(", ")
        );
    }

    write_table(
        &config.output_path,
        &table,
        &config.annotation.transform.output_columns,
        &result.rows,
    )?;
    println!(
        "✓ Annotated table written to: {}",
        config.output_path.display()
    );

    Ok(())
}
