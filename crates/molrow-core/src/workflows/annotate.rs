use crate::engine::config::{RowErrorPolicy, TransformConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter, row_progress};
use crate::engine::row::{OutputRow, Row, RowKey};
use crate::engine::transformer::RowTransformer;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationConfig {
    pub transform: TransformConfig,
    pub on_row_error: RowErrorPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult {
    /// One output row per input row, in input order.
    pub rows: Vec<OutputRow>,
    /// Keys of rows that failed and were emitted as all-missing rows.
    pub failed_rows: Vec<RowKey>,
}

/// Annotates `rows` with the descriptor configured in `config`.
#[instrument(skip_all, name = "annotation_workflow")]
pub fn run(
    rows: &[Row],
    config: &AnnotationConfig,
    reporter: &ProgressReporter,
) -> Result<AnnotationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let transformer = RowTransformer::new(&config.transform)?;
    reporter.report(Progress::PhaseFinish);

    run_with(&transformer, rows, config.on_row_error, reporter)
}

/// Annotates `rows` with an already constructed transformer.
#[instrument(skip_all, name = "annotation_rows", fields(rows = rows.len()))]
pub fn run_with(
    transformer: &RowTransformer,
    rows: &[Row],
    on_row_error: RowErrorPolicy,
    reporter: &ProgressReporter,
) -> Result<AnnotationResult, EngineError> {
    let total = rows.len();
    let label = transformer.descriptor_name();
    info!(
        rows = total,
        columns = transformer.width(),
        descriptor = label,
        "Starting descriptor annotation."
    );

    reporter.report(Progress::RowsStart {
        total_rows: total,
        label,
    });

    let mut output = Vec::with_capacity(total);
    let mut failed_rows = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let annotated = match transformer.transform(row) {
            Ok(annotated) => annotated,
            Err(err) => match on_row_error {
                RowErrorPolicy::Abort => return Err(err),
                RowErrorPolicy::MarkMissing => {
                    warn!(row = %row.key, error = %err, "Row failed; emitting missing values.");
                    failed_rows.push(row.key.clone());
                    OutputRow::missing(transformer.width())
                }
            },
        };
        output.push(annotated);

        reporter.report(Progress::Row(row_progress(index, total, &row.key, label)));
    }

    reporter.report(Progress::RowsFinish {
        failed: failed_rows.len(),
    });

    info!(
        rows = total,
        failed = failed_rows.len(),
        "Descriptor annotation finished."
    );

    Ok(AnnotationResult {
        rows: output,
        failed_rows,
    })
}
