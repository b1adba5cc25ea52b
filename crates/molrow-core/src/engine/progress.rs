use super::row::RowKey;

/// Completion state after one row, as seen by a progress monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct RowProgress {
    /// `row_index / total_rows`, or zero when there are no rows.
    pub fraction: f64,
    pub message: String,
}

/// Events emitted while a table is annotated.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Work that precedes the first row, such as resolving the column layout.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// The first row is about to be transformed.
    RowsStart { total_rows: usize, label: &'static str },
    /// One row has been transformed.
    Row(RowProgress),
    /// Every row has been transformed; `failed` rows were emitted as missing.
    RowsFinish { failed: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

/// Progress after processing the row at `row_index` (zero-based) out of
/// `total_rows`.
pub fn row_progress(row_index: usize, total_rows: usize, last_key: &RowKey, label: &str) -> RowProgress {
    let fraction = if total_rows == 0 {
        0.0
    } else {
        row_index as f64 / total_rows as f64
    };
    RowProgress {
        fraction,
        message: format!("Calculated {} for row {} (\"{}\")", label, row_index, last_key),
    }
}
