use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use molrow::engine::progress::{Progress, ProgressCallback, RowProgress};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders annotation progress as a spinner while the layout is prepared and
/// as a row counter once rows are being transformed.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_style(spinner_style());
                    pb.set_message(name);
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_and_clear();
                }
                Progress::RowsStart { total_rows, label } => {
                    pb.reset();
                    pb.set_length(total_rows as u64);
                    pb.set_style(row_style());
                    pb.set_prefix(label);
                }
                Progress::Row(row) => {
                    let length = pb.length().unwrap_or(0);
                    pb.set_position(rows_done(&row, length));
                    pb.set_message(row.message);
                }
                Progress::RowsFinish { failed } => {
                    let length = pb.length().unwrap_or(0);
                    pb.set_position(length);
                    if failed == 0 {
                        pb.finish_with_message("✓ All rows annotated");
                    } else {
                        pb.finish_with_message(format!("✓ Done; {} row(s) failed", failed));
                    }
                }
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows completed once the row reported by `row` is done.
///
/// `row.fraction` is the zero-based index of that row over the row count.
fn rows_done(row: &RowProgress, length: u64) -> u64 {
    let index = (row.fraction * length as f64).round() as u64;
    (index + 1).min(length)
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn row_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} rows ({eta}) {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use molrow::engine::progress::row_progress;
    use molrow::engine::row::RowKey;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn rows_done_counts_the_reported_row() {
        let key = RowKey::new("m");
        assert_eq!(rows_done(&row_progress(0, 4, &key, "WHIM"), 4), 1);
        assert_eq!(rows_done(&row_progress(3, 4, &key, "WHIM"), 4), 4);
        assert_eq!(rows_done(&row_progress(2, 3, &key, "WHIM"), 3), 3);
        assert_eq!(rows_done(&row_progress(0, 0, &key, "WHIM"), 0), 0);
    }

    #[test]
    fn row_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Preparation",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Preparation");
            assert!(!pb.is_finished());
        }
        callback(Progress::PhaseFinish);

        callback(Progress::RowsStart {
            total_rows: 3,
            label: "WHIM",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
            assert_eq!(pb.prefix(), "WHIM");
        }

        callback(Progress::Row(row_progress(1, 3, &RowKey::new("water"), "WHIM")));
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.message(), "Calculated WHIM for row 1 (\"water\")");
        }

        callback(Progress::RowsFinish { failed: 1 });
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 3);
        assert_eq!(pb.message(), "✓ Done; 1 row(s) failed");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::RowsStart {
                total_rows: 1,
                label: "composition",
            });
            callback(Progress::Row(row_progress(0, 1, &RowKey::new("1"), "composition")));
            callback(Progress::RowsFinish { failed: 0 });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.message(), "✓ All rows annotated");
    }
}
