use molrow::workflows::annotate::AnnotationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Column whose values name the rows; the 1-based record number if `None`.
    pub key_column: Option<usize>,
    pub annotation: AnnotationConfig,
}
