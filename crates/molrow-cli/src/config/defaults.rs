use molrow::core::descriptors::DescriptorKind;
use molrow::engine::config::{FragmentSelection, RowErrorPolicy, UnmatchedColumnPolicy};

pub struct DefaultsConfig {
    pub structure_column: String,
    pub descriptor: DescriptorKind,
    pub fragment_selection: FragmentSelection,
    pub unmatched_columns: UnmatchedColumnPolicy,
    pub on_row_error: RowErrorPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            structure_column: "structure".to_string(),
            descriptor: DescriptorKind::Whim,
            fragment_selection: FragmentSelection::First,
            unmatched_columns: UnmatchedColumnPolicy::Reject,
            on_row_error: RowErrorPolicy::Abort,
        }
    }
}
