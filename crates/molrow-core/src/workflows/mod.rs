//! # Workflows Module
//!
//! High-level entry points that drive rows through the engine.
//!
//! - **Annotation Workflow** ([`annotate`]) - builds a `RowTransformer` from a
//!   configuration, transforms every row in order, applies the row error
//!   policy and reports progress after each row.

pub mod annotate;
