//! # molrow Core Library
//!
//! Row-wise molecular descriptor annotation of tabular records. Each input row
//! carries a chemical structure in a designated column; each output row holds
//! one cell per declared output column, filled with the descriptor vector for
//! the weighting scheme that column names, or a missing marker.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless molecular data models
//!   (`Structure`), graph partitioning, file readers, and the descriptor
//!   capabilities themselves (WHIM, composition).
//!
//! - **[`engine`]: The Row Stage.** Scheme resolution against the output
//!   column layout, connectivity normalization, descriptor invocation and the
//!   `RowTransformer` that assembles fixed-width output rows.
//!
//! - **[`workflows`]: The Public API.** Drives a row source through a
//!   transformer, applies the row error policy and reports progress.

pub mod core;
pub mod engine;
pub mod workflows;
