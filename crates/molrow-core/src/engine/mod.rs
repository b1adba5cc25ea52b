//! # Engine Module
//!
//! The row-transformation stage: everything between "a row with a structure
//! in it" and "a row of descriptor cells".
//!
//! ## Overview
//!
//! A [`transformer::RowTransformer`] is built once per run from a
//! [`config::TransformConfig`]. Construction resolves every output column
//! against a [`catalog::SchemeCatalog`]; after that each row is handled
//! independently:
//!
//! 1. the structure cell is read (a missing cell short-circuits to a row of
//!    missing cells),
//! 2. the structure is reduced to one connected fragment by the
//!    [`normalizer::ConnectivityNormalizer`],
//! 3. the [`invoker::DescriptorInvoker`] computes one descriptor vector per
//!    active scheme, turning rejected parameters into missing cells.
//!
//! Progress reporting lives in [`progress`] and is driven by the caller, not
//! by the transformer.

pub mod catalog;
pub mod config;
pub mod error;
pub mod invoker;
pub mod normalizer;
pub mod progress;
pub mod row;
pub mod transformer;
