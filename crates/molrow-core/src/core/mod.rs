//! # Core Module
//!
//! Stateless building blocks the row stage is assembled from.
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, bonds and the `Structure` graph
//! - **Graph Algorithms** ([`graph`]) - Connectivity checks and connected-component partitioning
//! - **File I/O** ([`io`]) - Reading structures from BGF files
//! - **Descriptors** ([`descriptors`]) - The descriptor capability trait and its implementations
//!
//! Nothing in this module keeps state between calls; every operation is a
//! function of its arguments.

pub mod descriptors;
pub mod graph;
pub mod io;
pub mod models;
