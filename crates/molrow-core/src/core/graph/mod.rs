//! Graph algorithms over [`Structure`](crate::core::models::structure::Structure).
//!
//! Connectivity questions are answered through the [`GraphPartitioner`]
//! trait; [`BfsPartitioner`] is the breadth-first implementation.

pub mod partition;

pub use partition::{BfsPartitioner, GraphPartitioner};
