//! Provides input functionality for molecular file formats.
//!
//! Structures enter the pipeline through the [`traits::StructureFile`]
//! trait; [`bgf`] implements it for the BIOGRAF format.

pub mod bgf;
pub mod traits;
