//! # Core Models Module
//!
//! Data structures that represent the chemical structures flowing through a
//! descriptor pipeline.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements and their atomic masses
//! - [`atom`] - Individual atom representation with element and coordinates
//! - [`topology`] - Bonds and bond orders
//! - [`structure`] - A molecular graph of atoms and bonds
//! - [`ids`] - Unique identifier type for atoms
//!
//! ## Usage
//!
//! ```ignore
//! use molrow::core::models::{atom::Atom, element::Element, structure::Structure};
//!
//! let mut structure = Structure::new();
//! let c = structure.add_atom(Atom::new("C1", Element::C, Point3::new(0.0, 0.0, 0.0)));
//! let o = structure.add_atom(Atom::new("O1", Element::O, Point3::new(1.2, 0.0, 0.0)));
//! structure.add_bond(c, o, BondOrder::Double);
//! ```

pub mod atom;
pub mod element;
pub mod ids;
pub mod structure;
pub mod topology;
