//! Scaled atomic properties used as WHIM weights.
//!
//! Values are relative to carbon (carbon = 1.0) so that every scheme weights
//! a hydrocarbon skeleton on a comparable scale.

use crate::core::models::element::Element;
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 0.084, "B" => 0.900, "C" => 1.000, "N" => 1.166, "O" => 1.332, "F" => 1.582,
    "Al" => 2.246, "Si" => 2.339, "P" => 2.579, "S" => 2.670, "Cl" => 2.952,
    "Fe" => 4.650, "Co" => 4.907, "Ni" => 4.887, "Cu" => 5.291, "Zn" => 5.445,
    "Br" => 6.653, "Sn" => 9.884, "I" => 10.566,
};

static VDW_VOLUMES: Map<&'static str, f64> = phf_map! {
    "H" => 0.299, "B" => 0.796, "C" => 1.000, "N" => 0.695, "O" => 0.512, "F" => 0.410,
    "Al" => 1.626, "Si" => 1.424, "P" => 1.181, "S" => 1.088, "Cl" => 1.035,
    "Fe" => 0.764, "Co" => 0.683, "Ni" => 0.113, "Cu" => 1.255, "Zn" => 0.790,
    "Br" => 1.384, "Sn" => 1.728, "I" => 1.733,
};

static ELECTRONEGATIVITIES: Map<&'static str, f64> = phf_map! {
    "H" => 0.944, "B" => 0.828, "C" => 1.000, "N" => 1.163, "O" => 1.331, "F" => 1.457,
    "Al" => 0.624, "Si" => 0.779, "P" => 0.916, "S" => 1.077, "Cl" => 1.265,
    "Fe" => 0.728, "Co" => 0.728, "Ni" => 0.728, "Cu" => 0.740, "Zn" => 0.810,
    "Br" => 1.172, "Sn" => 0.837, "I" => 1.012,
};

static POLARIZABILITIES: Map<&'static str, f64> = phf_map! {
    "H" => 0.379, "B" => 1.722, "C" => 1.000, "N" => 0.625, "O" => 0.456, "F" => 0.316,
    "Al" => 3.864, "Si" => 3.057, "P" => 2.063, "S" => 1.648, "Cl" => 1.239,
    "Fe" => 4.768, "Co" => 4.248, "Ni" => 3.846, "Cu" => 3.464, "Zn" => 3.420,
    "Br" => 1.733, "Sn" => 4.432, "I" => 2.926,
};

/// Per-atom weighting applied before the weighted principal component
/// analysis of a WHIM computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weighting {
    Unity,
    Mass,
    Volume,
    Electronegativity,
    Polarizability,
}

impl Weighting {
    pub const ALL: [Weighting; 5] = [
        Weighting::Unity,
        Weighting::Mass,
        Weighting::Volume,
        Weighting::Electronegativity,
        Weighting::Polarizability,
    ];

    /// The parameter name that selects this weighting.
    pub fn parameter(&self) -> &'static str {
        match self {
            Weighting::Unity => "unity",
            Weighting::Mass => "mass",
            Weighting::Volume => "volume",
            Weighting::Electronegativity => "eneg",
            Weighting::Polarizability => "polar",
        }
    }

    /// Human-readable name of the weighting.
    pub fn title(&self) -> &'static str {
        match self {
            Weighting::Unity => "Unity Weights",
            Weighting::Mass => "Atomic Masses",
            Weighting::Volume => "Van der Waals Volumes",
            Weighting::Electronegativity => "Atomic Electronegativities",
            Weighting::Polarizability => "Atomic Polarizabilities",
        }
    }

    /// Weight of an atom of the given element, or `None` when the element is
    /// not tabulated for this weighting.
    pub fn weight(&self, element: Element) -> Option<f64> {
        let table = match self {
            Weighting::Unity => return Some(1.0),
            Weighting::Mass => &ATOMIC_MASSES,
            Weighting::Volume => &VDW_VOLUMES,
            Weighting::Electronegativity => &ELECTRONEGATIVITIES,
            Weighting::Polarizability => &POLARIZABILITIES,
        };
        table.get(element.symbol()).copied()
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parameter())
    }
}

impl FromStr for Weighting {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weighting::ALL
            .into_iter()
            .find(|w| w.parameter() == s)
            .ok_or(())
    }
}
