//! # Descriptor Capabilities
//!
//! A descriptor turns a [`Structure`] into a vector of numbers. The engine
//! only sees the [`DescriptorCapability`] trait; the concrete descriptors in
//! this module are selected at configuration time through [`DescriptorKind`].
//!
//! The weighting or variant a descriptor should use is passed with every
//! call rather than configured on the instance beforehand, so a capability
//! carries no per-call state and repeated calls with the same arguments give
//! identical results.

pub mod composition;
pub mod weights;
pub mod whim;

use crate::core::models::structure::Structure;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescriptorError {
    /// The parameter is not accepted by this descriptor, either in general
    /// or for the atoms of this particular structure.
    #[error("parameter '{parameter}' rejected: {reason}")]
    ParameterRejected { parameter: String, reason: String },

    #[error("computation failed: {0}")]
    Computation(String),
}

/// A component that computes one family of descriptor values.
pub trait DescriptorCapability {
    /// Short human-readable descriptor name, used in progress messages.
    fn name(&self) -> &'static str;

    /// The parameter names this descriptor understands.
    fn parameters(&self) -> Vec<&'static str>;

    /// Computes the descriptor vector of `structure` under `parameter`.
    ///
    /// The length of the result is fixed by the descriptor, not by the caller.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::ParameterRejected`] if the parameter is unknown or
    /// cannot be applied to this structure; [`DescriptorError::Computation`]
    /// for any other failure.
    fn compute(&self, structure: &Structure, parameter: &str) -> Result<Vec<f64>, DescriptorError>;
}

/// The descriptors known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorKind {
    #[default]
    Whim,
    Composition,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 2] = [DescriptorKind::Whim, DescriptorKind::Composition];

    /// Creates a fresh capability instance of this kind.
    pub fn capability(&self) -> Box<dyn DescriptorCapability + Send> {
        match self {
            DescriptorKind::Whim => Box::new(whim::WhimDescriptor),
            DescriptorKind::Composition => Box::new(composition::CompositionDescriptor),
        }
    }

    /// Names of the entries of each result vector.
    pub fn value_names(&self) -> &'static [&'static str] {
        match self {
            DescriptorKind::Whim => &whim::WHIM_VALUE_NAMES,
            DescriptorKind::Composition => &composition::COMPOSITION_VALUE_NAMES,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            DescriptorKind::Whim => "whim",
            DescriptorKind::Composition => "composition",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
#[error("unknown descriptor '{0}' (expected one of: whim, composition)")]
pub struct ParseDescriptorKindError(String);

impl FromStr for DescriptorKind {
    type Err = ParseDescriptorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DescriptorKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDescriptorKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("whim".parse::<DescriptorKind>().unwrap(), DescriptorKind::Whim);
        assert_eq!("WHIM".parse::<DescriptorKind>().unwrap(), DescriptorKind::Whim);
        assert_eq!(
            " composition ".parse::<DescriptorKind>().unwrap(),
            DescriptorKind::Composition
        );
        assert!("lipinski".parse::<DescriptorKind>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for kind in DescriptorKind::ALL {
            assert_eq!(kind.to_string().parse::<DescriptorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn capability_matches_kind() {
        assert_eq!(DescriptorKind::Whim.capability().name(), "WHIM");
        assert_eq!(DescriptorKind::Composition.capability().name(), "Composition");
        assert_eq!(DescriptorKind::Whim.value_names().len(), 17);
        assert_eq!(DescriptorKind::Composition.value_names().len(), 3);
    }
}
