use super::{DescriptorCapability, DescriptorError};
use crate::core::models::structure::Structure;
use std::collections::HashSet;

/// Names of the values returned by [`CompositionDescriptor`], in output order.
pub const COMPOSITION_VALUE_NAMES: [&str; 3] = ["nAtom", "nBond", "MW"];

/// Atom count, bond count and molecular weight.
///
/// The `all` parameter counts every atom; `heavy` drops hydrogens and the
/// bonds that touch them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionDescriptor;

impl DescriptorCapability for CompositionDescriptor {
    fn name(&self) -> &'static str {
        "Composition"
    }

    fn parameters(&self) -> Vec<&'static str> {
        vec!["all", "heavy"]
    }

    fn compute(&self, structure: &Structure, parameter: &str) -> Result<Vec<f64>, DescriptorError> {
        let heavy_only = match parameter {
            "all" => false,
            "heavy" => true,
            other => {
                return Err(DescriptorError::ParameterRejected {
                    parameter: other.to_string(),
                    reason: "expected one of all, heavy".to_string(),
                });
            }
        };
        if structure.is_empty() {
            return Err(DescriptorError::Computation(
                "structure has no atoms".to_string(),
            ));
        }

        let selected: HashSet<_> = structure
            .atoms_iter()
            .filter(|(_, atom)| !heavy_only || atom.is_heavy())
            .map(|(id, _)| id)
            .collect();
        let bonds = structure
            .bonds()
            .iter()
            .filter(|b| selected.contains(&b.atom1_id) && selected.contains(&b.atom2_id))
            .count();
        let weight: f64 = structure
            .atoms_iter()
            .filter(|(id, _)| selected.contains(id))
            .map(|(_, atom)| atom.element.atomic_mass())
            .sum();

        Ok(vec![selected.len() as f64, bonds as f64, weight])
    }
}
