use super::weights::Weighting;
use super::{DescriptorCapability, DescriptorError};
use crate::core::models::element::Element;
use crate::core::models::structure::Structure;
use nalgebra::{Matrix3, SymmetricEigen, Vector3};

/// Distance (in Angstroms) within which two atoms are treated as mirror
/// images along a principal axis.
const SYMMETRY_TOLERANCE: f64 = 0.1;

/// Names of the values returned by [`WhimDescriptor`], in output order.
pub const WHIM_VALUE_NAMES: [&str; 17] = [
    "Wlambda1", "Wlambda2", "Wlambda3", "Wnu1", "Wnu2", "Wgamma1", "Wgamma2", "Wgamma3", "Weta1",
    "Weta2", "Weta3", "WT", "WA", "WV", "WK", "WG", "WD",
];

/// Weighted Holistic Invariant Molecular (WHIM) descriptors.
///
/// Coordinates are centred on the weighted centroid and a weighted 3x3
/// covariance matrix is diagonalised. The eigenvalues (sorted descending)
/// describe the size of the structure along its principal axes; the atom
/// scores along each axis give the shape, symmetry and density statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhimDescriptor;

struct PrincipalAxes {
    /// Eigenvalues in descending order.
    lambda: [f64; 3],
    /// `scores[i][m]`: projection of atom `i` on axis `m`.
    scores: Vec<[f64; 3]>,
}

impl WhimDescriptor {
    fn weights(structure: &Structure, weighting: Weighting) -> Result<Vec<f64>, DescriptorError> {
        structure
            .atoms_iter()
            .map(|(_, atom)| {
                weighting
                    .weight(atom.element)
                    .ok_or_else(|| DescriptorError::ParameterRejected {
                        parameter: weighting.parameter().to_string(),
                        reason: format!("no '{}' weight tabulated for element {}", weighting, atom.element),
                    })
            })
            .collect()
    }

    fn principal_axes(coords: &[Vector3<f64>], weights: &[f64]) -> PrincipalAxes {
        let total_weight: f64 = weights.iter().sum();
        let centroid = coords
            .iter()
            .zip(weights)
            .fold(Vector3::zeros(), |acc, (c, &w)| acc + c * w)
            / total_weight;

        let centred: Vec<Vector3<f64>> = coords.iter().map(|c| c - centroid).collect();
        let covariance = centred
            .iter()
            .zip(weights)
            .fold(Matrix3::zeros(), |acc, (c, &w)| acc + (c * c.transpose()) * w)
            / total_weight;

        let eigen = SymmetricEigen::new(covariance);
        let mut axes: Vec<(f64, Vector3<f64>)> = (0..3)
            .map(|k| {
                // Round-off can leave tiny negative eigenvalues on flat axes.
                let value = eigen.eigenvalues[k].max(0.0);
                (value, eigen.eigenvectors.column(k).into_owned())
            })
            .collect();
        axes.sort_by(|a, b| b.0.total_cmp(&a.0));

        let lambda = [axes[0].0, axes[1].0, axes[2].0];
        let scores = centred
            .iter()
            .map(|c| [c.dot(&axes[0].1), c.dot(&axes[1].1), c.dot(&axes[2].1)])
            .collect();

        PrincipalAxes { lambda, scores }
    }

    /// Symmetry index along one axis: `1 / (1 + I)` where `I` is the
    /// information content of the partition of atoms into symmetry classes.
    fn symmetry(scores: &[[f64; 3]], elements: &[Element], axis: usize) -> f64 {
        let n = scores.len();
        let symmetric = (0..n)
            .filter(|&i| {
                let t = scores[i][axis];
                t.abs() < SYMMETRY_TOLERANCE
                    || (0..n).any(|j| {
                        j != i
                            && elements[j] == elements[i]
                            && (t + scores[j][axis]).abs() < SYMMETRY_TOLERANCE
                    })
            })
            .count();

        // Symmetric atoms form one class; each asymmetric atom is its own class.
        let n_f = n as f64;
        let p_symmetric = symmetric as f64 / n_f;
        let p_asymmetric = (n - symmetric) as f64 / n_f;
        let mut information = p_asymmetric * n_f.log2();
        if symmetric > 0 {
            information -= p_symmetric * p_symmetric.log2();
        }
        1.0 / (1.0 + information)
    }

    /// Inverse kurtosis of the weighted scores along one axis; zero on a
    /// degenerate axis.
    fn emptiness(scores: &[[f64; 3]], weights: &[f64], lambda: f64, axis: usize) -> f64 {
        if lambda <= f64::EPSILON {
            return 0.0;
        }
        let total_weight: f64 = weights.iter().sum();
        let fourth_moment: f64 = scores
            .iter()
            .zip(weights)
            .map(|(s, &w)| w * s[axis].powi(4))
            .sum::<f64>()
            / total_weight;
        fourth_moment / (lambda * lambda)
    }
}

impl DescriptorCapability for WhimDescriptor {
    fn name(&self) -> &'static str {
        "WHIM"
    }

    fn parameters(&self) -> Vec<&'static str> {
        Weighting::ALL.iter().map(Weighting::parameter).collect()
    }

    fn compute(&self, structure: &Structure, parameter: &str) -> Result<Vec<f64>, DescriptorError> {
        let weighting: Weighting =
            parameter
                .parse()
                .map_err(|_| DescriptorError::ParameterRejected {
                    parameter: parameter.to_string(),
                    reason: format!("expected one of {}", self.parameters().join(", ")),
                })?;

        if structure.is_empty() {
            return Err(DescriptorError::Computation(
                "structure has no atoms".to_string(),
            ));
        }

        let weights = Self::weights(structure, weighting)?;
        let coords: Vec<Vector3<f64>> = structure
            .atoms_iter()
            .map(|(_, atom)| atom.position.coords)
            .collect();
        if coords.iter().any(|c| !c.iter().all(|v| v.is_finite())) {
            return Err(DescriptorError::Computation(
                "structure has non-finite coordinates".to_string(),
            ));
        }
        let elements: Vec<Element> = structure.atoms_iter().map(|(_, a)| a.element).collect();

        let PrincipalAxes { lambda, scores } = Self::principal_axes(&coords, &weights);

        let t: f64 = lambda.iter().sum();
        let nu = if t > f64::EPSILON {
            [lambda[0] / t, lambda[1] / t]
        } else {
            [0.0, 0.0]
        };
        let gamma: [f64; 3] = std::array::from_fn(|m| Self::symmetry(&scores, &elements, m));
        let eta: [f64; 3] = std::array::from_fn(|m| Self::emptiness(&scores, &weights, lambda[m], m));

        let a = lambda[0] * lambda[1] + lambda[0] * lambda[2] + lambda[1] * lambda[2];
        let v = lambda.iter().map(|l| 1.0 + l).product::<f64>() - 1.0;
        let k = if t > f64::EPSILON {
            0.75 * lambda.iter().map(|l| (l / t - 1.0 / 3.0).abs()).sum::<f64>()
        } else {
            0.0
        };
        let g = gamma.iter().product::<f64>().cbrt();
        let d: f64 = eta.iter().sum();

        Ok(vec![
            lambda[0], lambda[1], lambda[2], nu[0], nu[1], gamma[0], gamma[1], gamma[2], eta[0],
            eta[1], eta[2], t, a, v, k, g, d,
        ])
    }
}
