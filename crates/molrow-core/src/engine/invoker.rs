use super::catalog::WeightingScheme;
use crate::core::descriptors::{DescriptorCapability, DescriptorError};
use crate::core::models::structure::Structure;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorResult {
    Values(Vec<f64>),
    /// The capability rejected the scheme's parameter for this structure.
    Unavailable,
}

/// Runs a descriptor capability under a weighting scheme.
///
/// The invoker owns its capability. It is `Send` but not `Sync`: a pipeline
/// that processes rows in parallel must build one invoker per worker.
pub struct DescriptorInvoker {
    capability: Box<dyn DescriptorCapability + Send>,
}

impl DescriptorInvoker {
    pub fn new(capability: Box<dyn DescriptorCapability + Send>) -> Self {
        Self { capability }
    }

    pub fn capability_name(&self) -> &'static str {
        self.capability.name()
    }

    /// Computes the descriptor of `structure` under `scheme`.
    ///
    /// A rejected parameter is not an error: it yields
    /// [`DescriptorResult::Unavailable`]. Any other capability failure is
    /// returned as is.
    pub fn invoke(
        &self,
        structure: &Structure,
        scheme: &WeightingScheme,
    ) -> Result<DescriptorResult, DescriptorError> {
        match self.capability.compute(structure, &scheme.parameter) {
            Ok(values) => Ok(DescriptorResult::Values(values)),
            Err(DescriptorError::ParameterRejected { parameter, reason }) => {
                debug!(
                    descriptor = self.capability.name(),
                    scheme = %scheme.identifier,
                    %parameter,
                    %reason,
                    "Parameter rejected; result unavailable."
                );
                Ok(DescriptorResult::Unavailable)
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for DescriptorInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorInvoker")
            .field("capability", &self.capability.name())
            .finish()
    }
}
