use super::catalog::{ColumnRole, SchemeCatalog, WeightingScheme};
use super::config::{
    FragmentSelection, SchemeSelection, TransformConfig, UnmatchedColumnPolicy,
};
use super::error::{ConfigError, EngineError};
use super::invoker::{DescriptorInvoker, DescriptorResult};
use super::normalizer::ConnectivityNormalizer;
use super::row::{Cell, OutputCell, OutputRow, Row};
use crate::core::descriptors::{DescriptorCapability, DescriptorKind};
use tracing::debug;

/// Turns input rows into fixed-width rows of descriptor cells.
///
/// The role of every output column is resolved once, at construction. Each
/// call to [`transform`](Self::transform) then produces exactly one cell per
/// output column, in column order.
#[derive(Debug)]
pub struct RowTransformer {
    structure_column: usize,
    roles: Vec<ColumnRole>,
    normalizer: ConnectivityNormalizer,
    invoker: DescriptorInvoker,
}

impl RowTransformer {
    /// Builds a transformer for the configured descriptor and its built-in
    /// scheme catalog.
    pub fn new(config: &TransformConfig) -> Result<Self, ConfigError> {
        let catalog = SchemeCatalog::for_descriptor(config.descriptor);
        Self::with_capability(config, &catalog, config.descriptor.capability())
    }

    /// Builds a transformer over an arbitrary catalog and capability.
    ///
    /// `config.descriptor` is ignored.
    pub fn with_capability(
        config: &TransformConfig,
        catalog: &SchemeCatalog,
        capability: Box<dyn DescriptorCapability + Send>,
    ) -> Result<Self, ConfigError> {
        let roles = resolve_roles(config, catalog)?;
        debug!(
            columns = roles.len(),
            active = roles
                .iter()
                .filter(|r| matches!(r, ColumnRole::Scheme(_)))
                .count(),
            descriptor = capability.name(),
            "Output column layout resolved."
        );
        Ok(Self {
            structure_column: config.structure_column,
            roles,
            normalizer: ConnectivityNormalizer::new(config.fragment_selection),
            invoker: DescriptorInvoker::new(capability),
        })
    }

    /// A transformer that computes one descriptor under its default scheme
    /// into a single output column.
    pub fn single_descriptor(
        kind: DescriptorKind,
        structure_column: usize,
    ) -> Result<Self, ConfigError> {
        let catalog = SchemeCatalog::for_descriptor(kind);
        let scheme = catalog
            .default_scheme()
            .ok_or_else(|| ConfigError::UnknownScheme(kind.to_string()))?;
        let config = TransformConfig {
            structure_column,
            output_columns: vec![scheme.title.clone()],
            descriptor: kind,
            scheme_selection: SchemeSelection::Fixed(scheme.identifier.clone()),
            unmatched_columns: UnmatchedColumnPolicy::Reject,
            fragment_selection: FragmentSelection::First,
        };
        Self::with_capability(&config, &catalog, kind.capability())
    }

    /// Number of cells in every output row.
    pub fn width(&self) -> usize {
        self.roles.len()
    }

    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// The schemes that feed output columns, in column order.
    pub fn active_schemes(&self) -> impl Iterator<Item = &WeightingScheme> {
        self.roles.iter().filter_map(|role| match role {
            ColumnRole::Scheme(scheme) => Some(scheme),
            ColumnRole::Unmatched { .. } => None,
        })
    }

    pub fn descriptor_name(&self) -> &'static str {
        self.invoker.capability_name()
    }

    /// Computes the output row for `row`.
    ///
    /// A missing structure cell yields a row of missing cells. A rejected
    /// scheme parameter yields a missing cell in that scheme's column only.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ColumnOutOfRange`] or [`EngineError::TypeMismatch`]
    /// if the structure column does not hold a structure, and
    /// [`EngineError::Computation`] if the descriptor fails for any scheme.
    pub fn transform(&self, row: &Row) -> Result<OutputRow, EngineError> {
        let cell = row
            .cells
            .get(self.structure_column)
            .ok_or_else(|| EngineError::ColumnOutOfRange {
                row: row.key.clone(),
                column: self.structure_column,
                width: row.cells.len(),
            })?;

        let structure = match cell {
            Cell::Missing => return Ok(OutputRow::missing(self.width())),
            Cell::Structure(structure) => structure,
            other => {
                return Err(EngineError::TypeMismatch {
                    row: row.key.clone(),
                    column: self.structure_column,
                    found: other.kind(),
                });
            }
        };

        let structure = self.normalizer.normalize(structure);

        let mut cells = Vec::with_capacity(self.width());
        for role in &self.roles {
            let cell = match role {
                ColumnRole::Scheme(scheme) => match self.invoker.invoke(&structure, scheme) {
                    Ok(DescriptorResult::Values(values)) => OutputCell::Values(values),
                    Ok(DescriptorResult::Unavailable) => OutputCell::Missing,
                    Err(err) => {
                        return Err(EngineError::Computation {
                            row: row.key.clone(),
                            scheme: scheme.identifier.clone(),
                            message: err.to_string(),
                        });
                    }
                },
                ColumnRole::Unmatched { .. } => OutputCell::Missing,
            };
            cells.push(cell);
        }

        Ok(OutputRow::new(cells))
    }
}

fn resolve_roles(
    config: &TransformConfig,
    catalog: &SchemeCatalog,
) -> Result<Vec<ColumnRole>, ConfigError> {
    match &config.scheme_selection {
        SchemeSelection::ByColumnTitle => {
            let roles = catalog.resolve(&config.output_columns);
            if config.unmatched_columns == UnmatchedColumnPolicy::Reject {
                if let Some((index, name)) =
                    roles.iter().enumerate().find_map(|(i, role)| match role {
                        ColumnRole::Unmatched { name } => Some((i, name.clone())),
                        ColumnRole::Scheme(_) => None,
                    })
                {
                    return Err(ConfigError::UnmatchedColumn { index, name });
                }
            }
            Ok(roles)
        }
        SchemeSelection::Fixed(identifier) => {
            let scheme = catalog
                .get(identifier)
                .ok_or_else(|| ConfigError::UnknownScheme(identifier.clone()))?;
            if config.output_columns.len() != 1 {
                return Err(ConfigError::FixedSchemeWidth {
                    found: config.output_columns.len(),
                });
            }
            Ok(vec![ColumnRole::Scheme(scheme.clone())])
        }
    }
}
