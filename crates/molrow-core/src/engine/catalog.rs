use super::error::ConfigError;
use crate::core::descriptors::DescriptorKind;
use crate::core::descriptors::weights::Weighting;
use std::collections::HashSet;

/// A named way of parameterizing a descriptor.
///
/// `title` is what output columns are matched against; `parameter` is what
/// the descriptor capability receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightingScheme {
    pub identifier: String,
    pub title: String,
    pub parameter: String,
}

impl WeightingScheme {
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        parameter: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            parameter: parameter.into(),
        }
    }
}

/// What an output column contributes to each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRole {
    Scheme(WeightingScheme),
    Unmatched { name: String },
}

/// An immutable, ordered set of weighting schemes with unique identifiers and
/// unique titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeCatalog {
    schemes: Vec<WeightingScheme>,
}

impl SchemeCatalog {
    pub fn new(schemes: Vec<WeightingScheme>) -> Result<Self, ConfigError> {
        let mut identifiers = HashSet::new();
        let mut titles = HashSet::new();
        for scheme in &schemes {
            if !identifiers.insert(scheme.identifier.as_str()) {
                return Err(ConfigError::DuplicateScheme(scheme.identifier.clone()));
            }
            if !titles.insert(scheme.title.as_str()) {
                return Err(ConfigError::DuplicateTitle(scheme.title.clone()));
            }
        }
        Ok(Self { schemes })
    }

    /// The WHIM weighting schemes, one per atomic property table.
    pub fn whim() -> Self {
        let schemes = Weighting::ALL
            .iter()
            .map(|w| WeightingScheme::new(w.parameter(), w.title(), w.parameter()))
            .collect();
        Self { schemes }
    }

    pub fn composition() -> Self {
        Self {
            schemes: vec![
                WeightingScheme::new("all", "All Atoms", "all"),
                WeightingScheme::new("heavy", "Heavy Atoms", "heavy"),
            ],
        }
    }

    pub fn for_descriptor(kind: DescriptorKind) -> Self {
        match kind {
            DescriptorKind::Whim => Self::whim(),
            DescriptorKind::Composition => Self::composition(),
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&WeightingScheme> {
        self.schemes.iter().find(|s| s.identifier == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightingScheme> {
        self.schemes.iter()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// The first scheme in catalog order.
    pub fn default_scheme(&self) -> Option<&WeightingScheme> {
        self.schemes.first()
    }

    /// Assigns a role to every column, in column order.
    ///
    /// Matching is exact on the scheme title. Columns that match nothing are
    /// reported as [`ColumnRole::Unmatched`]; deciding what to do with them is
    /// left to the caller.
    pub fn resolve<S: AsRef<str>>(&self, columns: &[S]) -> Vec<ColumnRole> {
        columns
            .iter()
            .map(|column| {
                let name = column.as_ref();
                match self.schemes.iter().find(|s| s.title == name) {
                    Some(scheme) => ColumnRole::Scheme(scheme.clone()),
                    None => ColumnRole::Unmatched {
                        name: name.to_string(),
                    },
                }
            })
            .collect()
    }

    /// The schemes activated by `columns`, in column order.
    pub fn active_schemes<S: AsRef<str>>(&self, columns: &[S]) -> Vec<WeightingScheme> {
        self.resolve(columns)
            .into_iter()
            .filter_map(|role| match role {
                ColumnRole::Scheme(scheme) => Some(scheme),
                ColumnRole::Unmatched { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_scheme_catalog() -> SchemeCatalog {
        SchemeCatalog::new(vec![
            WeightingScheme::new("unity", "Unity", "unity_weights"),
            WeightingScheme::new("mass", "Mass", "atomic_masses"),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_follows_column_order_not_catalog_order() {
        let catalog = two_scheme_catalog();
        let active = catalog.active_schemes(&["Mass", "Unity"]);
        let ids: Vec<_> = active.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["mass", "unity"]);

        let active = catalog.active_schemes(&["Unity", "Mass"]);
        let ids: Vec<_> = active.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["unity", "mass"]);
    }

    #[test]
    fn resolve_reports_unmatched_columns_in_place() {
        let catalog = two_scheme_catalog();
        let roles = catalog.resolve(&["Unity", "Unrecognized"]);
        assert_eq!(roles.len(), 2);
        assert!(matches!(&roles[0], ColumnRole::Scheme(s) if s.identifier == "unity"));
        assert_eq!(
            roles[1],
            ColumnRole::Unmatched {
                name: "Unrecognized".to_string()
            }
        );
        assert_eq!(catalog.active_schemes(&["Unity", "Unrecognized"]).len(), 1);
    }

    #[test]
    fn matching_is_exact() {
        let catalog = two_scheme_catalog();
        assert!(catalog.active_schemes(&["unity", "Mass "]).is_empty());
    }

    #[test]
    fn new_rejects_duplicate_identifiers_and_titles() {
        let err = SchemeCatalog::new(vec![
            WeightingScheme::new("a", "A", "p"),
            WeightingScheme::new("a", "B", "q"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateScheme("a".to_string()));

        let err = SchemeCatalog::new(vec![
            WeightingScheme::new("a", "Same", "p"),
            WeightingScheme::new("b", "Same", "q"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateTitle("Same".to_string()));
    }

    #[test]
    fn builtin_catalogs_are_valid() {
        for catalog in [SchemeCatalog::whim(), SchemeCatalog::composition()] {
            assert!(SchemeCatalog::new(catalog.iter().cloned().collect()).is_ok());
        }
        let whim = SchemeCatalog::whim();
        assert_eq!(whim.len(), 5);
        assert_eq!(whim.default_scheme().unwrap().identifier, "unity");
        assert_eq!(whim.get("mass").unwrap().title, "Atomic Masses");
        assert_eq!(whim.get("polar").unwrap().title, "Atomic Polarizabilities");
        assert!(whim.get("charge").is_none());
    }

    #[test]
    fn catalog_follows_descriptor_kind() {
        assert_eq!(SchemeCatalog::for_descriptor(DescriptorKind::Whim), SchemeCatalog::whim());
        assert_eq!(
            SchemeCatalog::for_descriptor(DescriptorKind::Composition),
            SchemeCatalog::composition()
        );
    }
}
