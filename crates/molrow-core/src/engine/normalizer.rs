use super::config::FragmentSelection;
use crate::core::graph::{BfsPartitioner, GraphPartitioner};
use crate::core::models::structure::Structure;
use std::borrow::Cow;
use tracing::debug;

/// Reduces a structure to a single connected component.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityNormalizer<P = BfsPartitioner> {
    partitioner: P,
    selection: FragmentSelection,
}

impl ConnectivityNormalizer {
    pub fn new(selection: FragmentSelection) -> Self {
        Self::with_partitioner(BfsPartitioner, selection)
    }
}

impl<P: GraphPartitioner> ConnectivityNormalizer<P> {
    pub fn with_partitioner(partitioner: P, selection: FragmentSelection) -> Self {
        Self {
            partitioner,
            selection,
        }
    }

    pub fn selection(&self) -> FragmentSelection {
        self.selection
    }

    /// Returns `structure` itself if it is connected, otherwise the fragment
    /// chosen by the configured [`FragmentSelection`].
    ///
    /// The empty structure counts as connected.
    pub fn normalize<'s>(&self, structure: &'s Structure) -> Cow<'s, Structure> {
        if self.partitioner.is_connected(structure) {
            return Cow::Borrowed(structure);
        }

        let fragments = self.partitioner.partition(structure);
        let count = fragments.len();
        let chosen = match self.selection {
            FragmentSelection::First => fragments.into_iter().next(),
            FragmentSelection::Largest => fragments.into_iter().reduce(|best, candidate| {
                if candidate.atom_count() > best.atom_count() {
                    candidate
                } else {
                    best
                }
            }),
        };

        match chosen {
            Some(fragment) => {
                debug!(
                    fragments = count,
                    kept_atoms = fragment.atom_count(),
                    total_atoms = structure.atom_count(),
                    selection = ?self.selection,
                    "Disconnected structure reduced to one fragment."
                );
                Cow::Owned(fragment)
            }
            None => Cow::Borrowed(structure),
        }
    }
}
