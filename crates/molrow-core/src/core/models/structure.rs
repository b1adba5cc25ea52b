use super::atom::Atom;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashMap, HashSet};

/// A molecular graph: atoms connected by bonds.
///
/// Atoms keep the order in which they were added. Every traversal in the
/// crate walks atoms in this order, so results that depend on atom order
/// (fragment partitioning in particular) are reproducible for a given input
/// file regardless of how the slot map lays out its storage.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Atom IDs in insertion order.
    order: Vec<AtomId>,
    /// List of all bonds in the structure.
    bonds: Vec<Bond>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.order.iter().map(move |&id| (id, &self.atoms[id]))
    }

    /// Returns the atom IDs in insertion order.
    pub fn atom_ids(&self) -> &[AtomId] {
        &self.order
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds an atom and returns its ID.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.order.push(id);
        self.bond_adjacency.insert(id, Vec::new());
        id
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists (in either direction) is a no-op.
    ///
    /// # Return
    ///
    /// Returns `None` if either atom does not exist or the bond would connect
    /// an atom to itself, otherwise `Some(())`.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
        {
            return None;
        }

        let already_bonded = self
            .bond_adjacency
            .get(atom1_id)
            .is_some_and(|neighbors| neighbors.contains(&atom2_id));
        if already_bonded {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency.get_mut(atom1_id)?.push(atom2_id);
        self.bond_adjacency.get_mut(atom2_id)?.push(atom1_id);
        Some(())
    }

    /// Retrieves the bonded neighbors of an atom.
    pub fn bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Builds the subgraph induced by the given atoms.
    ///
    /// Atoms keep their relative insertion order from `self`, regardless of
    /// the order of `atom_ids`. Only bonds with both ends in the selection
    /// are carried over. Unknown IDs are ignored.
    pub fn induced_subgraph(&self, atom_ids: &[AtomId]) -> Structure {
        let selected: HashSet<AtomId> = atom_ids.iter().copied().collect();
        let mut fragment = Structure::new();
        let mut id_map: HashMap<AtomId, AtomId> = HashMap::with_capacity(selected.len());

        for (old_id, atom) in self.atoms_iter() {
            if selected.contains(&old_id) {
                let new_id = fragment.add_atom(atom.clone());
                id_map.insert(old_id, new_id);
            }
        }

        for bond in &self.bonds {
            if let (Some(&a1), Some(&a2)) = (id_map.get(&bond.atom1_id), id_map.get(&bond.atom2_id)) {
                fragment.add_bond(a1, a2, bond.order);
            }
        }

        fragment
    }

    /// Sum of the atomic masses of all atoms, in Daltons.
    pub fn molecular_weight(&self) -> f64 {
        self.atoms_iter()
            .map(|(_, atom)| atom.element.atomic_mass())
            .sum()
    }
}
