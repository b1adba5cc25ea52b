use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use slotmap::SecondaryMap;
use std::collections::VecDeque;

/// Connectivity queries over a molecular graph.
pub trait GraphPartitioner {
    /// Returns `true` if every atom is reachable from every other atom.
    ///
    /// A structure with zero or one atom is connected.
    fn is_connected(&self, structure: &Structure) -> bool;

    /// Splits a structure into its connected components.
    ///
    /// Components are ordered by the insertion position of their earliest
    /// atom, and each component keeps the relative atom order of the input.
    fn partition(&self, structure: &Structure) -> Vec<Structure>;
}

/// Breadth-first search partitioner.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPartitioner;

impl BfsPartitioner {
    /// Assigns a component index to every atom. Indices are dense and follow
    /// the order in which each component's first atom appears.
    fn label_components(structure: &Structure) -> (SecondaryMap<AtomId, usize>, usize) {
        let mut labels: SecondaryMap<AtomId, usize> = SecondaryMap::new();
        let mut queue = VecDeque::new();
        let mut count = 0;

        for &seed in structure.atom_ids() {
            if labels.contains_key(seed) {
                continue;
            }
            labels.insert(seed, count);
            queue.push_back(seed);

            while let Some(current) = queue.pop_front() {
                for &neighbor in structure.bonded_neighbors(current).unwrap_or(&[]) {
                    if !labels.contains_key(neighbor) {
                        labels.insert(neighbor, count);
                        queue.push_back(neighbor);
                    }
                }
            }
            count += 1;
        }

        (labels, count)
    }
}

impl GraphPartitioner for BfsPartitioner {
    fn is_connected(&self, structure: &Structure) -> bool {
        let (_, count) = Self::label_components(structure);
        count <= 1
    }

    fn partition(&self, structure: &Structure) -> Vec<Structure> {
        let (labels, count) = Self::label_components(structure);
        let mut groups: Vec<Vec<AtomId>> = vec![Vec::new(); count];
        for &id in structure.atom_ids() {
            groups[labels[id]].push(id);
        }
        groups
            .iter()
            .map(|ids| structure.induced_subgraph(ids))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::topology::BondOrder;
    use nalgebra::Point3;

    fn chain(structure: &mut Structure, element: Element, n: usize, x0: f64) -> Vec<AtomId> {
        let ids: Vec<AtomId> = (0..n)
            .map(|i| {
                structure.add_atom(Atom::new(
                    &format!("{}{}", element, i),
                    element,
                    Point3::new(x0 + i as f64 * 1.5, 0.0, 0.0),
                ))
            })
            .collect();
        for pair in ids.windows(2) {
            structure.add_bond(pair[0], pair[1], BondOrder::Single);
        }
        ids
    }

    #[test]
    fn empty_and_single_atom_structures_are_connected() {
        let partitioner = BfsPartitioner;
        assert!(partitioner.is_connected(&Structure::new()));

        let mut single = Structure::new();
        chain(&mut single, Element::C, 1, 0.0);
        assert!(partitioner.is_connected(&single));
    }

    #[test]
    fn bonded_chain_is_connected() {
        let mut s = Structure::new();
        chain(&mut s, Element::C, 4, 0.0);
        assert!(BfsPartitioner.is_connected(&s));
        assert_eq!(BfsPartitioner.partition(&s).len(), 1);
    }

    #[test]
    fn partition_orders_components_by_first_atom() {
        let mut s = Structure::new();
        chain(&mut s, Element::N, 1, 20.0);
        chain(&mut s, Element::C, 3, 0.0);
        chain(&mut s, Element::O, 2, 10.0);

        assert!(!BfsPartitioner.is_connected(&s));
        let parts = BfsPartitioner.partition(&s);
        let sizes: Vec<_> = parts.iter().map(Structure::atom_count).collect();
        assert_eq!(sizes, vec![1, 3, 2]);
        assert_eq!(parts[1].bond_count(), 2);
        assert_eq!(parts[2].bond_count(), 1);
        assert!(parts.iter().all(|p| BfsPartitioner.is_connected(p)));
    }

    #[test]
    fn interleaved_fragments_are_grouped_correctly() {
        let mut s = Structure::new();
        let a = s.add_atom(Atom::new("A", Element::C, Point3::origin()));
        let b = s.add_atom(Atom::new("B", Element::O, Point3::origin()));
        let c = s.add_atom(Atom::new("C", Element::C, Point3::origin()));
        let d = s.add_atom(Atom::new("D", Element::O, Point3::origin()));
        s.add_bond(a, c, BondOrder::Single);
        s.add_bond(b, d, BondOrder::Double);

        let parts = BfsPartitioner.partition(&s);
        assert_eq!(parts.len(), 2);
        let first: Vec<_> = parts[0].atoms_iter().map(|(_, x)| x.name.clone()).collect();
        let second: Vec<_> = parts[1].atoms_iter().map(|(_, x)| x.name.clone()).collect();
        assert_eq!(first, vec!["A", "C"]);
        assert_eq!(second, vec!["B", "D"]);
        assert_eq!(parts[1].bonds()[0].order, BondOrder::Double);
    }
}
