use super::element::Element;
use nalgebra::Point3;

/// Represents an atom in a chemical structure.
///
/// Atoms carry only what descriptor computations need: the element that
/// selects per-atom weights, a display name from the source file and the
/// 3D position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom as written in the source record (e.g. "C1", "HO").
    pub name: String,
    /// The chemical element of the atom.
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element,
            position,
        }
    }

    #[inline]
    pub fn is_heavy(&self) -> bool {
        !self.element.is_hydrogen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_fields() {
        let atom = Atom::new("O1", Element::O, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name, "O1");
        assert_eq!(atom.element, Element::O);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn hydrogen_is_not_heavy() {
        let h = Atom::new("H1", Element::H, Point3::origin());
        let c = Atom::new("C1", Element::C, Point3::origin());
        assert!(!h.is_heavy());
        assert!(c.is_heavy());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", Element::N, Point3::new(0.0, 0.0, 0.0));
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
