use super::ids::AtomId;

/// Multiplicity of a covalent bond.
///
/// Bonds without an explicit order are single bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Reads one token of a BGF `ORDER` record.
    ///
    /// Orders are written as `1`, `2` or `3`; `ar` marks an aromatic bond.
    pub fn from_bgf_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Single),
            "2" => Some(Self::Double),
            "3" => Some(Self::Triple),
            _ if code.eq_ignore_ascii_case("ar") => Some(Self::Aromatic),
            _ => None,
        }
    }
}

/// An undirected bond between two atoms of the same [`Structure`](super::structure::Structure).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
        }
    }
}
