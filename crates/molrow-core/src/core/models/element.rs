use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

/// Chemical elements recognised in input structures.
///
/// Covers the organic subset, halogens, common counter-ions and the
/// transition metals that appear in small-molecule datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    Li = 3,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    K = 19,
    Ca = 20,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    As = 33,
    Se = 34,
    Br = 35,
    Sn = 50,
    I = 53,
}

impl Element {
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::Li => 6.94,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Na => 22.99,
            Element::Mg => 24.305,
            Element::Al => 26.982,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::K => 39.098,
            Element::Ca => 40.078,
            Element::Fe => 55.845,
            Element::Co => 58.933,
            Element::Ni => 58.693,
            Element::Cu => 63.546,
            Element::Zn => 65.38,
            Element::As => 74.922,
            Element::Se => 78.971,
            Element::Br => 79.904,
            Element::Sn => 118.71,
            Element::I => 126.9,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::Li => "Li",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::As => "As",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::Sn => "Sn",
            Element::I => "I",
        }
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }

    /// Infers the element from a force-field atom type such as `C_3`, `N_R`
    /// or `Cl`, falling back to the atom name when the type is not
    /// recognised.
    pub fn infer(force_field_type: &str, atom_name: &str) -> Result<Self, ParseElementError> {
        let prefix = force_field_type
            .split('_')
            .next()
            .unwrap_or("")
            .trim();
        if let Ok(element) = normalize_symbol(prefix).parse() {
            return Ok(element);
        }

        let letters: String = atom_name
            .trim()
            .chars()
            .skip_while(|c| c.is_ascii_digit())
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        let two: String = letters.chars().take(2).collect();
        if two.chars().nth(1).is_some_and(|c| c.is_ascii_lowercase()) {
            if let Ok(element) = two.parse() {
                return Ok(element);
            }
        }
        let one: String = letters.chars().take(1).collect();
        normalize_symbol(&one)
            .parse()
            .map_err(|_| ParseElementError(format!("{force_field_type}/{atom_name}")))
    }
}

fn normalize_symbol(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Element::H),
            "Li" => Ok(Element::Li),
            "B" => Ok(Element::B),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "Na" => Ok(Element::Na),
            "Mg" => Ok(Element::Mg),
            "Al" => Ok(Element::Al),
            "Si" => Ok(Element::Si),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            "K" => Ok(Element::K),
            "Ca" => Ok(Element::Ca),
            "Fe" => Ok(Element::Fe),
            "Co" => Ok(Element::Co),
            "Ni" => Ok(Element::Ni),
            "Cu" => Ok(Element::Cu),
            "Zn" => Ok(Element::Zn),
            "As" => Ok(Element::As),
            "Se" => Ok(Element::Se),
            "Br" => Ok(Element::Br),
            "Sn" => Ok(Element::Sn),
            "I" => Ok(Element::I),
            _ => Err(ParseElementError(s.to_string())),
        }
    }
}
