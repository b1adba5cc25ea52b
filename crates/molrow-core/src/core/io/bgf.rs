use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::models::topology::BondOrder;
use nalgebra::Point3;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, BufRead};
use thiserror::Error;

/// Minimum length of an ATOM/HETATM record: everything up to the end of the
/// z coordinate field.
const MIN_ATOM_RECORD_LEN: usize = 60;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BgfMetadata {
    /// Non-record lines preceding the atom block (BIOGRF, DESCRP, REMARK, ...).
    pub header_lines: Vec<String>,
}

impl BgfMetadata {
    /// The molecule title from the `DESCRP` record, if present.
    pub fn description(&self) -> Option<&str> {
        self.header_lines
            .iter()
            .find_map(|line| line.strip_prefix("DESCRP"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum BgfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: BgfParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum BgfParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 60 chars)")]
    LineTooShort,
    #[error("Invalid bond order in ORDER record (value: '{value}')")]
    InvalidBondOrder { value: String },
    #[error("Cannot determine element from type '{ff_type}' or name '{name}'")]
    UnknownElement { ff_type: String, name: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, columns: &str) -> Result<f64, BgfError> {
    let raw = slice_and_trim(line, start, start + 10);
    raw.parse().map_err(|_| BgfError::Parse {
        line: line_num,
        kind: BgfParseErrorKind::InvalidFloat {
            columns: columns.into(),
            value: raw.into(),
        },
    })
}

fn parse_serial(token: &str, line_num: usize) -> Result<usize, BgfError> {
    token.parse().map_err(|_| BgfError::Parse {
        line: line_num,
        kind: BgfParseErrorKind::InvalidInt {
            columns: "CONECT/ORDER".into(),
            value: token.into(),
        },
    })
}

/// Reader for the BIOGRAF (`.bgf`) format.
///
/// Atom records use the fixed-column layout
/// `(a6,1x,i5,1x,a5,1x,a3,1x,a1,1x,a5,3f10.5,1x,a5,i3,i2,1x,f8.5)`; only
/// the serial, name, coordinates and force-field type are consumed.
/// `CONECT` lines list an atom followed by all of its neighbours and the
/// optional `ORDER` line for the same atom lists the matching bond orders.
pub struct BgfFile;

impl StructureFile for BgfFile {
    type Metadata = BgfMetadata;
    type Error = BgfError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut structure = Structure::new();
        let mut metadata = BgfMetadata::default();
        let mut serial_map: HashMap<usize, AtomId> = HashMap::new();

        let mut conect: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut orders: HashMap<usize, Vec<BondOrder>> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "" => continue,
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_RECORD_LEN {
                        return Err(BgfError::Parse {
                            line: line_num,
                            kind: BgfParseErrorKind::LineTooShort,
                        });
                    }

                    let serial_str = slice_and_trim(&line, 7, 12);
                    let name_str = slice_and_trim(&line, 13, 18);
                    let ff_type_str = slice_and_trim(&line, 61, 66);

                    if name_str.is_empty() {
                        return Err(BgfError::Parse {
                            line: line_num,
                            kind: BgfParseErrorKind::MissingRequiredField {
                                columns: "14-18".into(),
                            },
                        });
                    }
                    let serial: usize = serial_str.parse().map_err(|_| BgfError::Parse {
                        line: line_num,
                        kind: BgfParseErrorKind::InvalidInt {
                            columns: "8-12".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    if serial_map.contains_key(&serial) {
                        return Err(BgfError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }

                    let x = parse_coordinate(&line, line_num, 30, "31-40")?;
                    let y = parse_coordinate(&line, line_num, 40, "41-50")?;
                    let z = parse_coordinate(&line, line_num, 50, "51-60")?;

                    let element =
                        Element::infer(ff_type_str, name_str).map_err(|_| BgfError::Parse {
                            line: line_num,
                            kind: BgfParseErrorKind::UnknownElement {
                                ff_type: ff_type_str.into(),
                                name: name_str.into(),
                            },
                        })?;

                    let id = structure.add_atom(Atom::new(name_str, element, Point3::new(x, y, z)));
                    serial_map.insert(serial, id);
                }
                "CONECT" | "ORDER" => {
                    let mut parts = line.split_whitespace().skip(1);
                    let Some(first) = parts.next() else {
                        continue;
                    };
                    let owner = parse_serial(first, line_num)?;
                    if record_type == "CONECT" {
                        let neighbors = conect.entry(owner).or_default();
                        for token in parts {
                            neighbors.push(parse_serial(token, line_num)?);
                        }
                    } else {
                        let entry = orders.entry(owner).or_default();
                        for token in parts {
                            let order =
                                BondOrder::from_bgf_code(token).ok_or_else(|| BgfError::Parse {
                                    line: line_num,
                                    kind: BgfParseErrorKind::InvalidBondOrder {
                                        value: token.into(),
                                    },
                                })?;
                            entry.push(order);
                        }
                    }
                }
                "END" => break,
                _ => metadata.header_lines.push(line.clone()),
            }
        }

        if serial_map.is_empty() {
            return Err(BgfError::MissingRecord("ATOM/HETATM records".into()));
        }

        for (owner, neighbors) in &conect {
            let owner_id = *serial_map.get(owner).ok_or_else(|| {
                BgfError::Inconsistency(format!("CONECT references unknown atom serial {}", owner))
            })?;
            let owner_orders = orders.get(owner);
            for (i, neighbor) in neighbors.iter().enumerate() {
                let neighbor_id = *serial_map.get(neighbor).ok_or_else(|| {
                    BgfError::Inconsistency(format!(
                        "CONECT for atom {} references unknown atom serial {}",
                        owner, neighbor
                    ))
                })?;
                let order = owner_orders
                    .and_then(|o| o.get(i))
                    .copied()
                    .unwrap_or_default();
                structure.add_bond(owner_id, neighbor_id, order);
            }
        }

        Ok((structure, metadata))
    }
}
