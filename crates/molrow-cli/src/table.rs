use crate::error::{CliError, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use molrow::core::io::bgf::BgfFile;
use molrow::core::io::traits::StructureFile;
use molrow::engine::row::{Cell, OutputCell, OutputRow, Row, RowKey};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Separator between the values of one descriptor cell.
const VALUE_SEPARATOR: &str = ";";

/// A CSV table held in memory, header row separated from the records.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<StringRecord>,
}

impl InputTable {
    pub fn read(path: &Path) -> Result<Self> {
        debug!("Reading input table from {:?}", path);
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    /// Converts every record into a [`SourceRow`].
    ///
    /// The structure column is read as a path to a BGF file, relative to the
    /// table's directory. An empty cell is missing and a numeric cell is kept
    /// as a number. Every other column is kept as a plain value. A structure
    /// file that cannot be read leaves the cell missing and is reported in
    /// [`SourceRow::load_error`].
    pub fn to_rows(&self, structure_column: usize, key_column: Option<usize>) -> Vec<SourceRow> {
        let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let key = key_column
                    .and_then(|k| record.get(k))
                    .map(str::to_string)
                    .unwrap_or_else(|| (i + 1).to_string());
                let mut load_error = None;
                let cells = record
                    .iter()
                    .enumerate()
                    .map(|(column, value)| {
                        if column != structure_column {
                            return parse_cell(value);
                        }
                        load_structure_cell(value, base_dir).unwrap_or_else(|err| {
                            load_error = Some(err);
                            Cell::Missing
                        })
                    })
                    .collect();
                SourceRow {
                    row: Row::new(RowKey::new(key), cells),
                    load_error,
                }
            })
            .collect()
    }
}

/// A record converted to a [`Row`], with the error that kept its structure
/// from loading, if any.
#[derive(Debug)]
pub struct SourceRow {
    pub row: Row,
    pub load_error: Option<CliError>,
}

fn parse_cell(value: &str) -> Cell {
    let value = value.trim();
    if value.is_empty() {
        Cell::Missing
    } else if let Ok(i) = value.parse::<i64>() {
        Cell::Integer(i)
    } else if let Ok(f) = value.parse::<f64>() {
        Cell::Real(f)
    } else {
        Cell::Text(value.to_string())
    }
}

fn load_structure_cell(value: &str, base_dir: &Path) -> Result<Cell> {
    match parse_cell(value) {
        Cell::Text(reference) => {
            let path = base_dir.join(&reference);
            let (structure, _) =
                BgfFile::read_from_path(&path).map_err(|e| CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                })?;
            Ok(Cell::Structure(structure))
        }
        other => Ok(other),
    }
}

/// Writes the input table followed by one column per output column.
///
/// Missing cells are written empty; descriptor vectors are written as their
/// values joined by `;`.
pub fn write_table(
    path: &Path,
    input: &InputTable,
    output_columns: &[String],
    rows: &[OutputRow],
) -> Result<()> {
    debug!("Writing annotated table to {:?}", path);
    let mut writer = Writer::from_path(path)?;

    let header = input
        .headers
        .iter()
        .map(String::as_str)
        .chain(output_columns.iter().map(String::as_str));
    writer.write_record(header)?;

    for (record, row) in input.records.iter().zip(rows) {
        let annotated: Vec<String> = row.cells().iter().map(format_cell).collect();
        writer.write_record(record.iter().chain(annotated.iter().map(String::as_str)))?;
    }
    writer.flush()?;
    Ok(())
}

fn format_cell(cell: &OutputCell) -> String {
    match cell {
        OutputCell::Missing => String::new(),
        OutputCell::Values(values) => values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(VALUE_SEPARATOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn water_bgf() -> String {
        let atom = |serial: usize, name: &str, xyz: [f64; 3], ff: &str| {
            format!(
                "{:<6} {:>5} {:<5} {:>3} {:1} {:>5}{:>10.5}{:>10.5}{:>10.5} {:<5}{:>3}{:>2} {:>8.5}",
                "HETATM", serial, name, "HOH", "A", 1, xyz[0], xyz[1], xyz[2], ff, 1, 0, 0.0
            )
        };
        [
            "BIOGRF  332".to_string(),
            "DESCRP water".to_string(),
            atom(1, "O", [0.0, 0.0, 0.0], "O_3"),
            atom(2, "H1", [0.96, 0.0, 0.0], "H_"),
            atom(3, "H2", [-0.24, 0.93, 0.0], "H_"),
            "CONECT     1     2     3".to_string(),
            "END".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn cells_parse_by_content() {
        assert!(matches!(parse_cell(""), Cell::Missing));
        assert!(matches!(parse_cell("  "), Cell::Missing));
        assert!(matches!(parse_cell("42"), Cell::Integer(42)));
        assert!(matches!(parse_cell("1.5"), Cell::Real(f) if f == 1.5));
        assert!(matches!(parse_cell("water.bgf"), Cell::Text(ref s) if s == "water.bgf"));
    }

    #[test]
    fn rows_load_structures_relative_to_table() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("mols")).unwrap();
        fs::write(dir.path().join("mols/water.bgf"), water_bgf()).unwrap();
        let csv_path = dir.path().join("input.csv");
        fs::write(&csv_path, "name,structure\nwater,mols/water.bgf\nblank,\nnumber,7\n").unwrap();

        let table = InputTable::read(&csv_path).unwrap();
        assert_eq!(table.headers, vec!["name", "structure"]);

        let rows: Vec<Row> = table.to_rows(1, Some(0)).into_iter().map(|r| r.row).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key.as_str(), "water");
        assert!(matches!(&rows[0].cells[1], Cell::Structure(s) if s.atom_count() == 3 && s.bond_count() == 2));
        assert!(rows[1].cells[1].is_missing());
        assert!(matches!(rows[2].cells[1], Cell::Integer(7)));

        let unkeyed = table.to_rows(1, None);
        assert_eq!(unkeyed[2].row.key.as_str(), "3");
        assert!(unkeyed.iter().all(|r| r.load_error.is_none()));
    }

    #[test]
    fn unreadable_structure_stays_with_its_row() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("water.bgf"), water_bgf()).unwrap();
        let csv_path = dir.path().join("input.csv");
        fs::write(&csv_path, "structure,note\nabsent.bgf,x\nwater.bgf,y\n").unwrap();
        let table = InputTable::read(&csv_path).unwrap();

        let rows = table.to_rows(0, None);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0].load_error, Some(CliError::FileParsing { .. })));
        assert!(rows[0].row.cells[0].is_missing());
        assert!(matches!(&rows[0].row.cells[1], Cell::Text(s) if s == "x"));
        assert!(rows[1].load_error.is_none());
        assert!(matches!(rows[1].row.cells[0], Cell::Structure(_)));
    }

    #[test]
    fn output_appends_descriptor_columns() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("input.csv");
        fs::write(&csv_path, "name\na\nb\n").unwrap();
        let table = InputTable::read(&csv_path).unwrap();

        let out_path = dir.path().join("out.csv");
        let rows = vec![
            OutputRow::new(vec![OutputCell::Values(vec![1.0, 0.5]), OutputCell::Missing]),
            OutputRow::missing(2),
        ];
        write_table(
            &out_path,
            &table,
            &["Unity Weights".to_string(), "Atomic Masses".to_string()],
            &rows,
        )
        .unwrap();

        let written = fs::read_to_string(out_path).unwrap();
        assert_eq!(
            written,
            "name,Unity Weights,Atomic Masses\na,1;0.5,\nb,,\n"
        );
    }
}
