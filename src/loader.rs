//! Scheduling table loading and cell normalization.
//!
//! Reads the comma-separated export of the scheduling optimizer into a
//! column-oriented [`Table`]. The first row is always the header. Cells are
//! assigned to header columns by position and normalized, but never parsed.

use crate::error::{CodegenError, Result};
use crate::models::{Column, LoadStats, Table};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Load a scheduling table from disk
pub fn load_table(file_path: &Path) -> Result<(Table, LoadStats)> {
    let file = File::open(file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CodegenError::InputNotFound {
            path: file_path.to_path_buf(),
        },
        _ => CodegenError::Io(e),
    })?;

    let (table, stats) = read_table(file)?;

    debug!(
        "Loaded {}: {} columns, {} data rows",
        file_path.display(),
        stats.columns,
        stats.data_rows
    );

    Ok((table, stats))
}

/// Read a scheduling table from any comma-separated source
pub fn read_table<R: Read>(source: R) -> Result<(Table, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .from_reader(source);

    let mut builder = TableBuilder::default();

    for record in reader.byte_records() {
        let record = record?;
        let cells = record.iter().map(|field| String::from_utf8_lossy(field));

        if builder.has_header() {
            builder.push_row(cells);
        } else {
            builder.set_header(cells);
        }
    }

    Ok(builder.build())
}

/// Normalize a raw cell token
///
/// Decimal commas become periods, then any token containing `e-` is
/// replaced by `0`.
pub fn normalize_cell(raw: &str) -> String {
    let cell = raw.replace(',', ".");
    if cell.contains("e-") {
        "0".to_string()
    } else {
        cell
    }
}

/// Accumulates rows into columns, keyed by header position
#[derive(Default)]
struct TableBuilder {
    columns: Vec<Column>,
    /// Header position -> index into `columns`
    positions: Option<Vec<usize>>,
    stats: LoadStats,
}

impl TableBuilder {
    fn has_header(&self) -> bool {
        self.positions.is_some()
    }

    fn set_header<S: AsRef<str>>(&mut self, names: impl Iterator<Item = S>) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut positions = Vec::new();

        for name in names {
            let name = name.as_ref();
            let index = match seen.get(name) {
                Some(&index) => {
                    warn!(
                        "Duplicate column name '{}' merged into column {}",
                        name,
                        index + 1
                    );
                    self.stats.duplicate_headers += 1;
                    index
                }
                None => {
                    let index = self.columns.len();
                    self.columns.push(Column::new(name));
                    seen.insert(name.to_string(), index);
                    index
                }
            };
            positions.push(index);
        }

        self.stats.columns = self.columns.len();
        self.positions = Some(positions);
    }

    fn push_row<S: AsRef<str>>(&mut self, cells: impl Iterator<Item = S>) {
        let Some(positions) = &self.positions else {
            return;
        };

        self.stats.data_rows += 1;
        let row_number = self.stats.data_rows;
        let mut cell_count = 0;

        for (position, raw) in cells.enumerate() {
            cell_count += 1;
            let Some(&index) = positions.get(position) else {
                continue;
            };

            let raw = raw.as_ref();
            if raw.contains("e-") {
                self.stats.cells_coerced_to_zero += 1;
            } else if raw.contains(',') {
                self.stats.decimal_commas_replaced += 1;
            }
            self.columns[index].values.push(normalize_cell(raw));
        }

        if cell_count < positions.len() {
            warn!(
                "Data row {} has {} cells, header has {}; trailing columns get no value",
                row_number,
                cell_count,
                positions.len()
            );
            self.stats.short_rows += 1;
        } else if cell_count > positions.len() {
            warn!(
                "Data row {} has {} cells, header has {}; extra cells dropped",
                row_number,
                cell_count,
                positions.len()
            );
            self.stats.long_rows += 1;
        }
    }

    fn build(self) -> (Table, LoadStats) {
        (Table::new(self.columns), self.stats)
    }
}
