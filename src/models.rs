//! Core data structures for schedule code generation.
//!
//! Defines the column-oriented table produced by the loader and the
//! statistics reported by the loader and the generation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One named signal and its samples, in data-row order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column-oriented view of the scheduling export
///
/// Column order follows the header row and defines the 1-based `fieldIdx`
/// positions of the generated function. Cell values stay textual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Find a column by its header name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// True when every column holds the same number of values
    pub fn is_rectangular(&self) -> bool {
        let rows = self.row_count();
        self.columns.iter().all(|column| column.len() == rows)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Loader statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub data_rows: usize,
    pub columns: usize,
    /// Data rows with fewer cells than the header
    pub short_rows: usize,
    /// Data rows with more cells than the header
    pub long_rows: usize,
    pub decimal_commas_replaced: usize,
    pub cells_coerced_to_zero: usize,
    pub duplicate_headers: usize,
}

impl LoadStats {
    pub fn ragged_rows(&self) -> usize {
        self.short_rows + self.long_rows
    }
}

/// Generation pipeline statistics
#[derive(Debug, Default)]
pub struct GenerationStats {
    pub load: LoadStats,
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub processing_time_ms: u128,
}
