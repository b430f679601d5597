//! Error handling for schedule code generation.
//!
//! Covers input loading, artifact writing, configuration checks and the
//! numeric conversion used by the lookup preview.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input table not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to write generated function to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Non-numeric cell in column '{column}' at data row {row}: '{value}'")]
    NonNumericCell {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Ragged table: column '{column}' has {found} values, expected {expected}")]
    RaggedTable {
        column: String,
        found: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodegenError>;
