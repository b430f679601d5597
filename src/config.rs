//! Configuration management and validation.
//!
//! Holds the input and output locations of a generation run.

use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Comma-separated scheduling export to read
    pub input_path: PathBuf,

    /// Destination of the generated function, overwritten on every run
    pub output_path: PathBuf,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl CodegenConfig {
    /// Set the input table path
    pub fn with_input_path(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.input_path = input_path.into();
        self
    }

    /// Set the generated function path
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Reject configurations that would overwrite the input table
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(CodegenError::Configuration {
                message: "input path is empty".to_string(),
            });
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(CodegenError::Configuration {
                message: "output path is empty".to_string(),
            });
        }

        let same_file = match (
            self.input_path.canonicalize(),
            self.output_path.canonicalize(),
        ) {
            (Ok(input), Ok(output)) => input == output,
            _ => self.input_path == self.output_path,
        };

        if same_file {
            return Err(CodegenError::Configuration {
                message: format!(
                    "output path {} would overwrite the input table",
                    self.output_path.display()
                ),
            });
        }

        Ok(())
    }
}
