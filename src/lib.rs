//! Scheduling Code Generator Library
//!
//! Turns the comma-separated export of the continuous-manufacturing
//! scheduling optimizer into `optimalSchedulingValue`, a MATLAB function
//! that looks up the next planned value of a signal and detects the start-up
//! ramp of the hot-melt extruder.
//!
//! This library provides tools for:
//! - Loading the export into a column-oriented table with decimal-comma and
//!   underflow normalization
//! - Emitting the MATLAB function with the table embedded as a transposed matrix
//! - Writing the generated artifact
//! - Previewing what the generated function returns for a query

pub mod cli;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod loader;
pub mod lookup;
pub mod models;
pub mod writer;

// Re-export commonly used types
pub use config::CodegenConfig;
pub use emitter::{ScheduleFunction, emit_function};
pub use error::{CodegenError, Result};
pub use generator::ScheduleGenerator;
pub use loader::{load_table, normalize_cell, read_table};
pub use lookup::{NumericMatrix, ScheduleQuery, ScheduleValue};
pub use models::{Column, GenerationStats, LoadStats, Table};
