//! Generation pipeline.
//!
//! Runs load, emit and write in sequence. The whole function text is built
//! in memory before the destination is touched, so a failed load never
//! leaves a partial artifact behind.

use crate::config::CodegenConfig;
use crate::emitter::emit_function;
use crate::error::Result;
use crate::loader::load_table;
use crate::models::GenerationStats;
use crate::writer::write_function;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Generator for the scheduling lookup function
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: CodegenConfig,
}

impl ScheduleGenerator {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Main generation entry point
    pub fn run(&self) -> Result<GenerationStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Loading table from {}", self.config.input_path.display());
        let (table, load_stats) = load_table(&self.config.input_path)?;

        if load_stats.ragged_rows() > 0 {
            warn!(
                "{} of {} data rows do not match the header width; valueMap will be uneven",
                load_stats.ragged_rows(),
                load_stats.data_rows
            );
        }
        if table.is_empty() {
            warn!("Input has no data rows; generated valueMap is empty");
        }

        let code = emit_function(&table);
        debug!(
            "Emitted {} bytes for {} signals x {} samples",
            code.len(),
            table.column_count(),
            table.row_count()
        );

        let bytes_written = write_function(&self.config.output_path, &code)?;
        info!(
            "Generated {} ({} bytes)",
            self.config.output_path.display(),
            bytes_written
        );

        Ok(GenerationStats {
            load: load_stats,
            output_path: self.config.output_path.clone(),
            bytes_written,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }
}
