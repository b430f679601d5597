//! Command-line interface components.

use crate::config::CodegenConfig;
use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, FUNCTION_NAME};
use crate::generator::ScheduleGenerator;
use crate::loader::load_table;
use crate::lookup::{NumericMatrix, ScheduleQuery, ScheduleValue};
use crate::models::GenerationStats;
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "scheduling-codegen")]
#[command(about = "Generate the optimalSchedulingValue MATLAB lookup from a scheduling CSV export")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the MATLAB function (default when no command is given)
    Generate(GenerateArgs),
    /// Show what the generated function returns for one query
    Preview(PreviewArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Scheduling export to read
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Destination of the generated function
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl GenerateArgs {
    pub fn to_config(&self) -> CodegenConfig {
        CodegenConfig::default()
            .with_input_path(&self.input)
            .with_output_path(&self.output)
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PreviewArgs {
    /// Scheduling export to read
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Reference time in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub time: f64,

    /// Offset added to the reference time, in seconds
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub time_offset: f64,

    /// 1-based signal position
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub field_idx: u32,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Set up structured logging on stderr; `RUST_LOG` takes precedence
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scheduling_codegen={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Dispatch the selected command
pub fn run(args: Args) -> Result<()> {
    let quiet = args.quiet;
    match args.command {
        Some(Commands::Preview(preview)) => run_preview(&preview),
        Some(Commands::Generate(generate)) => run_generate(&generate, quiet),
        None => run_generate(&GenerateArgs::default(), quiet),
    }
}

fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let generator = ScheduleGenerator::new(args.to_config());
    let stats = generator.run().with_context(|| {
        format!(
            "Failed to generate {} from {}",
            args.output.display(),
            args.input.display()
        )
    })?;

    if !quiet {
        print_generation_summary(&stats);
    }
    Ok(())
}

fn run_preview(args: &PreviewArgs) -> Result<()> {
    let (table, _) = load_table(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let matrix = NumericMatrix::from_table(&table)
        .with_context(|| format!("Cannot preview {}", args.input.display()))?;

    let query = ScheduleQuery {
        time: args.time,
        time_offset: args.time_offset,
        field_idx: args.field_idx as usize,
    };
    let result = matrix.evaluate(query);

    print_preview(&query, &result);
    Ok(())
}

fn print_generation_summary(stats: &GenerationStats) {
    println!("{}", "Generated scheduling lookup".bright_green().bold());
    println!(
        "  {} {}",
        "Function:".bright_cyan(),
        stats.output_path.display()
    );
    println!(
        "  {} {} signals x {} samples",
        "Table:".bright_cyan(),
        stats.load.columns.to_string().bright_white().bold(),
        stats.load.data_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {} decimal commas, {} underflow cells zeroed",
        "Normalized:".bright_cyan(),
        stats.load.decimal_commas_replaced,
        stats.load.cells_coerced_to_zero
    );
    if stats.load.ragged_rows() > 0 {
        println!(
            "  {} {} rows shorter and {} rows longer than the header",
            "Warning:".bright_yellow().bold(),
            stats.load.short_rows,
            stats.load.long_rows
        );
    }
    println!(
        "  {} {} bytes in {} ms",
        "Written:".bright_cyan(),
        stats.bytes_written,
        stats.processing_time_ms
    );
}

fn print_preview(query: &ScheduleQuery, result: &ScheduleValue) {
    println!(
        "{}",
        format!(
            "{}(time={}, timeOffset={}, fieldIdx={})",
            FUNCTION_NAME, query.time, query.time_offset, query.field_idx
        )
        .bright_green()
        .bold()
    );
    println!("  {} {}", "value:".bright_cyan(), result.value);
    println!(
        "  {} {}",
        "hmeStartUpPhase:".bright_cyan(),
        u8::from(result.start_up_phase)
    );
    println!("  {} {}", "hmeTargetValue:".bright_cyan(), result.target_value);
    println!(
        "  {} {}",
        "hmeStartUpPhaseTimeOffset:".bright_cyan(),
        result.start_up_time_offset
    );
}
