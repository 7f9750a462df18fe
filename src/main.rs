//! bulkgen - Synthetic student enrollment generator
//!
//! Main entry point for the command-line tool.
//!
//! # Execution Flow
//!
//! 1. Parse the single `TEMPLATE` argument (missing → usage, exit 1; not a file →
//!    diagnostic, exit 1). Nothing is created on disk before this check passes.
//! 2. Load `bulkgen.yaml` from the working directory (defaults if absent)
//! 3. Initialize logging → `<output_dir>/logs/bulkgen.<date>`
//! 4. Read the template, load counters, generate the batch
//! 5. Write `<output_dir>/<prefix>_<millis>.xlsx`, then save counters and print the path
//!
//! # Files
//!
//! Under the output directory (default `output/`):
//! - `last_student_id.txt`: last issued student id number
//! - `last_nic_index.txt`: last used NIC index
//! - `bulk_upload_<millis>.xlsx`: one workbook per run

use anyhow::Result;
use bulkgen::{APP_NAME, Cli, CliError, ConfigManager, VERSION, generate_bulk_workbook};
use clap::Parser;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let template = match cli.template_path() {
        Ok(template) => template,
        Err(e @ CliError::MissingArgument) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let config_manager = ConfigManager::new(".");
    let config = config_manager.load_generator_config()?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = bulkgen::logging::setup_logging_with_console(
        &config.log_dir(),
        APP_NAME,
        config.debug_mode,
        config.debug_mode,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    if config_manager.config_path().exists() {
        tracing::info!("Using config {}", config_manager.config_path());
    } else {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_manager.config_path()
        );
    }

    tracing::info!(
        "Generating {} records from template {}",
        config.row_count,
        template
    );

    let output = generate_bulk_workbook(template, &config)?;

    println!("✅ Bulk Excel created: {}", output);
    tracing::info!("Run complete: {}", output);

    Ok(ExitCode::SUCCESS)
}
