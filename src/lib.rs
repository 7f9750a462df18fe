// bulkgen - Synthetic student enrollment generator for bulk-upload spreadsheets
//
// This is the library crate containing the counters, identifier formats and batch logic.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use cli::{Cli, CliError, generate_bulk_workbook};
pub use config::ConfigManager;
pub use models::{GeneratorConfig, StudentRecord};
pub use services::{Batch, BatchError, BatchGenerator, CounterStore, FileCounterStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
