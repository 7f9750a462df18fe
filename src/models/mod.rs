//! Data models for bulkgen.
//!
//! - [`GeneratorConfig`]: Run settings loaded from `bulkgen.yaml` (row count, output
//!   directory, tracker file names, mail providers)
//! - [`StudentRecord`]: One generated enrollment row and its spreadsheet column headers

pub mod config;
pub mod record;

pub use config::{DEFAULT_MAIL_DOMAINS, DEFAULT_ROW_COUNT, GeneratorConfig};
pub use record::StudentRecord;
