//! Command-line front door.
//!
//! One positional argument, the template workbook; everything else comes from
//! `bulkgen.yaml` (see [`GeneratorConfig`]).

use crate::models::GeneratorConfig;
use crate::services::{
    BatchGenerator, FileCounterStore, RandomPersonSource, output_path, read_template,
    write_workbook,
};
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use thiserror::Error;

/// Usage line printed when the template argument is missing
pub const USAGE: &str = "Usage: bulkgen <template.xlsx>";

/// Errors reported to the user with exit code 1
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("Usage: bulkgen <template.xlsx>")]
    MissingArgument,

    #[error("Template file not found: {0}")]
    TemplateNotFound(Utf8PathBuf),
}

#[derive(Parser, Debug)]
#[command(
    name = "bulkgen",
    version,
    about = "Append synthetic student records to a bulk-upload spreadsheet template"
)]
pub struct Cli {
    /// Spreadsheet template whose first sheet is replaced by the generated records
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<Utf8PathBuf>,
}

impl Cli {
    /// The template path, checked to name an existing file.
    pub fn template_path(&self) -> Result<&Utf8Path, CliError> {
        let template = self.template.as_deref().ok_or(CliError::MissingArgument)?;
        if !template.is_file() {
            return Err(CliError::TemplateNotFound(template.to_path_buf()));
        }
        Ok(template)
    }
}

/// Generate one batch for `template` and write it next to the tracker files.
///
/// The template is read before the counters are loaded, and the counters are saved
/// only once the workbook has been written, so a failure at any step leaves the
/// tracker files as they were.
///
/// # Returns
/// Path of the written workbook
///
/// # Errors
/// [`CliError::TemplateNotFound`] if the template has disappeared, otherwise any
/// failure to read the template, write the workbook or persist counters.
pub fn generate_bulk_workbook(template: &Utf8Path, config: &GeneratorConfig) -> Result<Utf8PathBuf> {
    let template_exists = template.is_file();
    if !template_exists {
        return Err(CliError::TemplateNotFound(template.to_path_buf()).into());
    }

    let book = read_template(template)?;

    let student_ids = FileCounterStore::new(config.student_id_tracker_path());
    let nic_indices = FileCounterStore::new(config.nic_index_tracker_path());

    let mut generator = BatchGenerator::new(
        RandomPersonSource::new(config.seed),
        config.mail_domains.clone(),
    )?;

    let output = output_path(&config.output_dir, &config.output_prefix)?;

    generator.run_with(
        template_exists,
        config.row_count,
        &student_ids,
        &nic_indices,
        |batch| Ok(write_workbook(book, batch, &output)?),
    )?;

    Ok(output)
}
