//! Spreadsheet I/O for the bulk-upload template.
//!
//! The template's workbook is reused as-is except for its first sheet, which is
//! replaced by a header row plus one row per generated record. All cells are written
//! as text so ids and NICs keep their leading zeros.

use crate::services::batch::{Batch, BatchError};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;
use umya_spreadsheet::Spreadsheet;

/// Errors from reading or writing workbooks
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Failed to read workbook {path}: {message}")]
    Read { path: Utf8PathBuf, message: String },

    #[error("Failed to write workbook {path}: {message}")]
    Write { path: Utf8PathBuf, message: String },

    #[error("Workbook {0} has no sheets")]
    MissingSheet(Utf8PathBuf),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Build a fresh output path `<output_dir>/<prefix>_<unix millis>.xlsx`.
///
/// Creates `output_dir` if needed. If a file with that timestamp already exists the
/// timestamp is bumped until the name is free.
pub fn output_path(output_dir: &Utf8Path, prefix: &str) -> Result<Utf8PathBuf> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir))?;
    }

    let mut stamp = chrono::Utc::now().timestamp_millis();
    loop {
        let candidate = output_dir.join(format!("{}_{}.xlsx", prefix, stamp));
        if !candidate.exists() {
            return Ok(candidate);
        }
        stamp += 1;
    }
}

/// Open `template` and check it has a first sheet to replace.
pub fn read_template(template: &Utf8Path) -> Result<Spreadsheet, WorkbookError> {
    let book = umya_spreadsheet::reader::xlsx::read(template).map_err(|e| {
        WorkbookError::Read {
            path: template.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    if book.get_sheet(&0).is_none() {
        return Err(WorkbookError::MissingSheet(template.to_path_buf()));
    }

    tracing::debug!("Read template {}", template);
    Ok(book)
}

/// Replace the first sheet of `book` with `batch` and save it to `output`.
pub fn write_workbook(
    mut book: Spreadsheet,
    batch: &Batch,
    output: &Utf8Path,
) -> Result<(), WorkbookError> {
    let headers = batch.headers()?;

    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| WorkbookError::MissingSheet(output.to_path_buf()))?;

    let existing_rows = sheet.get_highest_row();
    if existing_rows > 0 {
        sheet.remove_row(&1, &existing_rows);
    }
    tracing::debug!(
        "Cleared {} template rows from sheet '{}'",
        existing_rows,
        sheet.get_name()
    );

    for (col, header) in (1u32..).zip(headers.iter()) {
        sheet.get_cell_mut((col, 1)).set_value_string(*header);
    }

    for (row, record) in (2u32..).zip(batch.records.iter()) {
        for (col, value) in (1u32..).zip(record.to_row().into_values()) {
            sheet.get_cell_mut((col, row)).set_value_string(value);
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, output).map_err(|e| WorkbookError::Write {
        path: output.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!("Wrote {} records to {}", batch.len(), output);
    Ok(())
}

/// Read `template`, replace its first sheet with `batch` and save to `output`.
pub fn write_batch(template: &Utf8Path, batch: &Batch, output: &Utf8Path) -> Result<(), WorkbookError> {
    batch.headers()?;
    let book = read_template(template)?;
    write_workbook(book, batch, output)
}
