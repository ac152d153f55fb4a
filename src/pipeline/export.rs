// src/pipeline/export.rs

//! CSV and JSON rendering of reconciled permits.
//!
//! All functions keep the record order they are given.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::error::{AppError, Result};
use crate::models::{CSV_HEADER, PermitRecord};

/// Write records as CSV to any writer. Returns the number of rows written.
pub fn write_csv<W: Write>(records: &[PermitRecord], writer: W) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record(record.csv_row())?;
    }
    csv_writer.flush()?;

    Ok(records.len())
}

/// Render records as CSV text.
pub fn to_csv(records: &[PermitRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(AppError::validation)
}

/// Write records as CSV to a file.
pub fn export_csv_file(records: &[PermitRecord], path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let count = write_csv(records, file)?;
    log::info!("Wrote {} permits to {}", count, path.display());
    Ok(count)
}

/// Field maps for every record.
pub fn to_field_maps(records: &[PermitRecord]) -> Vec<BTreeMap<&'static str, String>> {
    records.iter().map(PermitRecord::to_field_map).collect()
}

/// Render records as a pretty JSON array of field maps.
pub fn to_json(records: &[PermitRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_field_maps(records))?)
}

/// Render the CSV as a `data:` URL for browser downloads.
pub fn csv_data_url(records: &[PermitRecord]) -> Result<String> {
    let csv_text = to_csv(records)?;
    let encoded = general_purpose::STANDARD.encode(csv_text.as_bytes());
    Ok(format!("data:text/csv;base64,{encoded}"))
}
