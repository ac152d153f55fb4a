// src/pipeline/acquire.rs

//! Report acquisition from remote, file and direct-text inputs.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{CollectRequest, ReportSource, STDIN_LABEL};
use crate::services::ReportProvider;
use crate::utils::decode::decode_with_encoding;
use crate::utils::url::file_uri;

/// Read and decode one report file.
pub fn read_report_file(path: &Path) -> Result<ReportSource> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let (text, encoding) = decode_with_encoding(&bytes);
    log::debug!("Decoded {} as {}", path.display(), encoding.label());
    Ok(ReportSource::new(text, file_uri(path)))
}

/// Wrap direct text as a source, unless it is blank.
pub fn text_source(text: &str) -> Option<ReportSource> {
    if text.trim().is_empty() {
        None
    } else {
        Some(ReportSource::new(text, STDIN_LABEL))
    }
}

/// Gather every source named by the request.
///
/// Order is fixed: remote reports in id order, then files in the given
/// order, then direct text. Reconciliation ties depend on this order.
pub fn acquire_sources(
    request: &CollectRequest,
    remote: Option<&dyn ReportProvider>,
) -> Result<Vec<ReportSource>> {
    let mut sources = Vec::new();

    if request.fetch_remote {
        let provider = remote.ok_or_else(|| {
            AppError::config("remote fetch requested but no report provider is available")
        })?;
        sources.extend(provider.fetch_reports()?);
    }

    for path in &request.files {
        sources.push(read_report_file(path)?);
    }

    if let Some(source) = request.text.as_deref().and_then(text_source) {
        sources.push(source);
    }

    Ok(sources)
}
