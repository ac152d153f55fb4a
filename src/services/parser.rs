// src/services/parser.rs

//! Section/entry scanner for permit bulletins.
//!
//! A bulletin is split into `Project Code:` sections. Inside the target
//! section each permit starts on an entry-start line and runs until the next
//! entry-start line. A new section marker discards the open entry; the end
//! of input finalizes it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::PermitRecord;
use crate::services::extract::{extract_entry, is_entry_start};

/// Marker that opens a project code section.
pub const PROJECT_CODE_MARKER: &str = "Project Code:";

static PROJECT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Project Code:\s*(\d+)").expect("project code pattern is valid")
});

/// Parse one report's text into the records of the target project code.
///
/// Fails when the text carries no `Project Code:` marker at all.
pub fn parse_report_text(text: &str, project_code: &str) -> Result<Vec<PermitRecord>> {
    if text.is_empty() || !text.contains(PROJECT_CODE_MARKER) {
        return Err(AppError::parse(
            "Provided report does not contain recognizable permit data.",
        ));
    }

    let mut scanner = SectionScanner::new(project_code);
    for line in text.split(|c: char| c == '\n' || c == '\r') {
        scanner.feed(line);
    }
    Ok(scanner.finish())
}

/// Scanner state between lines.
#[derive(Debug, Default)]
enum ScanState {
    /// No entry open: outside the target section, or inside it before the
    /// first entry-start line.
    #[default]
    SeekingSection,
    /// Accumulating the lines of one entry.
    InEntry(Vec<String>),
}

/// Line-by-line scanner over a single report.
#[derive(Debug)]
pub struct SectionScanner<'a> {
    target_code: &'a str,
    active_code: Option<String>,
    state: ScanState,
    records: Vec<PermitRecord>,
    skipped: usize,
}

impl<'a> SectionScanner<'a> {
    pub fn new(target_code: &'a str) -> Self {
        Self {
            target_code,
            active_code: None,
            state: ScanState::SeekingSection,
            records: Vec::new(),
            skipped: 0,
        }
    }

    /// Feed one raw line.
    pub fn feed(&mut self, raw_line: &str) {
        let line = raw_line.trim_end();

        if line.starts_with(PROJECT_CODE_MARKER) {
            self.active_code = PROJECT_CODE
                .captures(line)
                .map(|caps| caps[1].to_string());
            self.state = ScanState::SeekingSection;
            return;
        }

        if self.active_code.as_deref() != Some(self.target_code) || line.trim().is_empty() {
            return;
        }

        if is_entry_start(line) {
            let previous =
                std::mem::replace(&mut self.state, ScanState::InEntry(vec![line.to_string()]));
            self.finalize(previous);
        } else if let ScanState::InEntry(lines) = &mut self.state {
            lines.push(line.to_string());
        }
    }

    /// Finalize any open entry and return the extracted records.
    pub fn finish(mut self) -> Vec<PermitRecord> {
        let open = std::mem::take(&mut self.state);
        self.finalize(open);
        if self.skipped > 0 {
            log::debug!(
                "Skipped {} unparseable entries in project code {}",
                self.skipped,
                self.target_code
            );
        }
        self.records
    }

    fn finalize(&mut self, state: ScanState) {
        let ScanState::InEntry(lines) = state else {
            return;
        };
        match extract_entry(&lines, self.target_code) {
            Some(record) => self.records.push(record),
            None => {
                self.skipped += 1;
                log::debug!("Dropping unparseable entry: {:?}", lines.first());
            }
        }
    }
}
