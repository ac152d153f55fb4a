// src/services/extract.rs

//! Field extraction for a single permit entry.
//!
//! An entry is the entry-start line followed by its continuation lines.
//! Extraction is heuristic and tuned to the fixed-width bulletin layout:
//! the street address is separated from "city zip" by a run of two or more
//! spaces, so an address that itself contains a double space will split in
//! the wrong place.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{PermitRecord, RECORD_TYPE_PERMIT, UNKNOWN};

/// Issue date format used by the bulletins, e.g. `01-Jan-2024`.
pub const ISSUE_DATE_FORMAT: &str = "%d-%b-%Y";

static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<permit>\S+)\s+\S+\s+(?P<date>\d{2}-[A-Za-z]{3}-\d{4})\s+ADDRESS:\s+(?P<rest>.+)$",
    )
    .expect("entry-start pattern is valid")
});

static ADDRESS_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<address>.+?)\s{2,}(?P<cityzip>.+)$").expect("address pattern is valid")
});

static PROJECT_CONTRACTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Project:\s*(?P<project>.*?)\s{2,}Contr:\s*(?P<contractor>.+)$")
        .expect("project/contractor pattern is valid")
});

static COST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"COST:\s*\$?\s*(?P<amount>[\d,]+(?:\.\d{2})?)").expect("cost pattern is valid")
});

/// Whether a line opens a new permit entry.
pub fn is_entry_start(line: &str) -> bool {
    ENTRY_START.is_match(line)
}

/// Turn one entry's lines into a record.
///
/// Returns `None` when the first line is not an entry-start line or its
/// date does not parse; callers drop such entries.
pub fn extract_entry<S: AsRef<str>>(lines: &[S], project_code: &str) -> Option<PermitRecord> {
    let (first, continuation) = lines.split_first()?;
    let first: &str = first.as_ref();
    let caps = ENTRY_START.captures(first)?;

    let permit_id = caps["permit"].to_string();
    let issue_date = NaiveDate::parse_from_str(&caps["date"], ISSUE_DATE_FORMAT).ok()?;
    let (address, city, zip_code) = split_address(caps["rest"].trim_end());
    let fields = ContinuationFields::scan(continuation);
    let contractor = fields.contractor().unwrap_or(UNKNOWN).to_string();
    let project_name = fields
        .project_name()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    Some(PermitRecord {
        issue_date,
        details_url: PermitRecord::details_url_for(&permit_id),
        permit_id,
        address,
        city,
        zip_code,
        contractor,
        valuation: fields.valuation.unwrap_or_default(),
        project_code: project_code.to_string(),
        project_name,
        record_type: RECORD_TYPE_PERMIT.to_string(),
    })
}

/// Split the text after `ADDRESS:` into address, city and zip.
fn split_address(rest: &str) -> (String, String, String) {
    let Some(caps) = ADDRESS_SPLIT.captures(rest) else {
        return (rest.to_string(), String::new(), String::new());
    };
    let address = caps["address"].trim().to_string();
    let (city, zip_code) = split_city_zip(caps["cityzip"].trim());
    (address, city, zip_code)
}

/// The last space-separated token is the zip only if it is all digits.
fn split_city_zip(chunk: &str) -> (String, String) {
    match chunk.rsplit_once(' ') {
        Some((city, zip)) if !zip.is_empty() && zip.chars().all(|c| c.is_ascii_digit()) => {
            (city.trim().to_string(), zip.trim().to_string())
        }
        _ => (chunk.to_string(), String::new()),
    }
}

/// Values recovered from continuation lines.
#[derive(Debug, Default)]
struct ContinuationFields {
    /// First `Project: ...  Contr: ...` line, as (project, contractor)
    combined: Option<(String, String)>,
    /// First line starting with `Contr:`
    contractor_only: Option<String>,
    /// First `COST:` amount, normalized
    valuation: Option<String>,
}

impl ContinuationFields {
    fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut fields = Self::default();

        for line in lines {
            let line: &str = line.as_ref();
            if fields.combined.is_none() && line.contains("Project:") && line.contains("Contr:") {
                if let Some(caps) = PROJECT_CONTRACTOR.captures(line) {
                    let contractor = caps["contractor"].trim().trim_end_matches('.').trim_end();
                    fields.combined =
                        Some((caps["project"].trim().to_string(), contractor.to_string()));
                }
            }

            if fields.contractor_only.is_none() {
                if let Some(after) = line.trim().strip_prefix("Contr:") {
                    let contractor = after.trim();
                    if !contractor.is_empty() {
                        fields.contractor_only = Some(contractor.to_string());
                    }
                }
            }

            if fields.valuation.is_none() {
                if let Some(caps) = COST.captures(line) {
                    let amount = caps["amount"].replace(' ', "");
                    fields.valuation = Some(format!("${amount}"));
                }
            }
        }

        fields
    }

    fn contractor(&self) -> Option<&str> {
        self.combined
            .as_ref()
            .map(|(_, contractor)| contractor.as_str())
            .filter(|c| !c.is_empty())
            .or(self.contractor_only.as_deref())
    }

    fn project_name(&self) -> Option<&str> {
        self.combined.as_ref().map(|(project, _)| project.as_str())
    }
}
