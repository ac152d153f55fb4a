//! Collection request and outcome structures.

use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::config::{FilterConfig, defaults};
use crate::models::PermitRecord;

/// Inputs for one collection run.
///
/// Acquisition modes are not exclusive: remote reports, files and direct
/// text may all be supplied and are merged in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectRequest {
    /// Report files to read
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Already-decoded report text (piped or posted)
    #[serde(default)]
    pub text: Option<String>,

    /// Download the fixed set of remote reports
    #[serde(default)]
    pub fetch_remote: bool,

    /// Recency window in days, clamped to at least 1
    #[serde(default = "defaults::days")]
    pub days: u32,

    /// Project code section to extract
    #[serde(default = "defaults::project_code")]
    pub project_code: String,

    /// Keep only permits whose contractor names the homeowner
    #[serde(default)]
    pub homeowner_only: bool,

    /// Date the recency window is measured from (defaults to today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl Default for CollectRequest {
    fn default() -> Self {
        Self::from_filter(&FilterConfig::default())
    }
}

impl CollectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from configured filter defaults.
    pub fn from_filter(filter: &FilterConfig) -> Self {
        Self {
            files: Vec::new(),
            text: None,
            fetch_remote: false,
            days: filter.days,
            project_code: filter.project_code.clone(),
            homeowner_only: filter.homeowner_only,
            as_of: None,
        }
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_fetch(mut self, fetch_remote: bool) -> Self {
        self.fetch_remote = fetch_remote;
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_project_code(mut self, project_code: impl Into<String>) -> Self {
        self.project_code = project_code.into();
        self
    }

    pub fn with_homeowner_only(mut self, homeowner_only: bool) -> Self {
        self.homeowner_only = homeowner_only;
        self
    }

    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Effective window length.
    pub fn effective_days(&self) -> u32 {
        self.days.max(1)
    }

    /// Earliest issue date that survives the recency filter.
    pub fn cutoff(&self) -> NaiveDate {
        let today = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        today
            .checked_sub_days(Days::new(u64::from(self.effective_days())))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Filters that were actually applied to a collection run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedFilters {
    pub days: u32,
    pub project_code: String,
    pub homeowner_only: bool,
    pub cutoff: NaiveDate,
}

/// Reconciled records plus the counts behind them.
#[derive(Debug, Clone, Serialize)]
pub struct CollectOutcome {
    /// Deduplicated records, most recent first
    pub rows: Vec<PermitRecord>,

    /// Number of report texts read
    pub source_count: usize,

    /// Records extracted before filtering and deduplication
    pub parsed_count: usize,

    /// Filters in effect
    pub filters: AppliedFilters,
}

impl CollectOutcome {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Short human-readable status line.
    pub fn message(&self) -> String {
        match self.rows.len() {
            0 => "No permits found for the requested window.".to_string(),
            n => format!("Retrieved {n} permits."),
        }
    }
}
