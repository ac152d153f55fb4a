//! Report identifiers and acquired report text.

/// Report listing permits issued last calendar month.
pub const LAST_MONTH_REPORT_ID: u32 = 46;

/// Report listing permits issued last week.
pub const WEEKLY_REPORT_ID: u32 = 45;

/// Daily reports, Monday through Friday.
pub const DAILY_REPORT_IDS: [u32; 5] = [40, 41, 42, 43, 44];

/// Every remote report, in fetch order.
pub const REPORT_IDS: [u32; 7] = [
    LAST_MONTH_REPORT_ID,
    WEEKLY_REPORT_ID,
    DAILY_REPORT_IDS[0],
    DAILY_REPORT_IDS[1],
    DAILY_REPORT_IDS[2],
    DAILY_REPORT_IDS[3],
    DAILY_REPORT_IDS[4],
];

/// Label used for text handed in directly (piped or posted).
pub const STDIN_LABEL: &str = "stdin";

/// Decoded text of one report together with where it came from.
///
/// The label is informational only (URL, file URI, or `stdin`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSource {
    pub text: String,
    pub label: String,
}

impl ReportSource {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}
