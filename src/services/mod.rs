//! Services for fetching and parsing permit bulletins.

pub mod extract;
pub mod fetcher;
pub mod parser;

pub use extract::extract_entry;
pub use fetcher::{ReportFetcher, ReportProvider};
pub use parser::{SectionScanner, parse_report_text};
