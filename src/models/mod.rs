// src/models/mod.rs

//! Domain models for permit collection.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

pub mod config;
mod permit;
mod report;
mod request;

// Re-export all public types
pub use config::{Config, FetchConfig, FilterConfig};
pub use permit::{
    CSV_HEADER, DETAILS_URL_TEMPLATE, FIELD_NAMES, PermitRecord, RECORD_TYPE_PERMIT, UNKNOWN,
};
pub use report::{
    DAILY_REPORT_IDS, LAST_MONTH_REPORT_ID, REPORT_IDS, ReportSource, STDIN_LABEL,
    WEEKLY_REPORT_ID,
};
pub use request::{AppliedFilters, CollectOutcome, CollectRequest};
