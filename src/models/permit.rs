//! Permit record data structure.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Template for the public permit detail page.
pub const DETAILS_URL_TEMPLATE: &str = "https://www.pprbd.org/Permit/Details?permitNo={permit_id}";

/// Sentinel used when a contractor or project name cannot be recovered.
pub const UNKNOWN: &str = "UNKNOWN";

/// Record kind tag. Only permits exist today.
pub const RECORD_TYPE_PERMIT: &str = "permit";

/// CSV columns, in output order.
pub const CSV_HEADER: [&str; 9] = [
    "issue_date",
    "permit_id",
    "address",
    "city",
    "zip",
    "contractor",
    "project_code",
    "project_name",
    "details_url",
];

/// Every field exposed by [`PermitRecord::to_field_map`].
pub const FIELD_NAMES: [&str; 11] = [
    "issue_date",
    "permit_id",
    "address",
    "city",
    "zip",
    "contractor",
    "valuation",
    "project_code",
    "project_name",
    "details_url",
    "record_type",
];

/// One permit parsed out of a report entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermitRecord {
    /// Date the permit was issued
    pub issue_date: NaiveDate,

    /// Permit number, unique after reconciliation
    pub permit_id: String,

    /// Street address
    pub address: String,

    /// City (empty when the address line has no city chunk)
    pub city: String,

    /// Zip code (empty when it cannot be split from the city)
    #[serde(rename = "zip")]
    pub zip_code: String,

    /// Contractor name or [`UNKNOWN`]
    pub contractor: String,

    /// Declared cost such as `$12,345.00`, possibly empty
    pub valuation: String,

    /// Project code of the section the entry was found in
    pub project_code: String,

    /// Project description or [`UNKNOWN`]
    pub project_name: String,

    /// Link to the permit detail page
    pub details_url: String,

    /// Record kind tag
    pub record_type: String,
}

impl PermitRecord {
    /// Build the detail page URL for a permit number.
    pub fn details_url_for(permit_id: &str) -> String {
        DETAILS_URL_TEMPLATE.replace("{permit_id}", permit_id)
    }

    /// Whether the contractor field names the homeowner.
    pub fn is_homeowner(&self) -> bool {
        self.contractor.to_uppercase().contains("OWNER")
    }

    /// Expose every field as a named string value.
    ///
    /// `issue_date` is rendered as ISO-8601 (`YYYY-MM-DD`).
    pub fn to_field_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("issue_date", self.issue_date.format("%Y-%m-%d").to_string()),
            ("permit_id", self.permit_id.clone()),
            ("address", self.address.clone()),
            ("city", self.city.clone()),
            ("zip", self.zip_code.clone()),
            ("contractor", self.contractor.clone()),
            ("valuation", self.valuation.clone()),
            ("project_code", self.project_code.clone()),
            ("project_name", self.project_name.clone()),
            ("details_url", self.details_url.clone()),
            ("record_type", self.record_type.clone()),
        ])
    }

    /// Values for one CSV row, in [`CSV_HEADER`] order.
    pub fn csv_row(&self) -> Vec<String> {
        let mut fields = self.to_field_map();
        CSV_HEADER
            .iter()
            .map(|name| fields.remove(name).unwrap_or_default())
            .collect()
    }
}
