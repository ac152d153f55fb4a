// src/pipeline/reconcile.rs

//! Merge records from overlapping report windows.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;

use crate::models::PermitRecord;

/// Filter, deduplicate and sort records.
///
/// - `homeowner_only` keeps records whose contractor contains "OWNER"
///   (case-insensitive).
/// - Records issued before `cutoff` are dropped.
/// - For each permit id the latest issue date wins; on equal dates the
///   first record seen is kept.
/// - Output is sorted by `(issue_date, permit_id)`, most recent first.
pub fn reconcile<I>(records: I, cutoff: NaiveDate, homeowner_only: bool) -> Vec<PermitRecord>
where
    I: IntoIterator<Item = PermitRecord>,
{
    let mut latest: HashMap<String, PermitRecord> = HashMap::new();

    for record in records {
        if homeowner_only && !record.is_homeowner() {
            continue;
        }
        if record.issue_date < cutoff {
            continue;
        }
        match latest.entry(record.permit_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if slot.get().issue_date < record.issue_date {
                    slot.insert(record);
                }
            }
        }
    }

    let mut rows: Vec<PermitRecord> = latest.into_values().collect();
    rows.sort_by(|a, b| (b.issue_date, &b.permit_id).cmp(&(a.issue_date, &a.permit_id)));
    rows
}
