//! Pipeline entry points for permit collection.
//!
//! - `collect`: acquire reports, parse them and reconcile the records
//! - `export`: render reconciled records as CSV or JSON

pub mod acquire;
pub mod collect;
pub mod export;
pub mod reconcile;

pub use collect::{collect, collect_records, collect_with};
pub use export::{csv_data_url, export_csv_file, to_csv, to_field_maps, to_json, write_csv};
pub use reconcile::reconcile;
