// src/lib.rs

//! Permit bulletin collector library.
//!
//! Acquires PPRBD permit bulletins (HTTP, files or direct text), parses the
//! target project code section into permit records, reconciles overlapping
//! report windows and exports the result as CSV or field maps.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
pub use models::{CollectOutcome, CollectRequest, Config, PermitRecord};
pub use pipeline::{collect, collect_records, to_csv};
