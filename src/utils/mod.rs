//! Utility functions and helpers.

pub mod decode;
pub mod http;
pub mod url;

pub use decode::{TextEncoding, decode_report_bytes, decode_with_encoding};
