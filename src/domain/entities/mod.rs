//! Core domain entities.
//!
//! - [`UrlRecord`] - a short code mapped to its long URL, with click telemetry
//! - [`NewUrlRecord`] - input for creating a record
//! - [`RecordInfo`] - a record plus human-readable timestamps

pub mod url_record;

pub use url_record::{NewUrlRecord, RecordInfo, UrlRecord};
