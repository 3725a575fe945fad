//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON and query string (de)serialization and
//! validator for input validation.

pub mod health;
pub mod home;
pub mod lookup;
pub mod shorten;
