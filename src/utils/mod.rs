//! Helper functions used across the application:
//!
//! - [`validation`] - URL and short code syntax checks
//! - [`code_generator`] - Hash-derived short codes
//! - [`extract_code`] - Short code extraction from short URLs
//! - [`display_addr`] - Local address discovery for display URLs

pub mod code_generator;
pub mod display_addr;
pub mod extract_code;
pub mod validation;
