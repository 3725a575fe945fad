//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/short`.
///
/// Both fields are optional at the extractor level so that slug and URL
/// errors are reported by the service in a fixed order.
#[derive(Debug, Deserialize)]
pub struct ShortenQuery {
    /// The URL to shorten. A missing scheme defaults to `https`.
    pub url: Option<String>,

    /// Optional custom short code, `[A-Za-z0-9_-]{3,30}`.
    pub slug: Option<String>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_code: String,
}
