//! DTOs for the check and delete endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /api/chk` and `GET /api/del`.
#[derive(Debug, Deserialize, Validate)]
pub struct LookupQuery {
    /// A bare short code or a full short URL.
    #[validate(
        required(message = "Missing 'url'"),
        length(min = 1, message = "Missing 'url'")
    )]
    pub url: Option<String>,
}

/// Click and lifetime information for a short code.
///
/// Timestamps are rendered as `YYYY-MM-DD HH:MM:SS` (UTC);
/// `last_clicked` is `"Never"` before the first redirect.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: String,
    pub last_clicked: String,
}

/// Deletion confirmation.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub short_code: String,
}
