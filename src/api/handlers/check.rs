//! Handler for click statistics of a single short code.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use validator::Validate;

use crate::api::dto::lookup::{CheckResponse, LookupQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_code::extract_code;

/// Returns clicks, creation time and last click time for a short code.
///
/// # Endpoint
///
/// `GET /api/chk?url=<short-url-or-code>`
///
/// Does not count as a click.
///
/// # Response
///
/// ```json
/// {
///   "short_code": "FB37C0",
///   "original_url": "https://example.com/page",
///   "clicks": 4,
///   "created_at": "2025-01-14 09:12:44",
///   "last_clicked": "Never"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_request` - `url` missing or query string cannot be parsed
/// - 400 `invalid_code` - extracted code contains invalid characters
/// - 404 `not_found` - no such code
pub async fn check_handler(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;
    let input = query.url.unwrap_or_default();

    let info = state.redirect_service.inspect(extract_code(&input)).await?;

    Ok(Json(CheckResponse {
        short_code: info.record.short_code,
        original_url: info.record.long_url,
        clicks: info.record.clicks,
        created_at: info.created_at_display,
        last_clicked: info.last_clicked_display,
    }))
}
