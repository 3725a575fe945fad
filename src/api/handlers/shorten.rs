//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::shorten::{ShortenQuery, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a URL, or returns the existing one.
///
/// # Endpoint
///
/// `GET /api/short?url=<url>&slug=<optional>`
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://10.0.0.5:4000/FB37C0",
///   "original_url": "https://example.com/page",
///   "short_code": "FB37C0"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_request` - query string cannot be parsed
/// - 400 `invalid_slug` - slug fails `[A-Za-z0-9_-]{3,30}` (checked first)
/// - 400 `invalid_url` - missing or malformed URL
/// - 409 `slug_conflict` - slug already maps to another URL
/// - 409 `hash_collision` - derived code already maps to another URL
pub async fn shorten_handler(
    State(state): State<AppState>,
    query: Result<Query<ShortenQuery>, QueryRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Query(query) = query?;
    let url = query.url.unwrap_or_default();

    let assignment = state
        .link_service
        .assign(&url, query.slug.as_deref())
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.link_service.short_url(&assignment.short_code),
        original_url: assignment.long_url,
        short_code: assignment.short_code,
    }))
}
