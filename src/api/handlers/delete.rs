//! Handler for short code deletion.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use validator::Validate;

use crate::api::dto::lookup::{DeleteResponse, LookupQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_code::extract_code;

/// Deletes a short code.
///
/// # Endpoint
///
/// `GET /api/del?url=<short-url-or-code>`
///
/// # Response
///
/// ```json
/// { "status": "deleted", "short_code": "FB37C0" }
/// ```
///
/// # Errors
///
/// - 400 `invalid_request` - `url` missing or query string cannot be parsed
/// - 400 `invalid_code` - extracted code contains invalid characters
/// - 404 `not_found` - no such code
pub async fn delete_handler(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;
    let input = query.url.unwrap_or_default();
    let code = extract_code(&input);

    if !state.redirect_service.remove(code).await? {
        return Err(AppError::not_found(code));
    }

    Ok(Json(DeleteResponse {
        status: "deleted",
        short_code: code.to_string(),
    }))
}
