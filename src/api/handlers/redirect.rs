//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `301 Moved Permanently`. The click counter and
/// `last_clicked` are updated in the same store operation that resolves
/// the code.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist, contains characters
/// outside `[A-Za-z0-9_-]`, or does not decode as UTF-8.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
    code: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = code.map_err(|e| {
        debug!(error = %e, "Rejected undecodable redirect path");
        AppError::not_found(uri.path().trim_start_matches('/'))
    })?;

    let record = state.redirect_service.resolve_and_record(&code).await?;

    debug!(short_code = %record.short_code, clicks = record.clicks, "Redirecting");

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, record.long_url)],
    ))
}
