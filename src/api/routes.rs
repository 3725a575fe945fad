//! API route configuration.

use crate::api::handlers::{check_handler, delete_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Shortening, inspection and deletion routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /short?url=..&slug=..` - Create or reuse a short code
/// - `GET /chk?url=..`           - Click statistics for a code or short URL
/// - `GET /del?url=..`           - Delete a code or short URL
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/short", get(shorten_handler))
        .route("/chk", get(check_handler))
        .route("/del", get(delete_handler))
}
