//! Handler for the service description endpoint.

use axum::{Json, extract::State};

use crate::api::dto::home::{EndpointExamples, HomeResponse};
use crate::state::AppState;

/// Describes the API with example URLs built from the public base URL.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(State(state): State<AppState>) -> Json<HomeResponse> {
    let base = state.link_service.base_url().to_string();

    Json(HomeResponse {
        message: "Smart URL Shortener API",
        endpoints: EndpointExamples::for_base(&base),
        api_base: base,
    })
}
