//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Round trip to the record store
/// 2. **Sweeper**: Retention task is running; reports consecutive failures
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Connected, 42 records" },
///     "sweeper": { "status": "ok", "message": "Last sweep: 2025-01-14 09:12:44" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let sweeper_check = check_sweeper(&state);

    let all_healthy = store_check.is_ok() && sweeper_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            sweeper: sweeper_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity and reports the record count.
async fn check_store(state: &AppState) -> CheckStatus {
    if let Err(e) = state.store.ping().await {
        return CheckStatus::error(format!("Store error: {}", e));
    }

    match state.store.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {} records", count)),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

/// Checks that the retention sweeper task is alive.
///
/// Failed sweeps are retried on the next tick, so they are reported in the
/// message but do not degrade the status.
fn check_sweeper(state: &AppState) -> CheckStatus {
    let status = &state.sweeper_status;

    if !status.is_running() {
        return CheckStatus::error("Retention sweeper is not running");
    }

    let last = status
        .last_success()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    match status.consecutive_failures() {
        0 => CheckStatus::ok(format!("Last sweep: {}", last)),
        n => CheckStatus::ok(format!(
            "Last sweep: {}, {} consecutive failures",
            last, n
        )),
    }
}
