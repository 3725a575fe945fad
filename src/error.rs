//! Application error type and its HTTP rendering.
//!
//! Every failure carries a machine-readable `code` and a human-readable
//! message. Handlers return `Result<_, AppError>` and the [`IntoResponse`]
//! impl turns the error into a JSON body:
//!
//! ```json
//! { "error": { "code": "slug_conflict", "message": "Slug already in use", "details": { "slug": "promo" } } }
//! ```

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by the shortening, lookup and retention paths.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing request parameters.
    #[error("{message}")]
    InvalidRequest { message: String, details: Value },

    /// The long URL is not an absolute http(s) URL with a host.
    #[error("Invalid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A requested slug does not match `[A-Za-z0-9_-]{3,30}`.
    #[error("Invalid slug! Use 3-30 letters, numbers, hyphens, and underscores.")]
    InvalidSlug { slug: String },

    /// A short code supplied for lookup contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid short code")]
    InvalidCode { code: String },

    /// The slug is already mapped to a different URL.
    #[error("Slug already in use")]
    SlugConflict { slug: String },

    /// The hash-derived code is already mapped to a different URL.
    #[error("Generated short code collides with an existing URL; choose a custom slug")]
    HashCollision { code: String },

    #[error("Short URL not found")]
    NotFound { code: String },

    /// The record store could not complete the operation.
    #[error("Record store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }

    /// Machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidSlug { .. } => "invalid_slug",
            Self::InvalidCode { .. } => "invalid_code",
            Self::SlugConflict { .. } => "slug_conflict",
            Self::HashCollision { .. } => "hash_collision",
            Self::NotFound { .. } => "not_found",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. }
            | Self::InvalidUrl { .. }
            | Self::InvalidSlug { .. }
            | Self::InvalidCode { .. } => StatusCode::BAD_REQUEST,
            Self::SlugConflict { .. } | Self::HashCollision { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn details(&self) -> Value {
        match self {
            Self::InvalidRequest { details, .. } => details.clone(),
            Self::InvalidUrl { url, .. } => json!({ "url": url }),
            Self::InvalidSlug { slug } | Self::SlugConflict { slug } => json!({ "slug": slug }),
            Self::InvalidCode { code } | Self::HashCollision { code } | Self::NotFound { code } => {
                json!({ "short_code": code })
            }
            // Store internals are logged, not returned.
            Self::StoreUnavailable { .. } => json!({}),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let message = match self {
            Self::StoreUnavailable { .. } => "Record store unavailable".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::StoreUnavailable { reason } = &self {
            tracing::error!(reason = %reason, "Record store failure");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::store_unavailable(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::invalid_request(
            "Invalid request parameters",
            json!({ "fields": fields, "reason": e.to_string() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::invalid_request(
            "Invalid query string",
            json!({ "reason": e.body_text() }),
        )
    }
}
