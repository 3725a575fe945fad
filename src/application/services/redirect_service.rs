//! Redirect resolution, record inspection and removal.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{RecordInfo, UrlRecord};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;
use crate::utils::validation::is_code_syntax;

/// Service for the read and delete paths of short codes.
///
/// Lookup input is checked against the short code alphabet before any store
/// access. Length is not checked here, so codes created under older length
/// rules still resolve.
pub struct RedirectService {
    store: Arc<dyn RecordStore>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolves a code and records the click.
    ///
    /// Increments `clicks` and sets `last_clicked` in one atomic store call,
    /// then returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and for input outside
    /// `[A-Za-z0-9_-]`. Returns [`AppError::StoreUnavailable`] on store failure.
    pub async fn resolve_and_record(&self, code: &str) -> Result<UrlRecord, AppError> {
        if !is_code_syntax(code) {
            debug!(code, "Rejected redirect for malformed code");
            return Err(AppError::not_found(code));
        }

        self.store
            .increment_and_touch(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))
    }

    /// Returns a record with display timestamps, without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCode`] for input outside `[A-Za-z0-9_-]`
    /// and [`AppError::NotFound`] for unknown codes.
    pub async fn inspect(&self, code: &str) -> Result<RecordInfo, AppError> {
        ensure_code_syntax(code)?;

        self.store
            .find(code)
            .await?
            .map(RecordInfo::from)
            .ok_or_else(|| AppError::not_found(code))
    }

    /// Deletes a record. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCode`] for input outside `[A-Za-z0-9_-]`.
    pub async fn remove(&self, code: &str) -> Result<bool, AppError> {
        ensure_code_syntax(code)?;

        let deleted = self.store.delete(code).await?;
        if deleted {
            info!(short_code = %code, "Short link deleted");
        }
        Ok(deleted)
    }
}

fn ensure_code_syntax(code: &str) -> Result<(), AppError> {
    if is_code_syntax(code) {
        Ok(())
    } else {
        Err(AppError::InvalidCode {
            code: code.to_string(),
        })
    }
}
