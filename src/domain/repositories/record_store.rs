//! Storage contract for URL records.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable mapping from short code to [`UrlRecord`].
///
/// Every mutating method is a single atomic operation in the backing store,
/// which makes the store the only serialization point: callers never need
/// their own locks and never read-modify-write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecordStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryRecordStore`] - in-process map
/// - Test mocks available with `cfg(test)`
///
/// # Errors
///
/// All methods return [`AppError::StoreUnavailable`] when the backend cannot
/// be reached or fails mid-operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the record with `clicks = 0`, `created_at = now` and no
    /// `last_clicked`, iff no record with the same code exists.
    ///
    /// Returns whether the record was created.
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<bool, AppError>;

    /// Finds a record by its short code.
    async fn find(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Increments `clicks` by one and sets `last_clicked = now`.
    ///
    /// Returns the record as it is after the update, or `None` if no record
    /// has that code.
    async fn increment_and_touch(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Removes a record. Returns whether one existed.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Removes every record with `created_at` strictly before `cutoff`.
    ///
    /// Returns the number of deleted records.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;

    /// Counts stored records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
