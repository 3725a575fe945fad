//! In-process record store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// Record store backed by a `HashMap`.
///
/// Every operation runs entirely under one mutex acquisition, which gives
/// the same atomicity as the PostgreSQL store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<String, UrlRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed record, replacing any record with the same
    /// code. Used to load fixtures with arbitrary timestamps.
    pub fn seed(&self, record: UrlRecord) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.insert(record.short_code.clone(), record);
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UrlRecord>>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::store_unavailable("memory store mutex poisoned"))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<bool, AppError> {
        let mut records = self.lock()?;

        if records.contains_key(&new_record.short_code) {
            return Ok(false);
        }

        let record = UrlRecord::new(
            new_record.short_code.clone(),
            new_record.long_url,
            Utc::now(),
        );
        records.insert(new_record.short_code, record);
        Ok(true)
    }

    async fn find(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.lock()?.get(code).cloned())
    }

    async fn increment_and_touch(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let mut records = self.lock()?;

        Ok(records.get_mut(code).map(|record| {
            record.clicks += 1;
            record.last_clicked = Some(Utc::now());
            record.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.lock()?.remove(code).is_some())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut records = self.lock()?;

        let before = records.len();
        records.retain(|_, record| !record.is_older_than(cutoff));
        Ok((before - records.len()) as u64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
