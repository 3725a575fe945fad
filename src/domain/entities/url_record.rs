//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// Timestamp format used for human-readable rendering.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A short code mapped to a long URL, with click telemetry.
///
/// `created_at` is set once by the store at insertion. `clicks` and
/// `last_clicked` change only through the redirect path.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub short_code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a record as it looks right after insertion.
    pub fn new(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            long_url,
            clicks: 0,
            created_at,
            last_clicked: None,
        }
    }

    /// Returns true if the record was created strictly before `cutoff`.
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }
}

/// Input data for creating a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub long_url: String,
}

impl NewUrlRecord {
    pub fn new(short_code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            long_url: long_url.into(),
        }
    }
}

/// Read-only view of a record with display-formatted timestamps.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    pub record: UrlRecord,
    pub created_at_display: String,
    /// `"Never"` until the first redirect.
    pub last_clicked_display: String,
}

impl From<UrlRecord> for RecordInfo {
    fn from(record: UrlRecord) -> Self {
        let created_at_display = record.created_at.format(DISPLAY_TIME_FORMAT).to_string();
        let last_clicked_display = record
            .last_clicked
            .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
            .unwrap_or_else(|| "Never".to_string());

        Self {
            record,
            created_at_display,
            last_clicked_display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_new_record_starts_unclicked() {
        let now = Utc::now();
        let record = UrlRecord::new("abc".to_string(), "https://example.com/".to_string(), now);

        assert_eq!(record.clicks, 0);
        assert!(record.last_clicked.is_none());
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_is_older_than_is_strict() {
        let created = Utc::now();
        let record = UrlRecord::new("abc".to_string(), "https://example.com/".to_string(), created);

        assert!(!record.is_older_than(created));
        assert!(record.is_older_than(created + Duration::seconds(1)));
        assert!(!record.is_older_than(created - Duration::seconds(1)));
    }

    #[test]
    fn test_record_info_never_clicked() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let record = UrlRecord::new("abc".to_string(), "https://example.com/".to_string(), created);

        let info = RecordInfo::from(record);

        assert_eq!(info.created_at_display, "2024-03-05 14:07:09");
        assert_eq!(info.last_clicked_display, "Never");
    }

    #[test]
    fn test_record_info_clicked() {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let mut record =
            UrlRecord::new("abc".to_string(), "https://example.com/".to_string(), created);
        record.clicks = 3;
        record.last_clicked = Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap());

        let info = RecordInfo::from(record);

        assert_eq!(info.last_clicked_display, "2024-12-31 23:59:00");
        assert_eq!(info.record.clicks, 3);
    }
}
