//! Short code assignment service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::NewUrlRecord;
use crate::domain::repositories::RecordStore;
use crate::error::AppError;
use crate::utils::code_generator::hash_code;
use crate::utils::validation::{normalize_url, validate_code};

/// Number of conditional inserts attempted when a conflicting record
/// disappears between the insert and the follow-up read.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Result of a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub short_code: String,
    /// Normalized long URL as stored.
    pub long_url: String,
    /// False when an identical mapping already existed.
    pub created: bool,
}

#[derive(Debug, Clone, Copy)]
enum CodeSource {
    Slug,
    Hash,
}

/// Service for assigning short codes to long URLs.
///
/// Codes are either user-supplied slugs or derived from the URL hash. Both
/// paths are idempotent: repeating a request returns the existing mapping
/// without creating a second record.
pub struct LinkService {
    store: Arc<dyn RecordStore>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix used by [`Self::short_url`].
    pub fn new(store: Arc<dyn RecordStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Assigns a short code to `long_url`.
    ///
    /// # Arguments
    ///
    /// - `long_url` - URL to shorten; a missing scheme defaults to `https`
    /// - `requested_slug` - optional custom code; an empty string counts as absent
    ///
    /// # Flow
    ///
    /// 1. Validate the slug, then the URL (no store access on failure)
    /// 2. Pick the slug or the hash-derived code
    /// 3. Conditionally insert; on conflict read the existing record
    /// 4. Same URL: idempotent success. Different URL: conflict
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSlug`] - slug fails `[A-Za-z0-9_-]{3,30}`
    /// - [`AppError::InvalidUrl`] - URL is not an absolute http(s) URL
    /// - [`AppError::SlugConflict`] - slug maps to a different URL
    /// - [`AppError::HashCollision`] - derived code maps to a different URL
    /// - [`AppError::StoreUnavailable`] - store failure
    pub async fn assign(
        &self,
        long_url: &str,
        requested_slug: Option<&str>,
    ) -> Result<Assignment, AppError> {
        let slug = requested_slug.filter(|s| !s.is_empty());

        if let Some(slug) = slug
            && !validate_code(slug)
        {
            return Err(AppError::InvalidSlug {
                slug: slug.to_string(),
            });
        }

        let long_url = normalize_url(long_url)?;

        let (short_code, source) = match slug {
            Some(slug) => (slug.to_string(), CodeSource::Slug),
            None => (hash_code(&long_url), CodeSource::Hash),
        };

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let new_record = NewUrlRecord::new(short_code.as_str(), long_url.as_str());

            if self.store.insert_if_absent(new_record).await? {
                info!(short_code = %short_code, "Short link created");
                return Ok(Assignment {
                    short_code,
                    long_url,
                    created: true,
                });
            }

            match self.store.find(&short_code).await? {
                Some(existing) if existing.long_url == long_url => {
                    debug!(short_code = %short_code, "Existing short link reused");
                    return Ok(Assignment {
                        short_code,
                        long_url,
                        created: false,
                    });
                }
                Some(existing) => {
                    return Err(match source {
                        CodeSource::Slug => AppError::SlugConflict { slug: short_code },
                        CodeSource::Hash => {
                            warn!(
                                short_code = %short_code,
                                existing_url = %existing.long_url,
                                requested_url = %long_url,
                                "Hash-derived short code collision"
                            );
                            AppError::HashCollision { code: short_code }
                        }
                    });
                }
                None => {
                    debug!(short_code = %short_code, attempt, "Conflicting record vanished, retrying insert");
                }
            }
        }

        Err(AppError::store_unavailable(format!(
            "short code {short_code} kept changing during assignment"
        )))
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Public prefix for short URLs.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
