//! Syntax checks for long URLs and short codes.
//!
//! All functions are pure and never touch the record store, so callers can
//! reject bad input before any I/O.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::AppError;

/// Shortest accepted short code or slug.
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest accepted short code or slug.
pub const MAX_CODE_LENGTH: usize = 30;

/// Longest accepted long URL, after scheme defaulting.
pub const MAX_URL_LENGTH: usize = 2048;

/// Matches an explicit `<scheme>://` prefix.
static SCHEME_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

/// Short code alphabet without a length bound.
static CODE_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Prepends `https://` when the input carries no scheme.
///
/// ```ignore
/// assert_eq!(with_default_scheme("example.com/a"), "https://example.com/a");
/// assert_eq!(with_default_scheme("http://example.com"), "http://example.com");
/// ```
pub fn with_default_scheme(candidate: &str) -> Cow<'_, str> {
    if SCHEME_PREFIX_REGEX.is_match(candidate) {
        Cow::Borrowed(candidate)
    } else {
        Cow::Owned(format!("https://{candidate}"))
    }
}

/// Validates a long URL and returns its canonical form.
///
/// The canonical form is the `url` crate serialization: lower-case scheme
/// and host, default port dropped, and `/` for an empty path. It is the
/// string that gets stored and hashed.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if the input is empty, too long, does not
/// parse, uses a scheme other than `http`/`https`, or has no host.
pub fn normalize_url(candidate: &str) -> Result<String, AppError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_url(candidate, "URL is empty"));
    }

    let with_scheme = with_default_scheme(trimmed);
    if with_scheme.len() > MAX_URL_LENGTH {
        return Err(AppError::invalid_url(
            candidate,
            format!("URL exceeds {MAX_URL_LENGTH} characters"),
        ));
    }

    let url = Url::parse(&with_scheme)
        .map_err(|e| AppError::invalid_url(candidate, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::invalid_url(
            candidate,
            "Only http and https URLs are allowed",
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::invalid_url(candidate, "URL has no host"));
    }

    Ok(url.to_string())
}

/// Returns true iff `candidate` is an absolute http(s) URL with a host,
/// after defaulting a missing scheme to `https`.
pub fn validate_url(candidate: &str) -> bool {
    normalize_url(candidate).is_ok()
}

/// Returns true iff `candidate` is non-empty and uses only `[A-Za-z0-9_-]`.
pub fn is_code_syntax(candidate: &str) -> bool {
    CODE_CHARS_REGEX.is_match(candidate)
}

/// Returns true iff `candidate` uses only `[A-Za-z0-9_-]` and is 3 to 30
/// characters long.
pub fn validate_code(candidate: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&candidate.len()) && is_code_syntax(candidate)
}
