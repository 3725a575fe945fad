//! Short code extraction from user input.

/// Returns the trailing path segment of `input`.
///
/// Accepts either a bare code or a full short URL, with or without a
/// trailing slash. The result is not validated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_code("ABC123"), "ABC123");
/// assert_eq!(extract_code("http://10.0.0.5:4000/ABC123/"), "ABC123");
/// ```
pub fn extract_code(input: &str) -> &str {
    input
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
