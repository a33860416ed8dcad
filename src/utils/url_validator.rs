//! Destination URL validation.
//!
//! Links store the URL exactly as submitted; validation only decides whether
//! it is an absolute `http`/`https` URL. [`to_location`] produces the
//! ASCII-serialized form used in the `Location` header.

use url::Url;

/// Longest destination URL accepted.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted destination URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Please enter a URL.")]
    Missing,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must be at most {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Validates that `input` is an absolute HTTP(S) URL.
///
/// Rejects empty or whitespace-only input, relative references, overly long
/// URLs and every scheme other than `http` and `https` (`javascript:`,
/// `data:`, `ftp:` and so on). The string is stored verbatim, so surrounding
/// whitespace and control characters (which `Url::parse` would silently
/// strip or percent-encode) are rejected too.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/a/b").is_ok());
/// assert_eq!(validate_url("  "), Err(UrlValidationError::Missing));
/// assert_eq!(validate_url("ftp://example.com"), Err(UrlValidationError::UnsupportedProtocol));
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Missing);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input != input.trim() {
        return Err(UrlValidationError::InvalidFormat(
            "URL has leading or trailing whitespace".to_string(),
        ));
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "URL has no host".to_string(),
        ));
    }

    Ok(())
}

/// Returns the value to send in a redirect `Location` header.
///
/// Stored URLs may contain non-ASCII characters; the parsed serialization is
/// percent-encoded and punycoded. Falls back to the stored string if it no
/// longer parses.
pub fn to_location(stored: &str) -> String {
    Url::parse(stored)
        .map(String::from)
        .unwrap_or_else(|_| stored.to_string())
}
