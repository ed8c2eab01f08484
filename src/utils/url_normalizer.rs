//! Target URL validation and normalization.
//!
//! The embedding web layer passes raw form input; the core normalizes it to
//! a canonical form before a link record is created.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("only HTTP and HTTPS targets are allowed")]
    UnsupportedProtocol,

    #[error("failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a target URL to a canonical form.
///
/// Rules: http/https only (rejects `javascript:`, `data:`, `file:` and
/// friends), hostname lowercased, default ports removed, fragment stripped,
/// path and query preserved as-is.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed input and
/// [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let lowered = host.to_ascii_lowercase();
        url.set_host(Some(&lowered)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("could not set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("could not drop default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
