//! URL canonicalization for request identities.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string handed over by the host.
///
/// Two spellings of the same resource must map to one cache entry, so:
/// whitespace is trimmed, a missing scheme defaults to `https://`, the host
/// is lowercased (the `url` crate does this while parsing) and the fragment
/// is dropped. The query string is kept verbatim.
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
    let mut parsed = url::Url::parse(&with_scheme).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    ensure_http(&parsed)?;
    parsed.set_fragment(None);

    Ok(parsed)
}

/// Reject anything that isn't plain http(s) before it reaches the network.
pub fn ensure_http(url: &url::Url) -> Result<(), UrlError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}
