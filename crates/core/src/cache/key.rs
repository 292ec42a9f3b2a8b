//! Request identity used as the cache key.

use sha2::{Digest, Sha256};
use url::Url;

/// Normalized request identity.
///
/// Only GET requests are ever cached, so the method is implicit in the
/// key, but it is still folded into the hash to keep the keyspace
/// method-aware. Fragments never reach the server and are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub url: String,
    pub hash: String,
}

impl CacheKey {
    pub fn for_url(url: &Url) -> Self {
        let mut url = url.clone();
        url.set_fragment(None);
        let url = url.to_string();
        let hash = compute_cache_key("GET", &url);
        Self { url, hash }
    }
}

/// Compute the stored hash for a method and normalized URL.
pub fn compute_cache_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let hash1 = compute_cache_key("GET", "https://example.com/");
        let hash2 = compute_cache_key("GET", "https://example.com/");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_different_method() {
        assert_ne!(
            compute_cache_key("GET", "https://example.com/"),
            compute_cache_key("HEAD", "https://example.com/")
        );
    }

    #[test]
    fn test_hash_format() {
        let hash = compute_cache_key("GET", "https://example.com/");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_ignores_fragment() {
        let a = CacheKey::for_url(&Url::parse("https://example.com/app.js#v2").unwrap());
        let b = CacheKey::for_url(&Url::parse("https://example.com/app.js").unwrap());
        assert_eq!(a, b);
        assert_eq!(a.url, "https://example.com/app.js");
    }

    #[test]
    fn test_key_keeps_query() {
        let a = CacheKey::for_url(&Url::parse("https://example.com/data/news.json?page=1").unwrap());
        let b = CacheKey::for_url(&Url::parse("https://example.com/data/news.json?page=2").unwrap());
        assert_ne!(a.hash, b.hash);
    }
}
