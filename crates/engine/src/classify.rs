//! Request classification.

use std::fmt;

use offcache_core::{Destination, RequestDescriptor};

/// Path suffixes served cache-first from the assets region.
const STATIC_SUFFIXES: [&str; 4] = [".js", ".css", ".woff", ".woff2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    StaticAsset,
    PageOrData,
    Image,
    Other,
}

impl RequestClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticAsset => "static-asset",
            Self::PageOrData => "page-or-data",
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for RequestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a request. First matching rule wins, and the order matters:
///
/// 1. path ends with `.js`, `.css`, `.woff` or `.woff2`: static asset
/// 2. path ends with `.html`, path contains `/data/`, or the full URL
///    contains `github.com`: page or data
/// 3. destination hint is `image`: image
/// 4. anything else
pub fn classify(req: &RequestDescriptor) -> RequestClass {
    let path = req.url.path();

    if STATIC_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        RequestClass::StaticAsset
    } else if path.ends_with(".html") || path.contains("/data/") || req.url.as_str().contains("github.com") {
        RequestClass::PageOrData
    } else if req.destination == Destination::Image {
        RequestClass::Image
    } else {
        RequestClass::Other
    }
}
