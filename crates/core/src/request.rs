//! Read-only description of an intercepted request.

use std::fmt;
use std::str::FromStr;

use http::Method;
use url::Url;

use crate::Error;

/// Fetch destination hint supplied by the host for a request.
///
/// Mirrors the destination string a browser attaches to a fetch
/// (`""`, `"document"`, `"image"`, ...). Unknown values map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Empty,
    Document,
    Image,
    Script,
    Style,
    Font,
    Other,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Document => "document",
            Self::Image => "image",
            Self::Script => "script",
            Self::Style => "style",
            Self::Font => "font",
            Self::Other => "other",
        }
    }
}

impl FromStr for Destination {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "document" => Self::Document,
            "image" => Self::Image,
            "script" => Self::Script,
            "style" => Self::Style,
            "font" => Self::Font,
            _ => Self::Other,
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request as seen by the engine. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub destination: Destination,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, destination: Destination::Empty }
    }

    /// A GET request with no destination hint.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Build a descriptor from loosely typed host input.
    ///
    /// `method` defaults to GET and `destination` to the empty hint.
    pub fn parse(url: &str, method: Option<&str>, destination: Option<&str>) -> Result<Self, Error> {
        let url = Url::parse(url.trim()).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        let method = match method {
            Some(m) => Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes())
                .map_err(|e| Error::InvalidInput(format!("invalid method {m:?}: {e}")))?,
            None => Method::GET,
        };
        let destination = destination
            .map(|d| d.parse().unwrap_or_default())
            .unwrap_or_default();

        Ok(Self { method, url, destination })
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}
