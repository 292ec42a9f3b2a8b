//! Response snapshot passed between the network, the store and the host.

use bytes::Bytes;

/// A complete response: status line, headers and body.
///
/// The body is reference counted, so clones share the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self { status, status_text: status_text.into(), headers: Vec::new(), body: body.into() }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Exactly HTTP 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_case_insensitive() {
        let resp = Response::new(200, "OK", "x").with_header("Content-Type", "text/css");
        assert_eq!(resp.content_type(), Some("text/css"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("text/css"));
        assert_eq!(resp.header("etag"), None);
    }

    #[test]
    fn test_status_predicates() {
        assert!(Response::new(200, "OK", "").is_ok());
        assert!(!Response::new(204, "No Content", "").is_ok());
        assert!(Response::new(204, "No Content", "").is_success());
        assert!(!Response::new(503, "Service Unavailable", "").is_success());
    }
}
