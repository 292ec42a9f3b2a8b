//! resource_fetch tool implementation.
//!
//! Routes one intercepted request through the engine and reports the
//! response it resolved to.

use offcache_client::canonicalize;
use offcache_core::{CacheStore, Error, Network, RequestDescriptor};
use offcache_engine::{Engine, Outcome};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for the resource_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResourceFetchParams {
    /// URL of the request. Surrounding whitespace and the fragment are
    /// dropped and a missing scheme defaults to https.
    pub url: String,

    /// HTTP method (default: GET). Anything but GET passes through.
    #[serde(default)]
    pub method: Option<String>,

    /// Fetch destination hint, e.g. "image" or "document".
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Output structure for the resource_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResourceFetchOutput {
    /// "served", or "pass_through" when the host should forward the request itself.
    pub outcome: String,
    /// "network", "cache" or "fallback".
    pub source: Option<String>,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub headers: Vec<Header>,
    /// Body as text, absent when it isn't valid UTF-8.
    pub body: Option<String>,
    pub body_bytes: usize,
}

impl From<&Outcome> for ResourceFetchOutput {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::PassThrough => Self {
                outcome: "pass_through".into(),
                source: None,
                status: None,
                status_text: None,
                headers: Vec::new(),
                body: None,
                body_bytes: 0,
            },
            Outcome::Served(served) => {
                let resp = &served.response;
                Self {
                    outcome: "served".into(),
                    source: Some(served.source.as_str().into()),
                    status: Some(resp.status),
                    status_text: Some(resp.status_text.clone()),
                    headers: resp
                        .headers
                        .iter()
                        .map(|(name, value)| Header { name: name.clone(), value: value.clone() })
                        .collect(),
                    body: std::str::from_utf8(&resp.body).ok().map(str::to_string),
                    body_bytes: resp.body.len(),
                }
            }
        }
    }
}

/// Implementation of the resource_fetch tool.
pub async fn fetch_impl<S, N>(engine: &Engine<S, N>, params: ResourceFetchParams) -> Result<CallToolResult, McpError>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    let url = canonicalize(&params.url).map_err(|e| Error::InvalidUrl(format!("{}: {e}", params.url)))?;
    let req = RequestDescriptor::parse(url.as_str(), params.method.as_deref(), params.destination.as_deref())?;
    let outcome = engine.handle(&req).await;
    json_result(&ResourceFetchOutput::from(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::stub::{engine, output};
    use offcache_core::Response;

    fn params(url: &str) -> ResourceFetchParams {
        ResourceFetchParams { url: url.into(), method: None, destination: None }
    }

    #[tokio::test]
    async fn test_fetch_served_from_network() {
        let page = Response::new(200, "OK", "<h1>hi</h1>").with_header("Content-Type", "text/html");
        let engine = engine(&[("https://app.test/index.html", page)]).await;

        let result = fetch_impl(&engine, params("https://app.test/index.html")).await.unwrap();
        let out = output(&result);
        assert_eq!(out["outcome"], "served");
        assert_eq!(out["source"], "network");
        assert_eq!(out["status"], 200);
        assert_eq!(out["body"], "<h1>hi</h1>");
        assert_eq!(out["headers"][0]["name"], "Content-Type");
    }

    #[tokio::test]
    async fn test_fetch_offline_image_placeholder() {
        let engine = engine(&[]).await;
        let mut p = params("https://app.test/logo.png");
        p.destination = Some("image".into());

        let out = output(&fetch_impl(&engine, p).await.unwrap());
        assert_eq!(out["source"], "fallback");
        assert_eq!(out["status"], 200);
        assert!(out["body"].as_str().unwrap().contains("No Image"));
    }

    #[tokio::test]
    async fn test_fetch_post_passes_through() {
        let engine = engine(&[]).await;
        let mut p = params("https://app.test/api/submit");
        p.method = Some("post".into());

        let out = output(&fetch_impl(&engine, p).await.unwrap());
        assert_eq!(out["outcome"], "pass_through");
        assert!(out["status"].is_null());
    }

    #[tokio::test]
    async fn test_fetch_spellings_share_cache_entry() {
        let js = Response::new(200, "OK", "console.log(1)");
        let engine = engine(&[("https://app.test/app.js", js)]).await;

        let out = output(&fetch_impl(&engine, params("https://app.test/app.js")).await.unwrap());
        assert_eq!(out["source"], "network");

        for spelling in ["  https://APP.test/app.js ", "app.test/app.js", "https://app.test/app.js#v2"] {
            let out = output(&fetch_impl(&engine, params(spelling)).await.unwrap());
            assert_eq!(out["source"], "cache", "{spelling}");
            assert_eq!(out["body"], "console.log(1)");
        }
        assert_eq!(engine.store().keys("techflow-assets-v1").await.unwrap(), vec!["https://app.test/app.js"]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme() {
        let engine = engine(&[]).await;
        let err = fetch_impl(&engine, params("file:///etc/hosts")).await.unwrap_err();
        assert_eq!(err.code.0, -32003);
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let engine = engine(&[]).await;
        let err = fetch_impl(&engine, params("not a url")).await.unwrap_err();
        assert_eq!(err.code.0, -32003);
    }

    #[tokio::test]
    async fn test_fetch_invalid_method() {
        let engine = engine(&[]).await;
        let mut p = params("https://app.test/");
        p.method = Some("G E T".into());
        let err = fetch_impl(&engine, p).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
