//! cache_install and cache_activate tool implementations.

use offcache_core::{CacheStore, Network};
use offcache_engine::Engine;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;

/// Re-run install population. Reports what was stored, or why nothing was.
pub async fn install_impl<S, N>(engine: &Engine<S, N>) -> Result<CallToolResult, McpError>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    json_result(&engine.on_install().await)
}

/// Prune regions the running version does not recognize.
pub async fn activate_impl<S, N>(engine: &Engine<S, N>) -> Result<CallToolResult, McpError>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    json_result(&engine.on_activate().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::stub::{engine, output};
    use offcache_core::Response;

    #[tokio::test]
    async fn test_install_reports_stored_seeds() {
        let engine = engine(&[
            ("https://app.test/index.html", Response::new(200, "OK", "index")),
            ("https://app.test/app.js", Response::new(200, "OK", "js")),
        ])
        .await;

        let out = output(&install_impl(&engine).await.unwrap());
        assert!(out["error"].is_null());
        assert_eq!(out["stored"][1][0], "techflow-assets-v1");
        assert_eq!(out["stored"][1][1], "https://app.test/app.js");
    }

    #[tokio::test]
    async fn test_install_failure_is_not_a_tool_error() {
        let engine = engine(&[]).await;
        let out = output(&install_impl(&engine).await.unwrap());
        assert!(out["error"].as_str().unwrap().contains("index.html"));
        assert_eq!(out["stored"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_activate_prunes() {
        let engine = engine(&[]).await;
        engine.store().open_region("techflow-v1.1").await.unwrap();
        engine.store().open_region("techflow-v1.2").await.unwrap();

        let out = output(&activate_impl(&engine).await.unwrap());
        assert_eq!(out["deleted"], serde_json::json!(["techflow-v1.1"]));
        assert_eq!(out["retained"], serde_json::json!(["techflow-v1.2"]));
    }
}
