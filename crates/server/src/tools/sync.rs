//! cache_sync tool implementation.

use offcache_core::{CacheStore, Network};
use offcache_engine::Engine;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the cache_sync tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheSyncParams {
    /// Background sync tag, e.g. "sync-news".
    pub tag: String,
}

/// Implementation of the cache_sync tool.
pub async fn sync_impl<S, N>(engine: &Engine<S, N>, params: CacheSyncParams) -> Result<CallToolResult, McpError>
where
    S: CacheStore + 'static,
    N: Network + 'static,
{
    json_result(&engine.on_sync_tag(&params.tag).await)
}
