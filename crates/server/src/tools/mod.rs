//! MCP tool implementations.
//!
//! Each tool is a thin adapter from JSON parameters onto one engine entry
//! point. The `*_impl` functions are generic over the store and network so
//! they can be exercised without a live origin.

pub mod lifecycle;
pub mod resource_fetch;
pub mod sync;

use offcache_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

pub use lifecycle::{activate_impl, install_impl};
pub use resource_fetch::{ResourceFetchParams, fetch_impl};
pub use sync::{CacheSyncParams, sync_impl};

/// Render a tool output as pretty JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json =
        serde_json::to_string_pretty(output).map_err(|e| Error::Parse(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
