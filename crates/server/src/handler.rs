//! MCP server handler implementation.
//!
//! This module defines the server handler that routes tool calls onto the
//! engine entry points.
use crate::tools::{
    CacheSyncParams, ResourceFetchParams, activate_impl, fetch_impl, install_impl, sync_impl,
};

use offcache_client::FetchClient;
use offcache_core::CacheDb;
use offcache_engine::Engine;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The engine as wired by the binary: SQLite store, reqwest network.
pub type HostEngine = Engine<CacheDb, FetchClient>;

/// The main MCP server handler for offcache.
#[derive(Clone)]
pub struct OffcacheServer {
    engine: HostEngine,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
#[tool_router]
impl OffcacheServer {
    pub fn new(engine: HostEngine) -> Self {
        Self { engine, tool_router: Self::tool_router() }
    }

    /// Route one request through the caching strategies.
    #[tool(
        description = "Resolve a request through the offline cache. Returns the response and whether it came from the network, the cache, or a fallback."
    )]
    async fn resource_fetch(&self, params: Parameters<ResourceFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.engine, params.0).await
    }

    #[tool(description = "Fetch the seed manifest and store it in the cache regions. All-or-nothing.")]
    async fn cache_install(&self) -> Result<CallToolResult, McpError> {
        install_impl(&self.engine).await
    }

    #[tool(description = "Delete every cache region the running version does not recognize.")]
    async fn cache_activate(&self) -> Result<CallToolResult, McpError> {
        activate_impl(&self.engine).await
    }

    #[tool(description = "Deliver a background sync tag. Only the configured refresh tag does anything.")]
    async fn cache_sync(&self, params: Parameters<CacheSyncParams>) -> Result<CallToolResult, McpError> {
        sync_impl(&self.engine, params.0).await
    }
}

impl ServerHandler for OffcacheServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "offcache".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
