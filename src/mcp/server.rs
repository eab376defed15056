//! MCP Server implementation using the official rmcp SDK
//!
//! Exposes the swiftcode generators via the Model Context Protocol.

use std::future::Future;
use std::io;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    model::*,
    service::{RequestContext, RoleServer},
    transport::IntoTransport,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::catalog::{self, PromptDescriptor, ToolDescriptor};
use crate::dispatcher::Dispatcher;
use crate::generator::ApiGenerator;
use crate::types::{DispatchError, ServerError};

const SERVER_NAME: &str = "swiftcode-mcp";

// ============================================================================
// Catalog conversion
// ============================================================================

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        descriptor.input_schema(),
    )
}

fn to_mcp_prompt(descriptor: &PromptDescriptor) -> Prompt {
    let arguments = descriptor
        .arguments
        .iter()
        .map(|arg| PromptArgument {
            name: arg.name.to_string(),
            title: None,
            description: Some(arg.description.to_string()),
            required: Some(arg.required),
        })
        .collect();
    Prompt::new(descriptor.name, Some(descriptor.description), Some(arguments))
}

fn to_mcp_error(err: DispatchError) -> McpError {
    McpError::new(ErrorCode(err.code()), err.to_string(), Some(err.data()))
}

// ============================================================================
// MCP Service
// ============================================================================

/// Swiftcode MCP Service
///
/// Answers discovery requests from the static catalog and forwards tool
/// calls to the [`Dispatcher`].
pub struct SwiftcodeService<G> {
    dispatcher: Arc<Dispatcher<G>>,
}

impl<G> Clone for SwiftcodeService<G> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<G: ApiGenerator> SwiftcodeService<G> {
    pub fn new(generator: G) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(generator)),
        }
    }
}

impl<G: ApiGenerator + 'static> ServerHandler for SwiftcodeService<G> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .enable_prompts()
                .enable_prompts_list_changed()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("Swiftcode MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Swiftcode MCP Server - Generate TypeScript API clients from Swagger/OpenAPI specifications"
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: catalog::list_tools().iter().map(to_mcp_tool).collect(),
            next_cursor: None,
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: catalog::list_prompts().iter().map(to_mcp_prompt).collect(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        let result = self
            .dispatcher
            .call_tool(&request.name, &args)
            .await
            .map_err(to_mcp_error)?;

        let content = result
            .content
            .into_iter()
            .map(|block| Content::text(block.text))
            .collect();
        Ok(CallToolResult::success(content))
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Owns the service for the lifetime of one transport connection
pub struct SwiftcodeServer<G> {
    service: SwiftcodeService<G>,
}

impl<G: ApiGenerator + 'static> SwiftcodeServer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            service: SwiftcodeService::new(generator),
        }
    }

    /// Serve `transport` until the peer disconnects or `shutdown` is cancelled.
    ///
    /// Failing to complete the MCP handshake is a start error. Errors raised
    /// while tearing the session down are logged and swallowed. rmcp cancels
    /// the token it serves with when the session ends, so it gets a child of
    /// `shutdown`; a peer disconnect leaves the caller's token untouched.
    pub async fn run<T, E, A>(
        self,
        transport: T,
        shutdown: CancellationToken,
    ) -> Result<(), ServerError>
    where
        T: IntoTransport<RoleServer, E, A> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let running = self
            .service
            .serve_with_ct(transport, shutdown.child_token())
            .await
            .map_err(|e| ServerError::Start(e.to_string()))?;

        info!("MCP server running, waiting for requests...");

        match running.waiting().await {
            Ok(reason) => info!("MCP server stopped: {:?}", reason),
            Err(e) => warn!("Error while stopping server: {}", e),
        }
        Ok(())
    }
}

/// Cancel `shutdown` on Ctrl-C. Returns early if `shutdown` fires first.
pub async fn shutdown_on_interrupt(shutdown: CancellationToken) {
    shutdown_on_signal(tokio::signal::ctrl_c(), shutdown).await
}

/// Cancel `shutdown` once `signal` resolves successfully
pub async fn shutdown_on_signal<F>(signal: F, shutdown: CancellationToken)
where
    F: Future<Output = io::Result<()>>,
{
    tokio::select! {
        signal = signal => match signal {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                shutdown.cancel();
            }
            Err(e) => warn!("Failed to listen for interrupt: {}", e),
        },
        _ = shutdown.cancelled() => {}
    }
}
