//! Swiftcode MCP - code generation tools for AI agents
//!
//! Exposes the swiftcode Swagger/OpenAPI client generator over the Model
//! Context Protocol. The crate itself does no code generation: it validates
//! tool arguments, serves a static tool/prompt catalog, and hands calls to
//! the generator packages through the [`ApiGenerator`] seam.
//!
//! ## Layout
//!
//! - [`catalog`] - static tool and prompt descriptors
//! - [`dispatcher`] - argument handling for `generate_api_client`
//! - [`generator`] - generator traits and the Node.js bridge
//! - [`mcp`] - rmcp server handler and lifecycle
//!
//! ## Example
//!
//! ```ignore
//! use swiftcode_mcp::{BridgeConfig, NodeBridge, mcp::SwiftcodeServer};
//! use tokio_util::sync::CancellationToken;
//!
//! let bridge = NodeBridge::new(BridgeConfig::default());
//! SwiftcodeServer::new(bridge)
//!     .run(rmcp::transport::stdio(), CancellationToken::new())
//!     .await?;
//! ```

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod generator;
pub mod mcp;
pub mod types;

pub use catalog::{PromptDescriptor, ToolDescriptor, list_prompts, list_tools};
pub use config::BridgeConfig;
pub use dispatcher::Dispatcher;
pub use generator::{ApiGenerator, NodeBridge, TemplateCreator, TemplateListGenerator};
pub use types::{
    DispatchError, GenerateOptions, GeneratorError, ServerError, TemplateListOptions,
    ToolCallResult,
};
