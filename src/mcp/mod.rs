//! MCP (Model Context Protocol) server implementation
//!
//! This module provides a stdio-based MCP server using the official `rmcp` SDK.
//! It exposes the API client generator to AI clients.

mod server;

pub use server::{SwiftcodeServer, SwiftcodeService, shutdown_on_interrupt, shutdown_on_signal};
