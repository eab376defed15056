//! MCP Server binary entry point
//!
//! Run with: cargo run --bin swiftcode-mcp

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rmcp::transport::stdio;
use swiftcode_mcp::mcp::{SwiftcodeServer, shutdown_on_interrupt};
use swiftcode_mcp::{BridgeConfig, NodeBridge};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "swiftcode-mcp", version, about = "Swiftcode MCP server over stdio")]
struct Cli {
    /// Node.js executable used to run the generator packages
    #[arg(long, env = "SWIFTCODE_NODE", default_value = "node")]
    node: PathBuf,

    /// Directory whose node_modules provides the generator packages
    #[arg(long, env = "SWIFTCODE_MODULE_DIR")]
    module_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for MCP protocol)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Swiftcode MCP Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = BridgeConfig::new().with_node_binary(cli.node);
    if let Some(dir) = cli.module_dir {
        config = config.with_module_dir(dir);
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_interrupt(shutdown.clone()));

    match SwiftcodeServer::new(NodeBridge::new(config))
        .run(stdio(), shutdown)
        .await
    {
        Ok(()) => {
            info!("MCP server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
