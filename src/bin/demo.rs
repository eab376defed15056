//! Demo: call the template generators directly, without MCP
//!
//! Run with: cargo run --bin swiftcode-demo -- template

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use swiftcode_mcp::{
    BridgeConfig, NodeBridge, TemplateCreator, TemplateListGenerator, TemplateListOptions,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swiftcode-demo", version, about = "Run swiftcode template generators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Node.js executable used to run the generator packages
    #[arg(long, env = "SWIFTCODE_NODE", default_value = "node")]
    node: PathBuf,

    /// Directory whose node_modules provides the generator packages
    #[arg(long, env = "SWIFTCODE_MODULE_DIR")]
    module_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a list-page template file
    Template {
        #[arg(long, default_value = "template.js")]
        file: String,

        /// Message shown once the file is written
        #[arg(long, default_value = "下载转换列表的模板 template.js 成功")]
        tips: String,
    },

    /// Expand a template module into list-page files
    List {
        #[arg(long, default_value = "./template.js")]
        source: String,
    },

    /// Print the installed swiftcode package version
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = BridgeConfig::new().with_node_binary(cli.node);
    if let Some(dir) = cli.module_dir {
        config = config.with_module_dir(dir);
    }
    let bridge = NodeBridge::new(config);

    match run(&bridge, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error while generating SFC files: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(bridge: &NodeBridge, command: Commands) -> Result<()> {
    match command {
        Commands::Template { file, tips } => {
            bridge.create_template(&file, &tips).await?;
            info!("Template {} created", file);
        }
        Commands::List { source } => {
            let output = bridge.generate_list(TemplateListOptions { source }).await?;
            info!("List generated: {}", output);
        }
        Commands::Version => {
            println!("{}", bridge.package_version().await?);
        }
    }
    Ok(())
}
