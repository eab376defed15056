//! Tool call dispatch

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::catalog::GENERATE_API_CLIENT;
use crate::generator::ApiGenerator;
use crate::types::{DispatchError, GenerateApiClientParams, GenerateOptions, ToolCallResult};

/// Text returned after a successful generation
pub const GENERATE_SUCCESS_MESSAGE: &str =
    "API client generated successfully. Please check the apis directory. output file list";
/// Message surfaced when the generator fails
pub const GENERATE_FAILURE_MESSAGE: &str = "Failed to generate API client";
/// Subdirectory of the workspace that receives generated clients
pub const OUTPUT_SUBDIR: &str = "apis";

/// Routes tool calls to the external generator
pub struct Dispatcher<G> {
    generator: G,
}

impl<G: ApiGenerator> Dispatcher<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Execute the named tool with `args`
    pub async fn call_tool(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Result<ToolCallResult, DispatchError> {
        match name {
            GENERATE_API_CLIENT => self.generate_api_client(args).await,
            _ => Err(DispatchError::NotFound(name.to_string())),
        }
    }

    async fn generate_api_client(
        &self,
        args: &Map<String, Value>,
    ) -> Result<ToolCallResult, DispatchError> {
        let params = parse_params(args)?;
        let options = GenerateOptions {
            source: classify_source(&params.source),
            is_dev: false,
            dir: output_dir(&params.dir),
        };
        info!(source = %options.source, dir = %options.dir.display(), "Generating API client");

        match self.generator.generate(options).await {
            Ok(_) => Ok(ToolCallResult::text(GENERATE_SUCCESS_MESSAGE)),
            Err(e) => {
                error!("Error while generating API client: {}", e);
                Err(DispatchError::Internal {
                    message: GENERATE_FAILURE_MESSAGE.to_string(),
                    source: e,
                })
            }
        }
    }
}

fn parse_params(args: &Map<String, Value>) -> Result<GenerateApiClientParams, DispatchError> {
    let params: GenerateApiClientParams = serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| DispatchError::InvalidParams(e.to_string()))?;
    if params.source.is_empty() {
        return Err(DispatchError::InvalidParams(
            "`source` must not be empty".to_string(),
        ));
    }
    if params.dir.is_empty() {
        return Err(DispatchError::InvalidParams(
            "`dir` must not be empty".to_string(),
        ));
    }
    Ok(params)
}

/// Absolute paths get one extra leading `/`; anything else passes through.
pub fn classify_source(source: &str) -> String {
    if source.starts_with('/') {
        format!("/{source}")
    } else {
        source.to_string()
    }
}

/// `dir` joined with the `apis` segment
pub fn output_dir(dir: &str) -> PathBuf {
    Path::new(dir).join(OUTPUT_SUBDIR)
}
