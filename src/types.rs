//! Core types for tool dispatch

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC error code for an unknown tool
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC error code for malformed tool arguments
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC error code for a failed generator call
pub const INTERNAL_ERROR: i32 = -32603;

/// Arguments accepted by the `generate_api_client` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateApiClientParams {
    /// URL or JSON file path of the Swagger/OpenAPI document
    pub source: String,
    /// Workspace directory; output lands in `<dir>/apis`
    pub dir: String,
}

/// Options handed to the API client generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Classified source path or URL
    pub source: String,
    /// Development mode flag of the generator, always off when driven over MCP
    pub is_dev: bool,
    /// Output directory
    pub dir: PathBuf,
}

/// Options handed to the template list generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateListOptions {
    /// Path of the template module to expand
    pub source: String,
}

/// Single text block of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Result of a successful tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
}

impl ToolCallResult {
    /// Create a result holding one text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
        }
    }
}

/// Errors raised by an external generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Generator exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Failed to encode generator arguments: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced to the MCP client from a tool call
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Tool {0} not found")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidParams(String),

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: GeneratorError,
    },
}

impl DispatchError {
    /// JSON-RPC error code for this kind
    pub fn code(&self) -> i32 {
        match self {
            DispatchError::NotFound(_) => METHOD_NOT_FOUND,
            DispatchError::InvalidParams(_) => INVALID_PARAMS,
            DispatchError::Internal { .. } => INTERNAL_ERROR,
        }
    }

    /// Auxiliary error payload: `{code, message}` plus `cause` for generator failures
    pub fn data(&self) -> serde_json::Value {
        let mut data = serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        if let DispatchError::Internal { source, .. } = self {
            data["cause"] = serde_json::Value::String(source.to_string());
        }
        data
    }
}

/// Errors from the server lifecycle
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server failed to start: {0}")]
    Start(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_result_text() {
        let result = ToolCallResult::text("done");
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.content[0].kind, "text");
        assert_eq!(result.content[0].text, "done");
    }

    #[test]
    fn test_generate_options_wire_names() {
        let options = GenerateOptions {
            source: "file.json".to_string(),
            is_dev: false,
            dir: PathBuf::from("/work/apis"),
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "file.json", "isDev": false, "dir": "/work/apis"})
        );
    }

    #[test]
    fn test_dispatch_error_codes() {
        assert_eq!(DispatchError::NotFound("x".into()).code(), METHOD_NOT_FOUND);
        assert_eq!(
            DispatchError::InvalidParams("x".into()).code(),
            INVALID_PARAMS
        );
        let internal = DispatchError::Internal {
            message: "Failed to generate API client".to_string(),
            source: GeneratorError::Other("boom".to_string()),
        };
        assert_eq!(internal.code(), INTERNAL_ERROR);
    }

    #[test]
    fn test_not_found_message() {
        let err = DispatchError::NotFound("nope".to_string());
        assert_eq!(err.to_string(), "Tool nope not found");
        assert_eq!(err.data()["message"], "Tool nope not found");
        assert!(err.data().get("cause").is_none());
    }

    #[test]
    fn test_internal_error_keeps_cause() {
        let err = DispatchError::Internal {
            message: "Failed to generate API client".to_string(),
            source: GeneratorError::Other("ENOENT: swagger.json".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to generate API client");
        let data = err.data();
        assert_eq!(data["code"], INTERNAL_ERROR);
        assert_eq!(data["cause"], "ENOENT: swagger.json");
    }
}
