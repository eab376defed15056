//! Static tool and prompt catalog
//!
//! Descriptors are compile-time tables. Nothing here is mutated after
//! startup, so the accessors hand out `'static` slices.

use serde_json::{Map, Value, json};

/// Name of the only callable tool
pub const GENERATE_API_CLIENT: &str = "generate_api_client";

/// One property of a tool's input schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaProperty {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Tool exposed through `tools/list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub properties: &'static [SchemaProperty],
}

impl ToolDescriptor {
    /// Build the JSON-Schema object describing this tool's arguments
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for prop in self.properties {
            properties.insert(
                prop.name.to_string(),
                json!({ "type": prop.kind, "description": prop.description }),
            );
        }
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }
}

/// Argument of a prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptArgumentDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Prompt exposed through `prompts/list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgumentDescriptor],
}

const TOOLS: &[ToolDescriptor] = &[ToolDescriptor {
    name: GENERATE_API_CLIENT,
    description: "Generate TypeScript API client from Swagger/OpenAPI specification",
    properties: &[
        SchemaProperty {
            name: "source",
            kind: "string",
            description: "URL or JSON file path. Examples: For full path: '//user/file.json', For file only: 'file.json' returns 'file json'. URLs should start with '/' for proper routing.",
            required: true,
        },
        SchemaProperty {
            name: "dir",
            kind: "string",
            description: "workspace dir",
            required: true,
        },
    ],
}];

const PROMPTS: &[PromptDescriptor] = &[
    PromptDescriptor {
        name: "swiftcode_getting_started",
        description: "Swiftcode 代码生成工具入门指南",
        arguments: &[PromptArgumentDescriptor {
            name: "feature_type",
            description: "要了解的功能类型 (api-generation, vue-components, templates)",
            required: false,
        }],
    },
    PromptDescriptor {
        name: "swagger_to_typescript",
        description: "Swagger API 转 TypeScript 接口的详细指南",
        arguments: &[PromptArgumentDescriptor {
            name: "api_type",
            description: "API 类型 (rest, graphql, rpc)",
            required: false,
        }],
    },
];

/// All tools, in registration order
pub fn list_tools() -> &'static [ToolDescriptor] {
    TOOLS
}

/// All prompts, in registration order
pub fn list_prompts() -> &'static [PromptDescriptor] {
    PROMPTS
}

/// Look up a tool by exact name
pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tool() {
        let tools = list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "generate_api_client");
    }

    #[test]
    fn test_input_schema_requires_source_and_dir() {
        let schema = list_tools()[0].input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["source", "dir"]));
        assert_eq!(schema["properties"]["source"]["type"], "string");
        assert_eq!(schema["properties"]["dir"]["description"], "workspace dir");
    }

    #[test]
    fn test_prompts() {
        let names: Vec<&str> = list_prompts().iter().map(|p| p.name).collect();
        assert_eq!(names, ["swiftcode_getting_started", "swagger_to_typescript"]);
        assert!(
            list_prompts()
                .iter()
                .flat_map(|p| p.arguments)
                .all(|a| !a.required)
        );
    }

    #[test]
    fn test_catalog_is_stable() {
        assert_eq!(list_tools(), list_tools());
        assert_eq!(list_prompts().len(), list_prompts().len());
    }

    #[test]
    fn test_find_tool() {
        assert!(find_tool(GENERATE_API_CLIENT).is_some());
        assert!(find_tool("generate_api").is_none());
        assert!(find_tool("GENERATE_API_CLIENT").is_none());
    }
}
