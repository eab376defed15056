//! Settings for reaching the JavaScript generator packages

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Node.js executable
pub const DEFAULT_NODE_BINARY: &str = "node";
/// Package exporting `Swagger2InterfaceOutput`
pub const DEFAULT_API_PACKAGE: &str = "@swiftcode/api";
/// Package exporting `Template2ListOutput`
pub const DEFAULT_LIST_PACKAGE: &str = "@swiftcode/list";
/// Package exporting `createTemplate` and `getPackageVersion`
pub const DEFAULT_TEMPLATE_PACKAGE: &str = "swiftcode";

/// How the Node.js bridge locates and runs the generator packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Node.js executable (name on `PATH` or absolute path)
    pub node_binary: PathBuf,
    /// Directory whose `node_modules` resolves the packages; the current
    /// directory when unset
    pub module_dir: Option<PathBuf>,
    /// Package providing the API client generator
    pub api_package: String,
    /// Package providing the template list generator
    pub list_package: String,
    /// Package providing template scaffolding
    pub template_package: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            node_binary: PathBuf::from(DEFAULT_NODE_BINARY),
            module_dir: None,
            api_package: DEFAULT_API_PACKAGE.to_string(),
            list_package: DEFAULT_LIST_PACKAGE.to_string(),
            template_package: DEFAULT_TEMPLATE_PACKAGE.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Create a config with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the Node.js executable
    pub fn with_node_binary(mut self, node: impl Into<PathBuf>) -> Self {
        self.node_binary = node.into();
        self
    }

    /// Builder: set the module resolution directory
    pub fn with_module_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.module_dir = Some(dir.into());
        self
    }

    /// Builder: set the API generator package
    pub fn with_api_package(mut self, package: impl Into<String>) -> Self {
        self.api_package = package.into();
        self
    }

    /// Builder: set the template list package
    pub fn with_list_package(mut self, package: impl Into<String>) -> Self {
        self.list_package = package.into();
        self
    }

    /// Builder: set the template scaffolding package
    pub fn with_template_package(mut self, package: impl Into<String>) -> Self {
        self.template_package = package.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.node_binary, PathBuf::from("node"));
        assert_eq!(config.api_package, "@swiftcode/api");
        assert_eq!(config.list_package, "@swiftcode/list");
        assert_eq!(config.template_package, "swiftcode");
        assert!(config.module_dir.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BridgeConfig::new()
            .with_node_binary("/opt/node/bin/node")
            .with_module_dir("/srv/app")
            .with_api_package("@acme/api");

        assert_eq!(config.node_binary, PathBuf::from("/opt/node/bin/node"));
        assert_eq!(config.module_dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(config.api_package, "@acme/api");
        assert_eq!(config.template_package, "swiftcode");
    }
}
