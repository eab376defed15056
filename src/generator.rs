//! External generator seam
//!
//! The generators are JavaScript packages. The traits here are what the
//! dispatcher and the demo binary depend on; [`NodeBridge`] is the production
//! implementation that runs each call in a Node.js child process.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::config::BridgeConfig;
use crate::types::{GenerateOptions, GeneratorError, TemplateListOptions};

/// Produces an API client from a Swagger/OpenAPI source
#[async_trait]
pub trait ApiGenerator: Send + Sync {
    /// Generate client files under `options.dir`. The returned value is
    /// whatever the generator reports and carries no contract.
    async fn generate(&self, options: GenerateOptions) -> Result<Value, GeneratorError>;
}

/// Scaffolds template files
#[async_trait]
pub trait TemplateCreator: Send + Sync {
    /// Write a template file named `file_name` and show `tips` once done
    async fn create_template(&self, file_name: &str, tips: &str) -> Result<(), GeneratorError>;

    /// Version of the template package
    async fn package_version(&self) -> Result<String, GeneratorError>;
}

/// Expands a template module into list-page files
#[async_trait]
pub trait TemplateListGenerator: Send + Sync {
    async fn generate_list(&self, options: TemplateListOptions) -> Result<Value, GeneratorError>;
}

/// ES module evaluated by `node -e`. Arguments arrive as
/// `<package> <export> <json array of call arguments>`; the awaited result
/// is written as JSON on the last line of stdout.
const LOADER: &str = r#"const [, pkg, name, payload] = process.argv;
const mod = await import(pkg);
const fn = mod[name] ?? mod.default?.[name];
if (typeof fn !== "function") {
  throw new Error(`${pkg} does not export ${name}`);
}
const out = await fn(...JSON.parse(payload));
process.stdout.write("\n" + JSON.stringify(out ?? null) + "\n");
"#;

/// Runs generator package exports through a Node.js child process
#[derive(Debug, Clone, Default)]
pub struct NodeBridge {
    config: BridgeConfig,
}

impl NodeBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Call `package`'s `export` with `args` and return its JSON result
    pub async fn invoke(
        &self,
        package: &str,
        export: &str,
        args: &[Value],
    ) -> Result<Value, GeneratorError> {
        let payload = serde_json::to_string(args)?;
        let program = self.config.node_binary.display().to_string();
        debug!(package, export, "Invoking generator via {}", program);

        let mut cmd = Command::new(&self.config.node_binary);
        cmd.arg("--input-type=module")
            .arg("-e")
            .arg(LOADER)
            .arg(package)
            .arg(export)
            .arg(&payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.module_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .map_err(|source| GeneratorError::Spawn { program, source })?;

        if !output.status.success() {
            return Err(GeneratorError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_result(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Last non-empty stdout line as JSON, or the raw text when it isn't JSON
fn parse_result(stdout: &str) -> Value {
    let last = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    if last.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(last).unwrap_or_else(|_| Value::String(stdout.trim().to_string()))
}

#[async_trait]
impl ApiGenerator for NodeBridge {
    async fn generate(&self, options: GenerateOptions) -> Result<Value, GeneratorError> {
        let options = serde_json::to_value(&options)?;
        self.invoke(&self.config.api_package, "Swagger2InterfaceOutput", &[options])
            .await
    }
}

#[async_trait]
impl TemplateCreator for NodeBridge {
    async fn create_template(&self, file_name: &str, tips: &str) -> Result<(), GeneratorError> {
        self.invoke(
            &self.config.template_package,
            "createTemplate",
            &[Value::from(file_name), Value::from(tips)],
        )
        .await
        .map(|_| ())
    }

    async fn package_version(&self) -> Result<String, GeneratorError> {
        match self
            .invoke(&self.config.template_package, "getPackageVersion", &[])
            .await?
        {
            Value::String(version) => Ok(version),
            other => Err(GeneratorError::Other(format!(
                "Unexpected version value: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl TemplateListGenerator for NodeBridge {
    async fn generate_list(&self, options: TemplateListOptions) -> Result<Value, GeneratorError> {
        let options = serde_json::to_value(&options)?;
        self.invoke(&self.config.list_package, "Template2ListOutput", &[options])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_json_line() {
        let out = "Generating...\nwrote 3 files\n{\"files\":3}\n";
        assert_eq!(parse_result(out), serde_json::json!({"files": 3}));
    }

    #[test]
    fn test_parse_result_plain_text() {
        assert_eq!(
            parse_result("done\n"),
            Value::String("done".to_string())
        );
        assert_eq!(parse_result("\n\n"), Value::Null);
    }

    #[tokio::test]
    async fn test_missing_node_binary() {
        let bridge = NodeBridge::new(
            BridgeConfig::new().with_node_binary("/nonexistent/swiftcode/node"),
        );
        let result = bridge.invoke("@swiftcode/api", "Swagger2InterfaceOutput", &[]).await;
        assert!(matches!(result, Err(GeneratorError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fake_node_process() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let write_script = |name: &str, body: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };
        let ok = write_script("node-ok", "echo 'scaffolding'; echo '\"1.4.2\"'");
        let failing = write_script("node-fail", "echo 'Cannot find package' >&2; exit 3");

        let bridge = NodeBridge::new(BridgeConfig::new().with_node_binary(&ok));
        assert_eq!(bridge.package_version().await.unwrap(), "1.4.2");

        let bridge = NodeBridge::new(
            BridgeConfig::new()
                .with_node_binary(&failing)
                .with_module_dir(dir.path()),
        );
        let err = bridge
            .generate(GenerateOptions {
                source: "file.json".to_string(),
                is_dev: false,
                dir: dir.path().join("apis"),
            })
            .await
            .unwrap_err();
        match err {
            GeneratorError::Failed { stderr, .. } => assert_eq!(stderr, "Cannot find package"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dropped_call_kills_generator() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("written");
        let node = dir.path().join("node-slow");
        std::fs::write(
            &node,
            format!("#!/bin/sh\nsleep 1\ntouch '{}'\n", marker.display()),
        )
        .unwrap();
        std::fs::set_permissions(&node, std::fs::Permissions::from_mode(0o755)).unwrap();

        let bridge = NodeBridge::new(BridgeConfig::new().with_node_binary(&node));
        let call = bridge.generate(GenerateOptions {
            source: "file.json".to_string(),
            is_dev: false,
            dir: dir.path().join("apis"),
        });
        assert!(
            tokio::time::timeout(Duration::from_millis(200), call)
                .await
                .is_err()
        );

        tokio::time::sleep(Duration::from_millis(1800)).await;
        assert!(!marker.exists(), "generator outlived the dropped call");
    }
}
