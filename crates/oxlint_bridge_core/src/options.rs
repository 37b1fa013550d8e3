//! Plugin options.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::BridgeError;
use oxlint_bridge_report::ReportFormat;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/options.json");
static OPTIONS_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Option file names looked up by [`PluginOptions::discover`], in order.
pub const OPTIONS_FILES: &[&str] = &[".oxlint-bridge.jsonc", ".oxlint-bridge.json"];

/// Default threshold above which the whole project is linted.
pub const CHILD_PROCESS_MAX_FILES: usize = 10;

/// Default linter executable.
pub const DEFAULT_BINARY: &str = "oxlint";

/// Options recognized by the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Report layout passed to `oxlint -f`; also selects the grammar.
    #[serde(default)]
    pub format: ReportFormat,

    /// Above this many collected files the linter is run without a file list.
    #[serde(default = "default_child_process_max_files")]
    pub child_process_max_files: usize,

    /// Linter executable name or path.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Optional deadline for one linter run, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_child_process_max_files() -> usize {
    CHILD_PROCESS_MAX_FILES
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

impl PluginOptions {
    /// Creates options with every default applied.
    pub fn new() -> Self {
        Self {
            format: ReportFormat::Default,
            child_process_max_files: CHILD_PROCESS_MAX_FILES,
            binary: default_binary(),
            timeout_ms: None,
        }
    }

    /// Sets the report format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the file-list threshold.
    pub fn with_child_process_max_files(mut self, max_files: usize) -> Self {
        self.child_process_max_files = max_files;
        self
    }

    /// Sets the linter executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Sets the linter deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the linter deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Checks invariants the type system does not enforce.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.child_process_max_files == 0 {
            return Err(BridgeError::config(
                "childProcessMaxFiles must be a positive integer",
            ));
        }
        if self.binary.trim().is_empty() {
            return Err(BridgeError::config("binary must not be empty"));
        }
        if self.timeout_ms == Some(0) {
            return Err(BridgeError::config("timeoutMs must be a positive integer"));
        }
        Ok(())
    }

    /// Loads options from a `.json` or `.jsonc` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BridgeError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let value = jsonc_parser::parse_to_serde_value(&content, &Default::default())
            .map_err(|e| BridgeError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Self::from_value(value)
    }

    /// Parses options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| BridgeError::config(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Validates a JSON value against the options schema and deserializes it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BridgeError> {
        let schema = OPTIONS_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded options schema");
            Validator::new(&schema_json).expect("Invalid options schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(BridgeError::config(format!(
                "Options validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        let options: Self = serde_json::from_value(value)
            .map_err(|e| BridgeError::config(format!("Invalid options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Finds an options file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        OPTIONS_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self::new()
    }
}
