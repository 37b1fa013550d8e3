//! # oxlint_bridge_core
//!
//! Runs oxlint as part of a bundler build.
//!
//! This crate provides:
//! - The `OxlintPlugin` lifecycle binder
//! - Host traits a bundler adapter implements, plus an in-process host
//! - The `oxlint` child-process runner
//! - Plugin options loading and validation
//!
//! ## Example
//!
//! ```rust,ignore
//! use oxlint_bridge_core::{OxlintPlugin, PluginOptions, ReportFormat};
//!
//! let options = PluginOptions::new().with_format(ReportFormat::Stylish);
//! let plugin = OxlintPlugin::new(options)?;
//!
//! // `compiler` is the host's implementation of `host::Compiler`.
//! plugin.apply(&compiler);
//! ```

mod error;
pub mod host;
mod key;
mod options;
mod plugin;
pub mod runner;

pub use error::BridgeError;
pub use key::{KeyRegistry, PLUGIN_NAME, PluginKey};
pub use options::{CHILD_PROCESS_MAX_FILES, DEFAULT_BINARY, OPTIONS_FILES, PluginOptions};
pub use plugin::{OxlintPlugin, PluginBinding};
pub use runner::{LintOutput, LintRunner, OxlintCommand, linter_args};

pub use oxlint_bridge_report::{Report, ReportFormat, Severity, translate};
