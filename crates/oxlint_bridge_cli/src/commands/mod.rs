//! Subcommand implementations

pub mod lint;
pub mod translate;

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use oxlint_bridge_core::{PluginOptions, ReportFormat};
use tracing::{debug, info};

use crate::cli::{Cli, OptionOverrides};

/// Loads the options file given by `--config`, or the one found in `dir`.
pub fn load_options(cli: &Cli, dir: &Path) -> Result<PluginOptions> {
    if let Some(ref path) = cli.config {
        return PluginOptions::from_file(path).into_diagnostic();
    }

    if let Some(path) = PluginOptions::discover(dir) {
        info!("Using options: {}", path.display());
        return PluginOptions::from_file(&path).into_diagnostic();
    }

    debug!("No options file found, using defaults");
    Ok(PluginOptions::new())
}

pub fn parse_format(name: &str) -> Result<ReportFormat> {
    name.parse().into_diagnostic()
}

impl OptionOverrides {
    /// Replaces every option given on the command line.
    pub fn apply(&self, mut options: PluginOptions) -> Result<PluginOptions> {
        if let Some(ref format) = self.format {
            options.format = parse_format(format)?;
        }
        if let Some(max_files) = self.max_files {
            options.child_process_max_files = max_files;
        }
        if let Some(ref binary) = self.binary {
            options.binary = binary.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            options.timeout_ms = Some(timeout_ms);
        }

        options.validate().into_diagnostic()?;
        Ok(options)
    }
}
