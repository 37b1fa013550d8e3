//! Lint command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use oxlint_bridge_core::OxlintPlugin;
use oxlint_bridge_core::host::memory::{MemoryCompiler, MemoryModule};
use tracing::debug;

use super::load_options;
use crate::cli::{Cli, OptionOverrides};
use crate::output::output_diagnostics;
use crate::utils::{create_tokio_runtime, resolve_dir};

/// Builds `files` once through the in-process host with the plugin attached.
///
/// Returns `true` if the build reported errors.
pub fn run_lint(
    cli: &Cli,
    files: &[String],
    overrides: &OptionOverrides,
    cwd: Option<&Path>,
) -> Result<bool> {
    let cwd = resolve_dir(cwd)?;
    let options = overrides.apply(load_options(cli, &cwd)?)?;
    let plugin = OxlintPlugin::new(options).into_diagnostic()?;

    let compiler = MemoryCompiler::new(cwd);
    let binding = plugin.apply(&compiler);
    debug!("Attached as '{}'", binding.key());

    let modules: Vec<MemoryModule> = files.iter().map(MemoryModule::new).collect();

    let runtime = create_tokio_runtime()?;
    let output = runtime
        .block_on(compiler.run(&modules))
        .into_diagnostic()?;

    output_diagnostics(&output.warnings, &output.errors);

    Ok(output.has_errors())
}
