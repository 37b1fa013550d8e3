//! Translate command implementation

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};
use oxlint_bridge_report::translate;

use super::{load_options, parse_format};
use crate::cli::Cli;
use crate::output::output_diagnostics;
use crate::utils::resolve_dir;

/// Translates a saved report without running the linter.
///
/// Returns `true` if the report contains errors.
pub fn run_translate(
    cli: &Cli,
    file: Option<&Path>,
    format: Option<&str>,
    context: Option<&Path>,
) -> Result<bool> {
    let format = match format {
        Some(name) => parse_format(name)?,
        None => load_options(cli, &resolve_dir(None)?)?.format,
    };
    let context = resolve_dir(context)?;

    let raw = match file {
        Some(path) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw).into_diagnostic()?;
            raw
        }
    };

    let report = translate(&raw, &format, &context.to_string_lossy());

    let mut warnings = report.warnings;
    warnings.extend(report.skipped.iter().map(|s| format!("oxlint: {s}")));
    output_diagnostics(&warnings, &report.errors);

    Ok(!report.errors.is_empty())
}
