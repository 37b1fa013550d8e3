//! Linter invocation.
//!
//! This module provides the `LintRunner` trait, which abstracts how the
//! linter is executed, and `OxlintCommand`, which runs the real executable as
//! a child process.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::host::BoxFuture;
use crate::{BridgeError, PluginOptions};
use oxlint_bridge_report::ReportFormat;

/// Environment variable that makes oxlint emit ANSI colors into a pipe.
pub const FORCE_COLOR_ENV: &str = "FORCE_COLOR";

/// Returns the file arguments for one linter run.
///
/// Beyond `max_files` files the list is dropped entirely and the linter scans
/// the whole project instead; otherwise the files are passed as collected.
pub fn linter_args(files: &[PathBuf], max_files: usize) -> &[PathBuf] {
    if files.len() > max_files { &[] } else { files }
}

/// Output of one linter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOutput {
    /// Standard output, `None` if the linter printed nothing.
    pub report: Option<String>,
    /// Set when the linter exited unsuccessfully without printing a report.
    pub failure: Option<String>,
}

impl LintOutput {
    /// Creates the output of a run that printed `report`.
    pub fn report(report: impl Into<String>) -> Self {
        Self {
            report: Some(report.into()),
            failure: None,
        }
    }

    /// Creates the output of a run that failed without a report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            report: None,
            failure: Some(message.into()),
        }
    }
}

/// Trait for running the linter over a list of files.
///
/// An empty list means "lint the whole project".
pub trait LintRunner: Send + Sync {
    /// Runs the linter and returns what it printed.
    fn run<'a>(
        &'a self,
        files: &'a [PathBuf],
    ) -> BoxFuture<'a, Result<LintOutput, BridgeError>>;
}

/// Returns the `FORCE_COLOR` value to add to the child environment.
///
/// A value set on the command or inherited from the host wins.
fn default_force_color(
    explicit: Option<&OsStr>,
    inherited: Option<&OsStr>,
) -> Option<&'static str> {
    (explicit.is_none() && inherited.is_none()).then_some("1")
}

/// Runs `<binary> -f <format> [file...]` in the build directory.
#[derive(Debug, Clone)]
pub struct OxlintCommand {
    binary: String,
    format: ReportFormat,
    cwd: PathBuf,
    timeout: Option<Duration>,
    envs: Vec<(OsString, OsString)>,
}

impl OxlintCommand {
    /// Creates a command from plugin options, running in `cwd`.
    pub fn new(options: &PluginOptions, cwd: impl Into<PathBuf>) -> Self {
        Self {
            binary: options.binary.clone(),
            format: options.format.clone(),
            cwd: cwd.into(),
            timeout: options.timeout(),
            envs: Vec::new(),
        }
    }

    /// Sets an environment variable for the child on top of the host's.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Returns the working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Returns the arguments passed to the executable.
    pub fn args(&self, files: &[PathBuf]) -> Vec<OsString> {
        let mut args = vec!["-f".into(), self.format.as_str().into()];
        args.extend(files.iter().map(|f| f.as_os_str().to_os_string()));
        args
    }

    /// Builds the child process command.
    ///
    /// The host environment is inherited. `FORCE_COLOR=1` is added unless the
    /// command or the host environment already sets it.
    pub fn command(&self, files: &[PathBuf]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(files))
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let explicit = self
            .envs
            .iter()
            .rev()
            .find(|(key, _)| key == FORCE_COLOR_ENV)
            .map(|(_, value)| value.as_os_str());
        let inherited = std::env::var_os(FORCE_COLOR_ENV);
        if let Some(value) = default_force_color(explicit, inherited.as_deref()) {
            cmd.env(FORCE_COLOR_ENV, value);
        }
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));

        cmd
    }

    async fn execute(&self, files: &[PathBuf]) -> Result<LintOutput, BridgeError> {
        if files.is_empty() {
            info!("Running {} on the whole project", self.binary);
        } else {
            info!("Running {} on {} file(s)", self.binary, files.len());
        }

        let output = self.command(files).output();
        let output = match self.timeout {
            Some(after) => tokio::time::timeout(after, output).await.map_err(|_| {
                BridgeError::Timeout {
                    binary: self.binary.clone(),
                    after,
                }
            })?,
            None => output.await,
        }
        .map_err(|e| BridgeError::spawn(&self.binary, e))?;

        debug!("{} exited with {}", self.binary, output.status);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim_end();
        if !stderr.is_empty() {
            debug!("{} stderr: {}", self.binary, stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.is_empty() {
            return Ok(LintOutput::report(stdout));
        }
        if output.status.success() {
            return Ok(LintOutput::default());
        }

        // A failing exit without a report means the linter itself broke.
        let mut message = format!(
            "'{}' failed ({}) without printing a report",
            self.binary, output.status
        );
        if !stderr.is_empty() {
            message.push_str(": ");
            message.push_str(stderr.trim_start());
        }
        warn!("{}", message);
        Ok(LintOutput::failure(message))
    }
}

impl LintRunner for OxlintCommand {
    fn run<'a>(
        &'a self,
        files: &'a [PathBuf],
    ) -> BoxFuture<'a, Result<LintOutput, BridgeError>> {
        Box::pin(self.execute(files))
    }
}
