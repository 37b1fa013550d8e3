//! Child-process tests for `OxlintCommand`.
//!
//! A shell script stands in for oxlint. The command line is
//! `<binary> -f <format> [file...]`, so running `sh` with the script path in
//! the format slot executes the script with globbing disabled and the files
//! as its arguments.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use oxlint_bridge_core::host::memory::{MemoryCompiler, MemoryModule};
use oxlint_bridge_core::{
    BridgeError, LintOutput, LintRunner, OxlintCommand, OxlintPlugin, PluginOptions,
    ReportFormat,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fake_oxlint(dir: &Path, body: &str) -> PluginOptions {
    let script = dir.join("oxlint.sh");
    fs::write(&script, body).unwrap();
    PluginOptions::new()
        .with_binary("sh")
        .with_format(ReportFormat::Other(script.display().to_string()))
}

#[tokio::test]
async fn passes_files_in_build_directory() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(
        temp.path(),
        "echo \"cwd=$(pwd -P)\"\necho \"force_color=$FORCE_COLOR\"\necho \"args=$*\"\n",
    );
    let command = OxlintCommand::new(&options, temp.path());

    let files = vec![PathBuf::from("/p/b.js"), PathBuf::from("/p/a.js")];
    let stdout = command.run(&files).await.unwrap().report.unwrap();

    let cwd = fs::canonicalize(temp.path()).unwrap();
    let force_color = std::env::var("FORCE_COLOR").unwrap_or_else(|_| "1".to_string());
    assert_eq!(
        stdout,
        format!(
            "cwd={}\nforce_color={force_color}\nargs=/p/b.js /p/a.js\n",
            cwd.display()
        )
    );
}

#[tokio::test]
async fn explicit_force_color_wins() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(temp.path(), "echo \"force_color=$FORCE_COLOR\"\n");
    let command = OxlintCommand::new(&options, temp.path()).with_env("FORCE_COLOR", "0");

    let output = command.run(&[]).await.unwrap();
    assert_eq!(output, LintOutput::report("force_color=0\n"));
}

#[tokio::test]
async fn silent_successful_linter_yields_no_output() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(temp.path(), "echo 'ignored' >&2\nexit 0\n");
    let command = OxlintCommand::new(&options, temp.path());

    assert_eq!(command.run(&[]).await.unwrap(), LintOutput::default());
}

#[tokio::test]
async fn failing_linter_without_report_is_surfaced() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(
        temp.path(),
        "echo 'Failed to parse configuration file .oxlintrc.json' >&2\nexit 1\n",
    );
    let command = OxlintCommand::new(&options, temp.path());

    let output = command.run(&[]).await.unwrap();
    assert_eq!(output.report, None);
    let failure = output.failure.unwrap();
    assert!(failure.starts_with("'sh' failed ("), "got {failure}");
    assert!(
        failure.ends_with(
            "without printing a report: Failed to parse configuration file .oxlintrc.json"
        ),
        "got {failure}"
    );
}

#[tokio::test]
async fn failing_exit_status_still_returns_report() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(temp.path(), "printf '\\n  x boom\\n'\nexit 1\n");
    let command = OxlintCommand::new(&options, temp.path());

    let output = command.run(&[]).await.unwrap();
    assert_eq!(output, LintOutput::report("\n  x boom\n"));
}

#[tokio::test]
async fn plugin_warns_when_linter_breaks() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(
        temp.path(),
        "echo 'Failed to parse configuration file .oxlintrc.json' >&2\nexit 1\n",
    );
    let compiler = MemoryCompiler::new(temp.path());
    OxlintPlugin::new(options).unwrap().apply(&compiler);

    let output = compiler.run(&[MemoryModule::new("/p/a.js")]).await.unwrap();

    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].starts_with("oxlint: 'sh' failed ("));
    assert!(output.warnings[0].contains(".oxlintrc.json"));
    assert!(output.errors.is_empty());
}

#[tokio::test]
async fn slow_linter_times_out() {
    let temp = TempDir::new().unwrap();
    let options =
        fake_oxlint(temp.path(), "sleep 5\n").with_timeout(Duration::from_millis(100));
    let command = OxlintCommand::new(&options, temp.path());

    let err = command.run(&[]).await.unwrap_err();
    match err {
        BridgeError::Timeout { binary, after } => {
            assert_eq!(binary, "sh");
            assert_eq!(after, Duration::from_millis(100));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn plugin_reports_linter_findings() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(
        temp.path(),
        "printf '\\n  \\342\\232\\240 first: %s\\n\\n  \\303\\227 second: %s\\n\\nFound 1 warning and 1 error.\\n' \"$1\" \"$2\"\n",
    );
    let compiler = MemoryCompiler::new(temp.path());
    OxlintPlugin::new(options).unwrap().apply(&compiler);

    let output = compiler
        .run(&[MemoryModule::new("/p/a.js?raw"), MemoryModule::new("/p/b.js")])
        .await
        .unwrap();

    assert_eq!(output.warnings, vec!["\n  ⚠ first: /p/a.js".to_string()]);
    assert_eq!(output.errors, vec!["\n  × second: /p/b.js".to_string()]);
}

#[tokio::test]
async fn runner_can_be_shared_across_plugins() {
    let temp = TempDir::new().unwrap();
    let options = fake_oxlint(temp.path(), "printf '\\342\\232\\240 shared\\n'\n");
    let runner: Arc<dyn LintRunner> = Arc::new(OxlintCommand::new(&options, temp.path()));

    let compiler = MemoryCompiler::new(temp.path());
    OxlintPlugin::new(options.clone())
        .unwrap()
        .with_runner(Arc::clone(&runner))
        .apply(&compiler);
    OxlintPlugin::new(options)
        .unwrap()
        .with_runner(runner)
        .apply(&compiler);

    let output = compiler.run(&[MemoryModule::new("/p/a.js")]).await.unwrap();
    assert_eq!(output.warnings, vec!["\n⚠ shared".to_string(); 2]);
}
