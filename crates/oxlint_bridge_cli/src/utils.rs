//! CLI utility functions

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Resolves `dir` against the current directory, defaulting to it.
pub fn resolve_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir().into_diagnostic()?;
    Ok(match dir {
        Some(dir) => current.join(dir),
        None => current,
    })
}
