//! Bridge error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while binding to a build or running the linter.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Invalid plugin options.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The linter could not be started or its output could not be collected.
    #[error("Failed to run '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The linter outlived the configured deadline and was killed.
    #[error("'{binary}' did not finish within {after:?}")]
    Timeout { binary: String, after: Duration },
}

impl BridgeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a spawn error for `binary`.
    pub fn spawn(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            binary: binary.into(),
            source,
        }
    }
}
