//! Plugin identity keys.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Base name of keys issued to unnamed compilers.
pub const PLUGIN_NAME: &str = "OxLintWebpackPlugin";

/// Key every hook of one plugin attachment is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginKey(Arc<str>);

impl PluginKey {
    /// Creates a key from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PluginKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues plugin keys.
///
/// Compilers that carry a name get that name as their key. Unnamed compilers
/// get `OxLintWebpackPlugin_<n>`, where `n` counts up from 1 per registry, so
/// two unnamed attachments never share a key.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    issued: AtomicUsize,
}

impl KeyRegistry {
    /// Creates a registry whose counter starts at zero.
    pub const fn new() -> Self {
        Self {
            issued: AtomicUsize::new(0),
        }
    }

    /// Returns the process-wide registry used by [`crate::OxlintPlugin::apply`].
    ///
    /// It is a plain static initialized to zero at process start.
    pub fn global() -> &'static KeyRegistry {
        static GLOBAL: KeyRegistry = KeyRegistry::new();
        &GLOBAL
    }

    /// Issues the key for a compiler with the given name.
    pub fn issue(&self, name: Option<&str>) -> PluginKey {
        match name {
            Some(name) if !name.is_empty() => PluginKey::new(name),
            _ => {
                let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
                PluginKey::new(format!("{PLUGIN_NAME}_{n}"))
            }
        }
    }

    /// Returns how many generated keys have been issued.
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::Relaxed)
    }
}
