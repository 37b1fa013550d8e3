//! Interfaces a host bundler exposes to the plugin.
//!
//! The plugin never reaches into the host's internals: it only registers
//! listeners through these traits, always under its own [`PluginKey`], and
//! pushes rendered diagnostics back. A host adapter implements [`Compiler`],
//! [`Compilation`] and [`Module`] on top of its own hook system.
//!
//! Lifecycle, in the order a host fires it:
//!
//! 1. `run` / `watch_run` once per build attempt ([`Compiler::tap_run`],
//!    [`Compiler::tap_watch_run`])
//! 2. `this_compilation` once per compilation object
//!    ([`Compiler::tap_this_compilation`])
//! 3. `succeed_module` once per processed module
//!    ([`Compilation::tap_succeed_module`])
//! 4. `finish_modules` once all modules are processed; the host awaits every
//!    listener's future before finishing the compilation
//!    ([`Compilation::tap_finish_modules`])

pub mod memory;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use crate::{BridgeError, PluginKey};

/// A boxed future that can be awaited from any executor thread.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Opaque identity of a compiler object, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompilerId(u64);

impl CompilerId {
    /// Wraps a host-assigned identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Listener for `run` and `watch_run`.
pub type CompilerListener = Arc<dyn Fn(&dyn Compiler) + Send + Sync>;

/// Listener for `this_compilation`.
pub type CompilationListener = Arc<dyn Fn(&dyn Compilation) + Send + Sync>;

/// Listener for `succeed_module`.
pub type ModuleListener = Arc<dyn Fn(&dyn Module) + Send + Sync>;

/// Asynchronous listener for `finish_modules`.
pub type FinishModulesListener = Arc<
    dyn for<'a> Fn(&'a dyn Compilation) -> BoxFuture<'a, Result<(), BridgeError>> + Send + Sync,
>;

/// Lifecycle events and build settings of one compiler.
pub trait Compiler: Send + Sync {
    /// Returns the identity of this compiler object.
    fn id(&self) -> CompilerId;

    /// Returns the explicit compiler name, if configured.
    fn name(&self) -> Option<&str>;

    /// Returns the build's working directory.
    fn context(&self) -> &Path;

    /// Registers a listener fired when a build starts.
    fn tap_run(&self, key: &PluginKey, listener: CompilerListener);

    /// Registers a listener fired when a watch rebuild starts.
    fn tap_watch_run(&self, key: &PluginKey, listener: CompilerListener);

    /// Registers a listener fired for every new compilation.
    fn tap_this_compilation(&self, key: &PluginKey, listener: CompilationListener);
}

/// Lifecycle events and diagnostics sink of one compilation.
pub trait Compilation: Send + Sync {
    /// Registers a listener fired for every successfully processed module.
    fn tap_succeed_module(&self, key: &PluginKey, listener: ModuleListener);

    /// Registers an asynchronous listener fired once all modules are processed.
    fn tap_finish_modules(&self, key: &PluginKey, listener: FinishModulesListener);

    /// Appends to the compilation's warnings.
    fn push_warning(&self, message: String);

    /// Appends to the compilation's errors.
    fn push_error(&self, message: String);
}

/// A processed module.
pub trait Module {
    /// Returns the module's resource identifier, possibly with a `?query`.
    ///
    /// Synthetic modules have none.
    fn resource(&self) -> Option<&str>;
}

/// Wraps a closure as a [`FinishModulesListener`].
///
/// Closures returning a future that borrows their argument need an explicit
/// higher-ranked bound to be inferred; this function provides it.
pub fn finish_modules_listener<F>(listener: F) -> FinishModulesListener
where
    F: for<'a> Fn(&'a dyn Compilation) -> BoxFuture<'a, Result<(), BridgeError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(listener)
}
