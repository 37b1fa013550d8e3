//! In-process host.
//!
//! A minimal bundler lifecycle backed by name-keyed tap lists. The CLI drives
//! one-shot builds through it, and tests use it to observe exactly which
//! listeners the plugin registers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use super::{
    Compilation, CompilationListener, Compiler, CompilerId, CompilerListener,
    FinishModulesListener, Module, ModuleListener,
};
use crate::{BridgeError, PluginKey};

static NEXT_COMPILER_ID: AtomicU64 = AtomicU64::new(1);

/// Listeners of one hook, in registration order.
struct Taps<L> {
    taps: Mutex<Vec<(PluginKey, L)>>,
}

impl<L: Clone> Taps<L> {
    fn new() -> Self {
        Self {
            taps: Mutex::new(Vec::new()),
        }
    }

    fn tap(&self, key: &PluginKey, listener: L) {
        self.taps.lock().push((key.clone(), listener));
    }

    /// Clones the listeners out so they may register further taps while running.
    fn listeners(&self) -> Vec<L> {
        self.taps.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    fn keys(&self) -> Vec<PluginKey> {
        self.taps.lock().iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Compiler-level hooks of the in-process host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerHook {
    Run,
    WatchRun,
    ThisCompilation,
}

/// Compilation-level hooks of the in-process host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilationHook {
    SucceedModule,
    FinishModules,
}

/// Diagnostics collected by one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl BuildOutput {
    /// Returns `true` if the compilation recorded any error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A module known only by its resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryModule {
    resource: Option<String>,
}

impl MemoryModule {
    /// Creates a module backed by a resource, e.g. `/p/src/a.js?raw`.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
        }
    }

    /// Creates a module without a resource, like a runtime or virtual module.
    pub fn synthetic() -> Self {
        Self { resource: None }
    }
}

impl Module for MemoryModule {
    fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

/// An in-process compiler.
pub struct MemoryCompiler {
    id: CompilerId,
    name: Option<String>,
    context: PathBuf,
    run: Taps<CompilerListener>,
    watch_run: Taps<CompilerListener>,
    this_compilation: Taps<CompilationListener>,
}

impl MemoryCompiler {
    /// Creates an unnamed compiler building in `context`.
    pub fn new(context: impl Into<PathBuf>) -> Self {
        Self {
            id: CompilerId::new(NEXT_COMPILER_ID.fetch_add(1, Ordering::Relaxed)),
            name: None,
            context: context.into(),
            run: Taps::new(),
            watch_run: Taps::new(),
            this_compilation: Taps::new(),
        }
    }

    /// Sets the compiler name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the keys registered on `hook`, in registration order.
    pub fn taps(&self, hook: CompilerHook) -> Vec<PluginKey> {
        match hook {
            CompilerHook::Run => self.run.keys(),
            CompilerHook::WatchRun => self.watch_run.keys(),
            CompilerHook::ThisCompilation => self.this_compilation.keys(),
        }
    }

    /// Returns the number of listeners registered on `hook`.
    pub fn tap_count(&self, hook: CompilerHook) -> usize {
        self.taps(hook).len()
    }

    /// Runs a full build over `modules`.
    pub async fn run(&self, modules: &[MemoryModule]) -> Result<BuildOutput, BridgeError> {
        for listener in self.run.listeners() {
            listener(self);
        }
        self.compile(modules).await
    }

    /// Runs a watch-mode rebuild over `modules`.
    pub async fn watch_run(&self, modules: &[MemoryModule]) -> Result<BuildOutput, BridgeError> {
        for listener in self.watch_run.listeners() {
            listener(self);
        }
        self.compile(modules).await
    }

    /// Creates a compilation and fires `this_compilation` for it.
    pub fn new_compilation(&self) -> MemoryCompilation {
        let compilation = MemoryCompilation::new();
        for listener in self.this_compilation.listeners() {
            listener(&compilation);
        }
        compilation
    }

    async fn compile(&self, modules: &[MemoryModule]) -> Result<BuildOutput, BridgeError> {
        let compilation = self.new_compilation();
        for module in modules {
            compilation.succeed_module(module);
        }
        compilation.finish_modules().await?;

        let output = compilation.output();
        debug!(
            "Compilation finished with {} warning(s) and {} error(s)",
            output.warnings.len(),
            output.errors.len()
        );
        Ok(output)
    }
}

impl Compiler for MemoryCompiler {
    fn id(&self) -> CompilerId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn context(&self) -> &Path {
        &self.context
    }

    fn tap_run(&self, key: &PluginKey, listener: CompilerListener) {
        self.run.tap(key, listener);
    }

    fn tap_watch_run(&self, key: &PluginKey, listener: CompilerListener) {
        self.watch_run.tap(key, listener);
    }

    fn tap_this_compilation(&self, key: &PluginKey, listener: CompilationListener) {
        self.this_compilation.tap(key, listener);
    }
}

/// An in-process compilation.
pub struct MemoryCompilation {
    succeed_module: Taps<ModuleListener>,
    finish_modules: Taps<FinishModulesListener>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemoryCompilation {
    fn new() -> Self {
        Self {
            succeed_module: Taps::new(),
            finish_modules: Taps::new(),
            warnings: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Fires `succeed_module` for one module.
    pub fn succeed_module(&self, module: &dyn Module) {
        for listener in self.succeed_module.listeners() {
            listener(module);
        }
    }

    /// Fires `finish_modules`, awaiting each listener in registration order.
    ///
    /// Stops at the first failing listener.
    pub async fn finish_modules(&self) -> Result<(), BridgeError> {
        for listener in self.finish_modules.listeners() {
            listener(self).await?;
        }
        Ok(())
    }

    /// Returns the keys registered on `hook`, in registration order.
    pub fn taps(&self, hook: CompilationHook) -> Vec<PluginKey> {
        match hook {
            CompilationHook::SucceedModule => self.succeed_module.keys(),
            CompilationHook::FinishModules => self.finish_modules.keys(),
        }
    }

    /// Returns a copy of the diagnostics pushed so far.
    pub fn output(&self) -> BuildOutput {
        BuildOutput {
            warnings: self.warnings.lock().clone(),
            errors: self.errors.lock().clone(),
        }
    }
}

impl Compilation for MemoryCompilation {
    fn tap_succeed_module(&self, key: &PluginKey, listener: ModuleListener) {
        self.succeed_module.tap(key, listener);
    }

    fn tap_finish_modules(&self, key: &PluginKey, listener: FinishModulesListener) {
        self.finish_modules.tap(key, listener);
    }

    fn push_warning(&self, message: String) {
        self.warnings.lock().push(message);
    }

    fn push_error(&self, message: String) {
        self.errors.lock().push(message);
    }
}
