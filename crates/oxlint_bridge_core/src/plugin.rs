//! Build-lifecycle binding.
//!
//! `OxlintPlugin` attaches to a [`Compiler`] and, once per compiler object,
//! wires up per-compilation listeners that collect processed files and lint
//! them when the compilation has finished its modules.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::host::{
    Compilation, Compiler, CompilerId, CompilerListener, Module, finish_modules_listener,
};
use crate::runner::{LintRunner, OxlintCommand, linter_args};
use crate::{BridgeError, KeyRegistry, PluginKey, PluginOptions};
use oxlint_bridge_report::translate;

/// Lints the files of every compilation with oxlint.
///
/// # Example
///
/// ```rust,ignore
/// use oxlint_bridge_core::{OxlintPlugin, PluginOptions};
/// use oxlint_bridge_core::host::memory::{MemoryCompiler, MemoryModule};
///
/// let compiler = MemoryCompiler::new("/project");
/// let plugin = OxlintPlugin::new(PluginOptions::default())?;
/// plugin.apply(&compiler);
///
/// let output = compiler.run(&[MemoryModule::new("/project/src/a.js")]).await?;
/// for warning in &output.warnings {
///     eprintln!("{warning}");
/// }
/// ```
pub struct OxlintPlugin {
    options: PluginOptions,
    runner: Option<Arc<dyn LintRunner>>,
}

impl OxlintPlugin {
    /// Creates a plugin that runs the linter described by `options`.
    pub fn new(options: PluginOptions) -> Result<Self, BridgeError> {
        options.validate()?;
        Ok(Self {
            options,
            runner: None,
        })
    }

    /// Replaces the child-process runner, e.g. with an in-process linter.
    pub fn with_runner(mut self, runner: Arc<dyn LintRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Returns the plugin options.
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Attaches to `compiler`, drawing unnamed keys from the process-wide
    /// [`KeyRegistry`].
    pub fn apply(&self, compiler: &dyn Compiler) -> Arc<PluginBinding> {
        self.apply_with(compiler, KeyRegistry::global())
    }

    /// Attaches to `compiler`, drawing unnamed keys from `registry`.
    ///
    /// Registers the same build-start routine on `run` and `watch_run`.
    pub fn apply_with(
        &self,
        compiler: &dyn Compiler,
        registry: &KeyRegistry,
    ) -> Arc<PluginBinding> {
        let key = registry.issue(compiler.name());
        let context = compiler.context().to_path_buf();
        let runner: Arc<dyn LintRunner> = match &self.runner {
            Some(runner) => Arc::clone(runner),
            None => Arc::new(OxlintCommand::new(&self.options, &context)),
        };

        debug!("Attaching '{}' in {}", key, context.display());

        let binding = Arc::new(PluginBinding {
            key,
            context,
            options: self.options.clone(),
            runner,
            bound: Mutex::new(HashSet::new()),
        });

        let on_build_start: CompilerListener = {
            let binding = Arc::clone(&binding);
            Arc::new(move |compiler: &dyn Compiler| binding.on_build_start(compiler))
        };
        compiler.tap_run(&binding.key, Arc::clone(&on_build_start));
        compiler.tap_watch_run(&binding.key, on_build_start);

        binding
    }
}

/// State of one plugin attachment.
pub struct PluginBinding {
    key: PluginKey,
    context: PathBuf,
    options: PluginOptions,
    runner: Arc<dyn LintRunner>,
    /// Compilers whose `this_compilation` hook already carries our listener.
    bound: Mutex<HashSet<CompilerId>>,
}

impl PluginBinding {
    /// Returns the key every listener of this attachment is registered under.
    pub fn key(&self) -> &PluginKey {
        &self.key
    }

    /// Returns the build directory captured at attach time.
    pub fn context(&self) -> &Path {
        &self.context
    }

    /// Per-build setup, fired on `run` and `watch_run`.
    ///
    /// Registers the per-compilation listeners the first time a compiler is
    /// seen and does nothing on later builds of the same compiler.
    pub fn on_build_start(self: &Arc<Self>, compiler: &dyn Compiler) {
        if !self.bound.lock().insert(compiler.id()) {
            debug!("'{}' already bound to compiler {:?}", self.key, compiler.id());
            return;
        }

        let binding = Arc::clone(self);
        compiler.tap_this_compilation(
            &self.key,
            Arc::new(move |compilation: &dyn Compilation| binding.on_compilation(compilation)),
        );
    }

    fn on_compilation(self: &Arc<Self>, compilation: &dyn Compilation) {
        let files: Arc<Mutex<Vec<PathBuf>>> = Arc::default();

        {
            let files = Arc::clone(&files);
            compilation.tap_succeed_module(
                &self.key,
                Arc::new(move |module: &dyn Module| {
                    if let Some(path) = module_path(module) {
                        files.lock().push(path);
                    }
                }),
            );
        }

        let binding = Arc::clone(self);
        compilation.tap_finish_modules(
            &self.key,
            finish_modules_listener(move |compilation| {
                let binding = Arc::clone(&binding);
                let files = files.lock().clone();
                Box::pin(async move { binding.lint(files, compilation).await })
            }),
        );
    }

    /// Lints the files of one compilation and pushes the findings into it.
    async fn lint(
        &self,
        files: Vec<PathBuf>,
        compilation: &dyn Compilation,
    ) -> Result<(), BridgeError> {
        if files.is_empty() {
            debug!("No modules collected by '{}', skipping lint", self.key);
            return Ok(());
        }

        let args = linter_args(&files, self.options.child_process_max_files);
        if args.is_empty() {
            info!(
                "{} files exceed childProcessMaxFiles ({}), linting the whole project",
                files.len(),
                self.options.child_process_max_files
            );
        }

        let output = self.runner.run(args).await?;
        if let Some(failure) = output.failure {
            compilation.push_warning(format!("oxlint: {failure}"));
        }
        let Some(raw) = output.report else {
            debug!("Linter produced no output");
            return Ok(());
        };

        let report = translate(&raw, &self.options.format, &self.context.to_string_lossy());
        debug!(
            "Translated report: {} warning(s), {} error(s), {} skipped group(s)",
            report.warnings.len(),
            report.errors.len(),
            report.skipped.len()
        );

        for warning in report.warnings {
            compilation.push_warning(warning);
        }
        for error in report.errors {
            compilation.push_error(error);
        }
        for skipped in report.skipped {
            compilation.push_warning(format!("oxlint: {skipped}"));
        }

        Ok(())
    }
}

/// Returns the file behind a module, without any `?query` suffix.
fn module_path(module: &dyn Module) -> Option<PathBuf> {
    let resource = module.resource()?;
    let path = resource.split_once('?').map_or(resource, |(path, _)| path);
    (!path.is_empty()).then(|| PathBuf::from(path))
}
