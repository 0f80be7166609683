//! Generic operation API
//!
//! Every operation resolves a backend, renders that backend's template for
//! the operation, and hands the resulting argv to the `CommandRunner`.
//! `clean` is the exception: it deletes the backend's generated files
//! through `ProjectFs` instead of running anything.
//!
//! Nothing here returns `Err` to the caller. Resolution problems, launch
//! failures and partial cleanups all come back as an `OperationResult`.

use crate::backends::command_exec::SystemRunner;
use crate::backends::config::{BackendDescriptor, Operation};
use crate::backends::registry::BackendCatalog;
use crate::core::resolver::{Detection, Resolver};
use crate::core::types::{OperationResult, ResolvedOperation};
use crate::error::{Result, UvstartError};
use crate::system::OsFs;
use crate::traits::{CommandRunner, ProjectFs};
use crate::ui;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A generic operation plus its caller-supplied arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add { package: String, dev: bool },
    Remove { package: String },
    Sync { dev: bool },
    Run { argv: Vec<String> },
    List,
    Version,
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Add { dev: false, .. } => Operation::Add,
            Self::Add { dev: true, .. } => Operation::AddDev,
            Self::Remove { .. } => Operation::Remove,
            Self::Sync { dev: false } => Operation::Sync,
            Self::Sync { dev: true } => Operation::SyncDev,
            Self::Run { .. } => Operation::Run,
            Self::List => Operation::List,
            Self::Version => Operation::Version,
        }
    }

    /// Arguments appended after the template prefix
    fn arguments(&self) -> Result<Vec<String>> {
        match self {
            Self::Add { package, .. } | Self::Remove { package } => {
                if package.trim().is_empty() {
                    return Err(UvstartError::InvalidArgument(
                        "Package name cannot be empty".to_string(),
                    ));
                }
                Ok(vec![package.clone()])
            }
            Self::Run { argv } => Ok(argv.clone()),
            Self::Sync { .. } | Self::List | Self::Version => Ok(Vec::new()),
        }
    }
}

pub struct Dispatcher {
    catalog: BackendCatalog,
    project: PathBuf,
    runner: Box<dyn CommandRunner>,
    fs: Box<dyn ProjectFs>,
}

impl Dispatcher {
    /// Dispatcher over the built-in catalog
    pub fn new(
        project: impl Into<PathBuf>,
        runner: Box<dyn CommandRunner>,
        fs: Box<dyn ProjectFs>,
    ) -> Self {
        Self::with_catalog(BackendCatalog::builtin(), project, runner, fs)
    }

    pub fn with_catalog(
        catalog: BackendCatalog,
        project: impl Into<PathBuf>,
        runner: Box<dyn CommandRunner>,
        fs: Box<dyn ProjectFs>,
    ) -> Self {
        Self {
            catalog,
            project: project.into(),
            runner,
            fs,
        }
    }

    /// Dispatcher wired to real processes and the real filesystem
    pub fn system(project: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self::new(
            project,
            Box::new(SystemRunner::with_timeout(timeout)),
            Box::new(OsFs),
        )
    }

    pub fn catalog(&self) -> &BackendCatalog {
        &self.catalog
    }

    pub fn project_path(&self) -> &Path {
        &self.project
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog, self.fs.as_ref())
    }

    pub fn detect(&self) -> Option<String> {
        self.resolver().detect(&self.project)
    }

    pub fn detect_with_evidence(&self) -> Option<Detection> {
        self.resolver().detect_with_evidence(&self.project)
    }

    pub fn backend_ids(&self) -> Vec<&str> {
        self.catalog.ids()
    }

    pub fn is_backend_available(&self, id: &str) -> bool {
        self.catalog.contains(id)
    }

    /// Resolve the hint (or detect) and look the backend up.
    fn descriptor(&self, hint: Option<&str>) -> Result<&BackendDescriptor> {
        let id = self.resolver().resolve(hint, &self.project)?;
        self.catalog
            .get(&id)
            .ok_or(UvstartError::UnknownBackend(id))
    }

    /// Render `request` into the command that would run, without running it.
    pub fn prepare(&self, request: &Request, hint: Option<&str>) -> Result<ResolvedOperation> {
        let backend = self.descriptor(hint)?;
        let operation = request.operation();
        let args = request.arguments()?;

        backend
            .template(operation)
            .render(&backend.id, operation, &args)
    }

    pub fn dispatch(&self, request: &Request, hint: Option<&str>) -> OperationResult {
        let resolved = match self.prepare(request, hint) {
            Ok(resolved) => resolved,
            Err(e) => return OperationResult::from_error(&e),
        };

        ui::verbose(&format!("Resolved {} to: {}", request.operation(), resolved));

        match self.runner.run(&resolved) {
            Ok(output) => OperationResult::from_output(output),
            Err(e) => OperationResult::from_error(&e),
        }
    }

    pub fn add(&self, package: &str, dev: bool, hint: Option<&str>) -> OperationResult {
        self.dispatch(
            &Request::Add {
                package: package.to_string(),
                dev,
            },
            hint,
        )
    }

    pub fn remove(&self, package: &str, hint: Option<&str>) -> OperationResult {
        self.dispatch(
            &Request::Remove {
                package: package.to_string(),
            },
            hint,
        )
    }

    pub fn sync(&self, dev: bool, hint: Option<&str>) -> OperationResult {
        self.dispatch(&Request::Sync { dev }, hint)
    }

    pub fn run(&self, argv: &[String], hint: Option<&str>) -> OperationResult {
        self.dispatch(
            &Request::Run {
                argv: argv.to_vec(),
            },
            hint,
        )
    }

    pub fn list(&self, hint: Option<&str>) -> OperationResult {
        self.dispatch(&Request::List, hint)
    }

    pub fn version(&self, hint: Option<&str>) -> OperationResult {
        self.dispatch(&Request::Version, hint)
    }

    /// Cleanup paths of the resolved backend that currently exist.
    pub fn pending_cleanup(&self, hint: Option<&str>) -> Result<Vec<String>> {
        let backend = self.descriptor(hint)?;
        Ok(backend
            .cleanup_paths
            .iter()
            .filter(|p| self.fs.exists(&self.project.join(p)))
            .cloned()
            .collect())
    }

    /// Delete the resolved backend's generated files.
    ///
    /// Every path is attempted even after a failure; the result is a
    /// success only if every existing path was removed.
    pub fn clean(&self, hint: Option<&str>) -> OperationResult {
        let backend = match self.descriptor(hint) {
            Ok(backend) => backend,
            Err(e) => return OperationResult::from_error(&e),
        };

        let mut log = String::new();
        let mut failures = Vec::new();

        for relative in &backend.cleanup_paths {
            let path = self.project.join(relative);
            if !self.fs.exists(&path) {
                continue;
            }

            match self.fs.remove_recursive(&path) {
                Ok(()) => {
                    ui::verbose(&format!("Removed {}", path.display()));
                    log.push_str(&format!("Removed: {}\n", relative));
                }
                Err(e) => {
                    let line = format!("Failed to remove {}: {}", relative, e);
                    log.push_str(&line);
                    log.push('\n');
                    failures.push(line);
                }
            }
        }

        if failures.is_empty() {
            OperationResult::ok(log)
        } else {
            OperationResult::failed(log, failures.join("\n"), 1)
        }
    }

    /// Install instructions for `id`; empty if unknown.
    pub fn install_hint(&self, id: &str) -> String {
        self.catalog
            .get(id)
            .map(|b| b.install_hint.clone())
            .unwrap_or_default()
    }

    /// Declared cleanup paths for `id`; empty if unknown.
    pub fn cleanup_paths(&self, id: &str) -> Vec<String> {
        self.catalog
            .get(id)
            .map(|b| b.cleanup_paths.clone())
            .unwrap_or_default()
    }
}
