//! Backend availability check

use crate::backends::BackendCatalog;
use crate::core::Dispatcher;
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStatus {
    pub id: String,
    pub program: String,
    pub location: Option<PathBuf>,
    pub install_hint: String,
}

impl BackendStatus {
    pub fn installed(&self) -> bool {
        self.location.is_some()
    }
}

/// Succeeds when at least one backend tool is on PATH
pub fn run(dispatcher: &Dispatcher) -> Result<i32> {
    let statuses = check_backends(dispatcher.catalog(), |program| which::which(program).ok());

    output::header("Package managers");
    for status in &statuses {
        match &status.location {
            Some(location) => println!(
                "  {} {:<8} {}",
                "✓".green(),
                status.id,
                location.display().to_string().dimmed()
            ),
            None => println!(
                "  {} {:<8} install with: {}",
                "✗".red(),
                status.id,
                status.install_hint
            ),
        }
    }

    let installed = statuses.iter().filter(|s| s.installed()).count();
    println!();
    if installed == 0 {
        output::warning("No supported package manager found on PATH");
        return Ok(1);
    }

    output::success(&format!("{}/{} available", installed, statuses.len()));
    Ok(0)
}

/// Look up every catalog backend with `lookup`, in catalog order
pub fn check_backends(
    catalog: &BackendCatalog,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Vec<BackendStatus> {
    catalog
        .all()
        .iter()
        .map(|backend| BackendStatus {
            id: backend.id.clone(),
            program: backend.program().to_string(),
            location: lookup(backend.program()),
            install_hint: backend.install_hint.clone(),
        })
        .collect()
}
