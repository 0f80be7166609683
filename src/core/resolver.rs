//! Backend detection
//!
//! Decides which package manager governs a project directory. Lock files
//! and other backend-specific files are authoritative; markers inside
//! `pyproject.toml` are only consulted when no such file exists.
//!
//! Both passes walk the catalog in declaration order, so a project that
//! matches several backends always resolves to the one declared first.

use crate::backends::registry::BackendCatalog;
use crate::constants::MANIFEST_FILE_NAME;
use crate::error::{Result, UvstartError};
use crate::traits::ProjectFs;
use crate::ui;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Why a backend was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Evidence {
    /// A detection file exists in the project root
    File(String),
    /// The manifest contains a detection pattern
    ManifestPattern(String),
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(file) => write!(f, "{}", file),
            Self::ManifestPattern(pattern) => {
                write!(f, "'{}' in {}", pattern, MANIFEST_FILE_NAME)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub backend: String,
    pub evidence: Evidence,
}

pub struct Resolver<'a> {
    catalog: &'a BackendCatalog,
    fs: &'a dyn ProjectFs,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a BackendCatalog, fs: &'a dyn ProjectFs) -> Self {
        Self { catalog, fs }
    }

    /// Backend id governing `project`, if any signal is present.
    pub fn detect(&self, project: &Path) -> Option<String> {
        self.detect_with_evidence(project).map(|d| d.backend)
    }

    pub fn detect_with_evidence(&self, project: &Path) -> Option<Detection> {
        let detection = self
            .detect_by_files(project)
            .or_else(|| self.detect_by_manifest(project));

        match &detection {
            Some(d) => ui::verbose(&format!(
                "Detected backend '{}' from {}",
                d.backend, d.evidence
            )),
            None => ui::verbose(&format!(
                "No backend signals found in {}",
                project.display()
            )),
        }

        detection
    }

    /// Explicit hint if non-empty, detection otherwise.
    ///
    /// The hint is not checked against the catalog here; the caller looks
    /// it up and reports unknown backends itself.
    pub fn resolve(&self, explicit: Option<&str>, project: &Path) -> Result<String> {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            ui::verbose(&format!("Using explicit backend '{}'", id));
            return Ok(id.to_string());
        }

        self.detect(project).ok_or(UvstartError::NoBackendDetermined)
    }

    fn detect_by_files(&self, project: &Path) -> Option<Detection> {
        for backend in self.catalog.all() {
            for file in &backend.detection_files {
                if self.fs.exists(&project.join(file)) {
                    return Some(Detection {
                        backend: backend.id.clone(),
                        evidence: Evidence::File(file.clone()),
                    });
                }
            }
        }
        None
    }

    fn detect_by_manifest(&self, project: &Path) -> Option<Detection> {
        let manifest = project.join(MANIFEST_FILE_NAME);
        if !self.fs.exists(&manifest) {
            return None;
        }

        // Read once and match every pattern against the same text
        let content = self.fs.read_text(&manifest);

        for backend in self.catalog.all() {
            for pattern in &backend.detection_patterns {
                if content.contains(pattern.as_str()) {
                    return Some(Detection {
                        backend: backend.id.clone(),
                        evidence: Evidence::ManifestPattern(pattern.clone()),
                    });
                }
            }
        }
        None
    }
}
