//! Project summary
//!
//! Reports what uvstart sees in a project directory: manifest, lock files,
//! environment directories, the project config pin and the detected
//! backend with the evidence behind it.

use crate::config::{find_project_config, load_project_config};
use crate::constants::{FOREIGN_LOCK_FILES, MANIFEST_FILE_NAME, PROJECT_MARKER_FILES, VENV_DIRS};
use crate::core::{Detection, Dispatcher};
use crate::error::Result;
use crate::ui as output;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub path: String,
    pub name: String,
    pub has_manifest: bool,
    pub lock_files: Vec<String>,
    pub markers: Vec<String>,
    pub environments: Vec<String>,
    pub config_file: Option<String>,
    pub pinned_backend: Option<String>,
    pub detection: Option<Detection>,
}

pub fn run(dispatcher: &Dispatcher, json: bool) -> Result<i32> {
    let info = collect(dispatcher)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_text(&info);
    }

    Ok(0)
}

/// Gather the project summary without printing anything
pub fn collect(dispatcher: &Dispatcher) -> Result<ProjectInfo> {
    let root = dispatcher.project_path();

    let lock_candidates = dispatcher
        .catalog()
        .all()
        .iter()
        .flat_map(|b| b.detection_files.iter().map(String::as_str))
        .filter(|f| f.ends_with(".lock"))
        .chain(FOREIGN_LOCK_FILES.iter().copied());
    let lock_files = present_in(root, lock_candidates);
    let markers = present_in(root, PROJECT_MARKER_FILES.iter().copied());
    let environments = present_in(root, VENV_DIRS.iter().copied());

    let (config_file, pinned_backend) = match load_project_config(root) {
        Ok(Some((path, config))) => (
            Some(path.display().to_string()),
            config.backend().map(str::to_string),
        ),
        Ok(None) => (None, None),
        Err(e) => {
            output::warning(&format!("Ignoring project config: {}", e));
            (find_project_config(root).map(|p| p.display().to_string()), None)
        }
    };

    Ok(ProjectInfo {
        path: root.display().to_string(),
        name: project_name(root),
        has_manifest: root.join(MANIFEST_FILE_NAME).is_file(),
        lock_files,
        markers,
        environments,
        config_file,
        pinned_backend,
        detection: dispatcher.detect_with_evidence(),
    })
}

fn present_in<'a>(root: &Path, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for name in names {
        if root.join(name).exists() && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

fn project_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_text(info: &ProjectInfo) {
    let list = |items: &[String]| {
        if items.is_empty() {
            "none".dimmed().to_string()
        } else {
            items.join(", ")
        }
    };

    output::header(&format!("Project: {}", info.name));
    output::keyval("Path", &info.path);
    output::keyval(
        MANIFEST_FILE_NAME,
        if info.has_manifest { "yes" } else { "no" },
    );
    output::keyval("Lock files", &list(&info.lock_files));
    output::keyval("Markers", &list(&info.markers));
    output::keyval("Environments", &list(&info.environments));

    if let Some(config) = &info.config_file {
        output::keyval("Config", config);
    }
    if let Some(pinned) = &info.pinned_backend {
        output::keyval("Pinned backend", &pinned.cyan().to_string());
    }

    match &info.detection {
        Some(detection) => output::keyval(
            "Detected backend",
            &format!(
                "{} (from {})",
                detection.backend.cyan().bold(),
                detection.evidence
            ),
        ),
        None => output::keyval("Detected backend", &"none".yellow().to_string()),
    }
}
