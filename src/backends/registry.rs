use crate::backends::config::{BackendDescriptor, CommandTemplate, CommandTemplates, Operation};
use crate::error::{Result, UvstartError};
use std::collections::HashSet;

/// Immutable table of every supported package manager.
///
/// Descriptors keep their declaration order, which is also the order
/// detection walks them in.
#[derive(Debug, Clone)]
pub struct BackendCatalog {
    backends: Vec<BackendDescriptor>,
}

impl BackendCatalog {
    /// Catalog of the built-in backends
    pub fn builtin() -> Self {
        Self {
            backends: get_builtin_backends(),
        }
    }

    /// Build a catalog from explicit descriptors, checking that ids are
    /// unique and that no template is empty.
    pub fn from_descriptors(backends: Vec<BackendDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for backend in &backends {
            if backend.id.trim().is_empty() {
                return Err(UvstartError::ConfigError(
                    "Backend id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(backend.id.as_str()) {
                return Err(UvstartError::ConfigError(format!(
                    "Duplicate backend id: '{}'",
                    backend.id
                )));
            }
            for operation in Operation::ALL {
                if backend.template(operation).is_empty() {
                    return Err(UvstartError::ConfigError(format!(
                        "Backend '{}' has an empty '{}' template",
                        backend.id, operation
                    )));
                }
            }
        }

        Ok(Self { backends })
    }

    pub fn get(&self, id: &str) -> Option<&BackendDescriptor> {
        self.backends.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.id.as_str()).collect()
    }

    /// All descriptors, in declaration order
    pub fn all(&self) -> &[BackendDescriptor] {
        &self.backends
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Get built-in backend descriptors
pub fn get_builtin_backends() -> Vec<BackendDescriptor> {
    vec![
        // === PDM Backend ===
        BackendDescriptor {
            id: "pdm".to_string(),
            detection_files: strings(&["pdm.lock"]),
            detection_patterns: vec![],
            install_hint: "curl -sSL https://pdm-project.org/install-pdm.py | python3 -".to_string(),
            templates: CommandTemplates {
                add: CommandTemplate::trailing(&["pdm", "add"]),
                add_dev: CommandTemplate::trailing(&["pdm", "add", "--dev"]),
                remove: CommandTemplate::trailing(&["pdm", "remove"]),
                sync: CommandTemplate::fixed(&["pdm", "sync"]),
                sync_dev: CommandTemplate::fixed(&["pdm", "sync", "--dev"]),
                run: CommandTemplate::trailing(&["pdm", "run"]),
                list: CommandTemplate::fixed(&["pdm", "list"]),
                version: CommandTemplate::fixed(&["pdm", "--version"]),
            },
            cleanup_paths: strings(&["pdm.lock", ".pdm-python", "__pypackages__"]),
        },
        // === uv Backend ===
        // __pypackages__ is listed for uv too; pdm.lock is checked first so
        // a pdm project with a PEP 582 directory still resolves to pdm.
        BackendDescriptor {
            id: "uv".to_string(),
            detection_files: strings(&["uv.lock", "__pypackages__"]),
            detection_patterns: strings(&["[tool.uv]"]),
            install_hint: "curl -LsSf https://astral.sh/uv/install.sh | sh".to_string(),
            templates: CommandTemplates {
                add: CommandTemplate::trailing(&["uv", "add"]),
                add_dev: CommandTemplate::trailing(&["uv", "add", "--group", "dev"]),
                remove: CommandTemplate::trailing(&["uv", "remove"]),
                sync: CommandTemplate::fixed(&["uv", "sync"]),
                sync_dev: CommandTemplate::fixed(&["uv", "sync", "--group", "dev"]),
                run: CommandTemplate::trailing(&["uv", "run"]),
                list: CommandTemplate::fixed(&["uv", "pip", "list"]),
                version: CommandTemplate::fixed(&["uv", "--version"]),
            },
            cleanup_paths: strings(&["uv.lock", "__pypackages__"]),
        },
        // === Poetry Backend ===
        BackendDescriptor {
            id: "poetry".to_string(),
            detection_files: strings(&["poetry.lock"]),
            detection_patterns: strings(&["poetry"]),
            install_hint: "curl -sSL https://install.python-poetry.org | python3 -".to_string(),
            templates: CommandTemplates {
                add: CommandTemplate::trailing(&["poetry", "add"]),
                add_dev: CommandTemplate::trailing(&["poetry", "add", "--group", "dev"]),
                remove: CommandTemplate::trailing(&["poetry", "remove"]),
                sync: CommandTemplate::fixed(&["poetry", "install"]),
                sync_dev: CommandTemplate::fixed(&["poetry", "install", "--with", "dev"]),
                run: CommandTemplate::trailing(&["poetry", "run"]),
                list: CommandTemplate::fixed(&["poetry", "show"]),
                version: CommandTemplate::fixed(&["poetry", "--version"]),
            },
            cleanup_paths: strings(&["poetry.lock", ".venv"]),
        },
        // === Rye Backend ===
        BackendDescriptor {
            id: "rye".to_string(),
            detection_files: strings(&["requirements.lock"]),
            detection_patterns: vec![],
            install_hint: "curl -sSf https://rye-up.com/get | bash".to_string(),
            templates: CommandTemplates {
                add: CommandTemplate::trailing(&["rye", "add"]),
                add_dev: CommandTemplate::trailing(&["rye", "add", "--dev"]),
                remove: CommandTemplate::trailing(&["rye", "remove"]),
                sync: CommandTemplate::fixed(&["rye", "sync"]),
                sync_dev: CommandTemplate::fixed(&["rye", "sync"]), // rye syncs dev deps by default
                run: CommandTemplate::trailing(&["rye", "run"]),
                list: CommandTemplate::fixed(&["rye", "list"]),
                version: CommandTemplate::fixed(&["rye", "--version"]),
            },
            cleanup_paths: strings(&["requirements.lock", ".venv"]),
        },
        // === Hatch Backend ===
        BackendDescriptor {
            id: "hatch".to_string(),
            detection_files: strings(&["hatch.lock"]),
            detection_patterns: strings(&["[tool.hatch"]),
            install_hint: "pipx install hatch".to_string(),
            templates: CommandTemplates {
                add: CommandTemplate::trailing(&["hatch", "add"]),
                add_dev: CommandTemplate::trailing(&["hatch", "add", "--dev"]),
                remove: CommandTemplate::trailing(&["hatch", "remove"]),
                sync: CommandTemplate::fixed(&["hatch", "dep", "sync"]),
                sync_dev: CommandTemplate::fixed(&["hatch", "dep", "sync"]),
                run: CommandTemplate::trailing(&["hatch", "run"]),
                list: CommandTemplate::fixed(&["hatch", "dep", "show"]),
                version: CommandTemplate::fixed(&["hatch", "--version"]),
            },
            cleanup_paths: strings(&[".venv"]),
        },
    ]
}
