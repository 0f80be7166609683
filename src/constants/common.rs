// Common constants used throughout the codebase

/// Project name
pub const PROJECT_NAME: &str = "uvstart";

/// Project organization (reverse domain notation)
pub const PROJECT_QUALIFIER: &str = "io";
pub const PROJECT_ORG: &str = "uvstart";

/// Python project manifest, searched for backend markers
pub const MANIFEST_FILE_NAME: &str = "pyproject.toml";

/// User settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.kdl";

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "UVSTART_CONFIG_DIR";

/// Project config files, in lookup order
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    "uvstart.yaml",
    "uvstart.yml",
    "uvstart.toml",
    "uvstart.json",
    ".uvstart.yaml",
    ".uvstart.yml",
    ".uvstart.toml",
    ".uvstart.json",
];

/// Files reported by `info` besides the backends' own detection files
pub const PROJECT_MARKER_FILES: &[&str] = &["requirements.txt", "setup.py", ".git"];

/// Virtual environment locations reported by `info`
pub const VENV_DIRS: &[&str] = &[".venv", "venv", "__pypackages__"];

/// Lock files of tools outside the catalog, reported by `info`
pub const FOREIGN_LOCK_FILES: &[&str] = &["Pipfile.lock"];
