//! Per-project configuration
//!
//! An optional `uvstart.yaml` / `uvstart.toml` / `uvstart.json` (or
//! dot-prefixed variant) in the project root. Settings may sit at the top
//! level or under a `uvstart` key:
//!
//! ```yaml
//! uvstart:
//!   name: my-project
//!   backend: poetry
//! ```
//!
//! Only `backend` affects dispatch: it pins the backend for the project
//! the same way `--backend` does.

use crate::constants::PROJECT_CONFIG_FILES;
use crate::error::{Result, UvstartError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(deserialize_with = "scalar_string")]
    pub backend: String,
    #[serde(deserialize_with = "scalar_string")]
    pub python_version: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl ProjectConfig {
    /// Pinned backend, if one is set
    pub fn backend(&self) -> Option<&str> {
        Some(self.backend.trim()).filter(|b| !b.is_empty())
    }
}

/// Accept any scalar where text is expected: `python_version: 3.12` and
/// `"version": 1` are as common as their quoted forms.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Nested { uvstart: ProjectConfig },
    Flat(ProjectConfig),
}

impl From<ConfigDocument> for ProjectConfig {
    fn from(doc: ConfigDocument) -> Self {
        match doc {
            ConfigDocument::Nested { uvstart } => uvstart,
            ConfigDocument::Flat(config) => config,
        }
    }
}

/// First project config file present in `project`
pub fn find_project_config(project: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_FILES
        .iter()
        .map(|name| project.join(name))
        .find(|path| path.is_file())
}

/// Load the project config, if the project has one
pub fn load_project_config(project: &Path) -> Result<Option<(PathBuf, ProjectConfig)>> {
    let Some(path) = find_project_config(project) else {
        return Ok(None);
    };

    let content = fs::read_to_string(&path).map_err(|e| UvstartError::IoError {
        path: path.clone(),
        source: e,
    })?;
    let config = parse_project_config(&path, &content)?;

    Ok(Some((path, config)))
}

pub fn parse_project_config(path: &Path, content: &str) -> Result<ProjectConfig> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }

    let parse_error = |message: String| UvstartError::ParseError {
        file: path.display().to_string(),
        message,
    };

    let doc: ConfigDocument = match extension.as_str() {
        "json" => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        "toml" => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        other => {
            return Err(UvstartError::ConfigError(format!(
                "Unsupported config format: .{}",
                other
            )));
        }
    };

    Ok(doc.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_json() {
        let config = parse_project_config(
            Path::new("uvstart.json"),
            r#"{"name": "demo", "backend": "pdm", "dependencies": ["requests"]}"#,
        )
        .unwrap();

        assert_eq!(config.name, "demo");
        assert_eq!(config.backend(), Some("pdm"));
        assert_eq!(config.dependencies, vec!["requests"]);
    }

    #[test]
    fn parses_nested_yaml() {
        let content = "uvstart:\n  name: demo\n  backend: poetry\n  python_version: \"3.12\"\n";
        let config = parse_project_config(Path::new(".uvstart.yml"), content).unwrap();

        assert_eq!(config.backend(), Some("poetry"));
        assert_eq!(config.python_version, "3.12");
    }

    #[test]
    fn numeric_versions_are_accepted() {
        let content = "name: demo\nbackend: uv\nversion: 1\npython_version: 3.12\n";
        let config = parse_project_config(Path::new("uvstart.yaml"), content).unwrap();
        assert_eq!(config.backend(), Some("uv"));
        assert_eq!(config.version, "1");
        assert_eq!(config.python_version, "3.12");

        let config = parse_project_config(
            Path::new("uvstart.json"),
            r#"{"version": 1, "python_version": 3.11, "backend": "pdm"}"#,
        )
        .unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.python_version, "3.11");
        assert_eq!(config.backend(), Some("pdm"));
    }

    #[test]
    fn null_values_are_empty() {
        let config =
            parse_project_config(Path::new("uvstart.yml"), "backend: ~\nname: demo\n").unwrap();
        assert_eq!(config.backend(), None);
        assert_eq!(config.name, "demo");
    }

    #[test]
    fn parses_nested_toml() {
        let content = "[uvstart]\nname = \"demo\"\nbackend = \"rye\"\npython_version = \"3.12\"\n";
        let config = parse_project_config(Path::new("uvstart.toml"), content).unwrap();
        assert_eq!(config.backend(), Some("rye"));
        assert_eq!(config.python_version, "3.12");
    }

    #[test]
    fn blank_backend_is_not_a_pin() {
        let config =
            parse_project_config(Path::new("uvstart.json"), r#"{"backend": "  "}"#).unwrap();
        assert_eq!(config.backend(), None);
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_project_config(Path::new("uvstart.yaml"), "\n").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = parse_project_config(Path::new("uvstart.json"), "{ backend: ").unwrap_err();
        assert!(err.to_string().contains("uvstart.json"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(parse_project_config(Path::new("uvstart.ini"), "backend=uv").is_err());
    }

    #[test]
    fn yaml_and_toml_are_looked_up_before_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("uvstart.json"), r#"{"backend": "pdm"}"#).unwrap();
        fs::write(dir.path().join("uvstart.toml"), "backend = \"poetry\"\n").unwrap();

        let (path, config) = load_project_config(dir.path()).unwrap().unwrap();
        assert!(path.ends_with("uvstart.toml"));
        assert_eq!(config.backend(), Some("poetry"));
    }

    #[test]
    fn lookup_follows_declared_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".uvstart.json"), r#"{"backend": "rye"}"#).unwrap();
        fs::write(dir.path().join("uvstart.yaml"), "backend: hatch\n").unwrap();

        let (path, config) = load_project_config(dir.path()).unwrap().unwrap();
        assert!(path.ends_with("uvstart.yaml"));
        assert_eq!(config.backend(), Some("hatch"));
    }

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_project_config(dir.path()).unwrap().is_none());
    }
}
