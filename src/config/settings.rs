//! Settings Module
//!
//! Manages user-wide uvstart settings (color, verbosity, default backend,
//! command timeout), stored as KDL:
//!
//! ```kdl
//! settings {
//!   color "auto"
//!   default_backend "uv"
//!   timeout "600"
//!   verbose "false"
//! }
//! ```

use crate::backends::registry::BackendCatalog;
use crate::constants::SETTINGS_FILE_NAME;
use crate::error::{Result, UvstartError};
use crate::ui::ColorMode;
use crate::utils::paths;
use kdl::{KdlDocument, KdlEntry, KdlNode};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const VALID_KEYS: [&str; 4] = ["color", "verbose", "default_backend", "timeout"];

/// Settings manager
#[derive(Debug)]
pub struct Settings {
    settings_file: PathBuf,
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Load settings from the user config dir, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(paths::settings_file()?)
    }

    pub fn load_from(settings_file: PathBuf) -> Result<Self> {
        let values = if settings_file.exists() {
            parse_settings(&settings_file)?
        } else {
            Self::defaults()
        };

        Ok(Self {
            settings_file,
            values,
        })
    }

    /// Defaults only; used when the settings file can't be read
    pub fn fallback() -> Self {
        Self {
            settings_file: paths::settings_file()
                .unwrap_or_else(|_| PathBuf::from(SETTINGS_FILE_NAME)),
            values: Self::defaults(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.settings_file
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    /// Validate, store and persist a setting
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.validate_key(key)?;
        self.validate_value(key, value)?;

        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Reset a setting to default
    pub fn reset(&mut self, key: &str) -> Result<()> {
        let Some(default) = Self::defaults().remove(key) else {
            return Err(UvstartError::ConfigError(format!("Unknown setting: '{}'", key)));
        };

        self.values.insert(key.to_string(), default);
        self.save()
    }

    /// Get all settings
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn color_mode(&self) -> ColorMode {
        self.get("color")
            .and_then(|v| ColorMode::parse(v))
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.get("verbose").is_some_and(|v| v == "true")
    }

    /// Backend used when a project shows no signals at all
    pub fn default_backend(&self) -> Option<&str> {
        self.get("default_backend")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Command timeout; `None` when unset or zero
    pub fn timeout(&self) -> Option<Duration> {
        self.get("timeout")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Validate setting key
    fn validate_key(&self, key: &str) -> Result<()> {
        if !VALID_KEYS.contains(&key) {
            return Err(UvstartError::ConfigError(format!(
                "Unknown setting: '{}'. Valid settings: {}",
                key,
                VALID_KEYS.join(", ")
            )));
        }

        Ok(())
    }

    /// Validate setting value
    fn validate_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "color" => check_choice(key, value, &["auto", "always", "never"]),
            "verbose" => check_choice(key, value, &["true", "false"]),
            "default_backend" => {
                let catalog = BackendCatalog::builtin();
                if value.is_empty() || catalog.contains(value) {
                    Ok(())
                } else {
                    Err(UvstartError::ConfigError(format!(
                        "Invalid value for '{}': '{}'. Valid: {} (or empty)",
                        key,
                        value,
                        catalog.ids().join(", ")
                    )))
                }
            }
            "timeout" => value.parse::<u64>().map(|_| ()).map_err(|_| {
                UvstartError::ConfigError(format!(
                    "Invalid value for '{}': '{}'. Expected whole seconds (0 disables)",
                    key, value
                ))
            }),
            _ => Ok(()),
        }
    }

    /// Save settings to file
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_file.parent() {
            fs::create_dir_all(parent).map_err(|e| UvstartError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&self.settings_file, render_settings(&self.values)).map_err(|e| {
            UvstartError::IoError {
                path: self.settings_file.clone(),
                source: e,
            }
        })
    }

    /// Get default settings
    fn defaults() -> BTreeMap<String, String> {
        let mut defaults = BTreeMap::new();
        defaults.insert("color".to_string(), "auto".to_string());
        defaults.insert("verbose".to_string(), "false".to_string());
        defaults.insert("default_backend".to_string(), String::new()); // Empty = fail when nothing is detected
        defaults.insert("timeout".to_string(), "0".to_string()); // 0 = wait forever
        defaults
    }
}

fn check_choice(key: &str, value: &str, valid: &[&str]) -> Result<()> {
    if valid.contains(&value) {
        return Ok(());
    }

    Err(UvstartError::ConfigError(format!(
        "Invalid value for '{}': '{}'. Valid: {}",
        key,
        value,
        valid.join(", ")
    )))
}

fn render_settings(values: &BTreeMap<String, String>) -> String {
    let mut content =
        String::from("// uvstart settings\n// Generated by `uvstart settings`\n\nsettings {\n");

    for (key, value) in values {
        let quoted = value.replace('\\', "\\\\").replace('"', "\\\"");
        content.push_str(&format!("  {} \"{}\"\n", key, quoted));
    }

    content.push_str("}\n");
    content
}

/// Parse settings from KDL file, filling gaps with defaults
fn parse_settings(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|e| UvstartError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut values = parse_settings_content(&content).map_err(|e| UvstartError::ParseError {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;

    for (key, default_value) in Settings::defaults() {
        values.entry(key).or_insert(default_value);
    }

    Ok(values)
}

fn parse_settings_content(content: &str) -> Result<BTreeMap<String, String>> {
    let doc: KdlDocument = content.parse()?;
    let mut values = BTreeMap::new();

    for node in doc.nodes() {
        if node.name().value() == "settings" {
            if let Some(children) = node.children() {
                for child in children.nodes() {
                    read_setting(child, &mut values);
                }
            }
        } else {
            // Bare top-level `key "value"` lines are accepted too
            read_setting(node, &mut values);
        }
    }

    Ok(values)
}

fn read_setting(node: &KdlNode, values: &mut BTreeMap<String, String>) {
    let key = node.name().value();
    if !VALID_KEYS.contains(&key) {
        crate::ui::verbose(&format!("Ignoring unknown setting '{}'", key));
        return;
    }

    if let Some(value) = node.entries().first().and_then(entry_string) {
        values.insert(key.to_string(), value);
    }
}

fn entry_string(entry: &KdlEntry) -> Option<String> {
    if let Some(s) = entry.value().as_string() {
        return Some(s.to_string());
    }
    if let Some(b) = entry.value().as_bool() {
        return Some(b.to_string());
    }
    if let Some(n) = entry.value().as_integer() {
        return Some(n.to_string());
    }
    None
}
