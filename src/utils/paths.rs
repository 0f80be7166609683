use crate::constants::{CONFIG_DIR_ENV, PROJECT_NAME, PROJECT_ORG, PROJECT_QUALIFIER, SETTINGS_FILE_NAME};
use crate::error::{Result, UvstartError};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Directory holding user settings. `UVSTART_CONFIG_DIR` wins over the
/// platform default.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let proj = ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORG, PROJECT_NAME)
        .ok_or_else(|| UvstartError::Other("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}
