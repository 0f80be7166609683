pub mod common;

pub use common::{
    CONFIG_DIR_ENV, FOREIGN_LOCK_FILES, MANIFEST_FILE_NAME, PROJECT_CONFIG_FILES,
    PROJECT_MARKER_FILES, PROJECT_NAME, PROJECT_ORG, PROJECT_QUALIFIER, SETTINGS_FILE_NAME,
    VENV_DIRS,
};
