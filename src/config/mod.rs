pub mod project;
pub mod settings;

pub use project::{ProjectConfig, find_project_config, load_project_config};
pub use settings::Settings;
