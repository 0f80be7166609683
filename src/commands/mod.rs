pub mod completions;
pub mod doctor;
pub mod info;
pub mod settings;
