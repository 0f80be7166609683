//! Settings command
//!
//! Show and change user settings in `settings.kdl`.

use crate::cli::SettingsCommand;
use crate::config::Settings;
use crate::error::{Result, UvstartError};
use crate::ui as output;

pub fn run(command: Option<&SettingsCommand>) -> Result<i32> {
    let mut settings = Settings::load()?;
    execute(&mut settings, command.unwrap_or(&SettingsCommand::Show))?;
    Ok(0)
}

pub(crate) fn execute(settings: &mut Settings, command: &SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => show_all_settings(settings),
        SettingsCommand::Get { key } => match settings.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(UvstartError::ConfigError(format!(
                    "Setting '{}' not found",
                    key
                )));
            }
        },
        SettingsCommand::Set { key, value } => {
            settings.set(key, value)?;
            output::success(&format!("Set {} = {}", key, value));
        }
        SettingsCommand::Reset { key } => {
            settings.reset(key)?;
            output::success(&format!("Reset {} to default", key));
        }
    }

    Ok(())
}

fn show_all_settings(settings: &Settings) {
    output::header("Current Settings");

    for (key, value) in settings.all() {
        if value.is_empty() {
            println!("  {}: (unset)", key);
        } else {
            println!("  {}: {}", key, value);
        }
    }

    println!();
    output::keyval("File", &settings.path().display().to_string());
    output::info("Valid values:");
    println!("  color:           auto, always, never");
    println!("  verbose:         true, false");
    println!("  default_backend: pdm, uv, poetry, rye, hatch (or empty)");
    println!("  timeout:         seconds, 0 waits forever");
}
