pub mod backends;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod system;
pub mod traits;
pub mod ui;
pub mod utils;

use clap::Parser;

/// Run the uvstart CLI; returns the process exit code.
pub fn run_cli() -> i32 {
    // 1. Parse
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return code;
        }
    };

    // 2. Settings (a broken settings file must not block package operations)
    let settings = config::Settings::load().unwrap_or_else(|e| {
        ui::warning(&format!("Ignoring settings: {}", e));
        config::Settings::fallback()
    });

    // 3. Output modes: flags win over settings
    ui::init_colors(args.global.color.unwrap_or_else(|| settings.color_mode()));
    ui::set_verbose(args.global.verbose || settings.verbose());
    ui::set_quiet(args.global.quiet);

    // 4. Run
    match cli::dispatcher::dispatch(&args, &settings) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&e.to_string());
            e.exit_code()
        }
    }
}
