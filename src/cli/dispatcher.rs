//! Command dispatcher
//!
//! Routes CLI commands to their handlers and turns operation results into
//! console output and a process exit code. This is the only place core
//! results are printed.

mod normalization;
mod routing;


use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::Settings;
use crate::core::{Dispatcher, OperationResult, Request};
use crate::error::{Result, UvstartError};
use normalization::{HintSource, choose_hint};
use routing::Session;
use std::path::Path;

/// Dispatch the parsed CLI command; returns the process exit code.
pub fn dispatch(args: &Cli, settings: &Settings) -> Result<i32> {
    let Some(command) = &args.command else {
        return Err(UvstartError::InvalidArgument(
            "No command given. Run with --help for usage.".to_string(),
        ));
    };

    let dispatcher = Dispatcher::system(&args.global.path, settings.timeout());
    let session = Session {
        dispatcher: &dispatcher,
        settings,
        dry_run: args.global.dry_run,
    };

    match command {
        Command::Detect => Ok(session.detect()),
        Command::Backends => Ok(session.backends()),

        Command::Add {
            package,
            dev,
            backend,
        } => session.operation(
            Request::Add {
                package: package.clone(),
                dev: *dev,
            },
            backend.as_deref(),
        ),
        Command::Remove { package, backend } => session.operation(
            Request::Remove {
                package: package.clone(),
            },
            backend.as_deref(),
        ),
        Command::Sync { dev, backend } => {
            session.operation(Request::Sync { dev: *dev }, backend.as_deref())
        }
        Command::Run { backend, argv } => {
            if argv.is_empty() {
                return Err(UvstartError::InvalidArgument("Command required".to_string()));
            }
            session.operation(Request::Run { argv: argv.clone() }, backend.as_deref())
        }
        Command::List { backend } => session.operation(Request::List, backend.as_deref()),
        Command::Version { backend } => session.operation(Request::Version, backend.as_deref()),
        Command::Clean { backend } => session.clean(backend.as_deref()),

        Command::InstallCmd { backend } => session.install_cmd(backend),
        Command::CleanFiles { backend } => Ok(session.clean_files(backend)),

        Command::Info { json } => commands::info::run(&dispatcher, *json),
        Command::Doctor => commands::doctor::run(&dispatcher),
        Command::Settings { command } => commands::settings::run(command.as_ref()),
        Command::Completions { shell } => commands::completions::run(*shell),
    }
}

/// Print a result the way the wrapped tool would have: captured stdout to
/// stdout, diagnostics to stderr.
pub(crate) fn report(result: &OperationResult) -> i32 {
    if !result.output.is_empty() {
        print!("{}", with_newline(&result.output));
    }
    // A failing tool that only wrote to stdout has that text as its error too
    if !result.error.is_empty() && result.error != result.output {
        eprint!("{}", with_newline(&result.error));
    }
    result.exit_code
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

/// Effective backend hint for an operation
///
/// An unreadable project config is reported and skipped, so a project with
/// a lock file still dispatches.
pub(crate) fn effective_hint(
    dispatcher: &Dispatcher,
    settings: &Settings,
    flag: Option<&str>,
) -> Option<String> {
    let flag = flag.map(str::trim).filter(|f| !f.is_empty());
    let pinned = match flag {
        Some(_) => None,
        None => pinned_backend(dispatcher.project_path()),
    };

    let default = settings.default_backend();
    // Detection only matters when the settings default could apply
    let detected = flag.is_none()
        && pinned.is_none()
        && default.is_some()
        && dispatcher.detect().is_some();

    let (hint, source) = choose_hint(flag, pinned.as_deref(), default, detected);
    if source != HintSource::Detection {
        crate::ui::verbose(&format!(
            "Backend '{}' taken from {}",
            hint.as_deref().unwrap_or_default(),
            source
        ));
    }

    hint
}

/// Backend pinned by the project config, if it can be read
pub(crate) fn pinned_backend(project: &Path) -> Option<String> {
    match crate::config::load_project_config(project) {
        Ok(config) => config.and_then(|(_, config)| config.backend().map(str::to_string)),
        Err(e) => {
            crate::ui::warning(&format!("Ignoring project config: {}", e));
            None
        }
    }
}
