use crate::ui::ColorMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "uvstart",
    about = "One CLI for pdm, uv, poetry, rye and hatch",
    long_about = "Unified front-end for Python package managers. uvstart detects which tool a project uses and translates generic commands into that tool's own CLI.",
    version,
    arg_required_else_help = true,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output (resolution decisions, rendered commands)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Print what would run without executing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Project directory
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// When to use colors (overrides the color setting)
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the backend detected for the project
    Detect,

    /// List supported backends
    Backends,

    /// Add a dependency
    Add {
        /// Package to add
        package: String,

        /// Add as a development dependency
        #[arg(short = 'd', long)]
        dev: bool,

        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Remove a dependency
    Remove {
        /// Package to remove
        package: String,

        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Install the project's locked dependencies
    Sync {
        /// Include development dependencies
        #[arg(short = 'd', long)]
        dev: bool,

        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Run a command inside the project environment
    #[command(after_help = "Options for uvstart go before the command: uvstart run --backend pdm pytest -v")]
    Run {
        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,

        /// Command and its arguments, passed through untouched
        #[arg(
            value_name = "COMMAND",
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        argv: Vec<String>,
    },

    /// List installed packages
    List {
        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Show the backend tool's version
    Version {
        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Delete the backend's lock files and environments
    Clean {
        /// Backend to use instead of detection
        #[arg(short = 'b', long)]
        backend: Option<String>,
    },

    /// Print how to install a backend
    InstallCmd {
        /// Backend name
        backend: String,
    },

    /// List the files `clean` removes for a backend
    CleanFiles {
        /// Backend name
        backend: String,
    },

    /// Summarize the project: manifest, lock files, environments, backend
    Info {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check which backend tools are installed
    Doctor,

    /// Show or change user settings
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommand>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show all settings
    Show,

    /// Print one setting
    Get { key: String },

    /// Change a setting
    Set { key: String, value: String },

    /// Restore a setting's default
    Reset { key: String },
}
