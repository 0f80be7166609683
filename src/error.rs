use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UvstartError {
    #[error("No backend found or specified")]
    NoBackendDetermined,

    #[error("Backend not found: {0}")]
    UnknownBackend(String),

    /// A template that takes no arguments was rendered with some
    #[error("Backend '{backend}' does not accept arguments for '{operation}'")]
    TemplateArity { backend: String, operation: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// The process started but could not be waited on
    #[error("Lost track of '{command}': {reason}")]
    ProcessWaitFailed { command: String, reason: String },

    #[error("Command '{command}' timed out after {timeout:?}")]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("{0}")]
    Other(String),
}

impl UvstartError {
    /// Process exit code used when this error ends a command.
    ///
    /// Follows the shell conventions: 124 for a timeout, 127 when the
    /// program could not be started.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandTimedOut { .. } => 124,
            Self::SystemCommandFailed { .. } => 127,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, UvstartError>;
