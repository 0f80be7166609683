use crate::error::UvstartError;
use serde::Serialize;
use std::fmt;

/// A concrete command ready to hand to a `CommandRunner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOperation {
    program: String,
    args: Vec<String>,
}

impl ResolvedOperation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Shell-quoted rendering, for display only.
    pub fn display_line(&self) -> String {
        let argv = self.argv();
        shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
    }
}

impl fmt::Display for ResolvedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// Raw outcome reported by a command runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Normalized outcome of a dispatcher operation.
///
/// `success` always equals `exit_code == 0`, and a failed result always
/// carries a non-empty `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub output: String,
    pub error: String,
    pub exit_code: i32,
}

impl OperationResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: String::new(),
            exit_code: 0,
        }
    }

    /// Failure that never reached a subprocess
    pub fn failure(error: impl Into<String>) -> Self {
        Self::failed(String::new(), error.into(), 1)
    }

    pub fn from_error(err: &UvstartError) -> Self {
        Self::failed(String::new(), err.to_string(), err.exit_code())
    }

    /// Map a finished process onto a result.
    ///
    /// On failure the captured text doubles as the diagnostic: stderr if
    /// the process wrote any, stdout otherwise.
    pub fn from_output(output: CommandOutput) -> Self {
        let CommandOutput {
            exit_code,
            stdout,
            stderr,
        } = output;

        if exit_code == 0 {
            return Self {
                success: true,
                output: stdout,
                error: stderr,
                exit_code,
            };
        }

        let diagnostic = if !stderr.trim().is_empty() {
            stderr
        } else {
            stdout.clone()
        };
        Self::failed(stdout, diagnostic, exit_code)
    }

    /// Build a failed result with a guaranteed diagnostic and non-zero code.
    pub(crate) fn failed(output: String, error: String, exit_code: i32) -> Self {
        let exit_code = if exit_code == 0 { 1 } else { exit_code };
        let error = if error.trim().is_empty() {
            format!("Command failed with exit code {}", exit_code)
        } else {
            error
        };

        Self {
            success: false,
            output,
            error,
            exit_code,
        }
    }
}
