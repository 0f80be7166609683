//! Subprocess execution for resolved operations.

use crate::core::types::{CommandOutput, ResolvedOperation};
use crate::error::{Result, UvstartError};
use crate::traits::CommandRunner;
use crate::ui;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

/// Runs commands as real child processes.
///
/// Output is captured, not streamed. With a timeout set, a child that
/// outlives it is killed and reported as `CommandTimedOut`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, operation: &ResolvedOperation) -> Result<CommandOutput> {
        let mut cmd = Command::new(operation.program());
        cmd.args(operation.args());

        ui::verbose(&format!("Running: {}", operation));
        run_command_with_timeout(&mut cmd, &operation.display_line(), self.timeout)
    }
}

/// Execute a command with stdout and stderr captured on reader threads so
/// neither pipe can fill up and stall the child.
///
/// stdin stays attached to ours: `run python` or a tool asking for
/// confirmation must still be usable. On timeout the child is killed and
/// the call returns at once; the readers are abandoned because a
/// grandchild may keep the pipes open long after the child is gone.
pub(crate) fn run_command_with_timeout(
    cmd: &mut Command,
    label: &str,
    timeout: Option<Duration>,
) -> Result<CommandOutput> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| UvstartError::SystemCommandFailed {
            command: label.to_string(),
            reason: e.to_string(),
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| UvstartError::SystemCommandFailed {
            command: label.to_string(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| UvstartError::SystemCommandFailed {
            command: label.to_string(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    let stdout_rx = drain(stdout);
    let stderr_rx = drain(stderr);

    let status = wait_for(&mut child, label, timeout)?;

    let stdout = stdout_rx.recv().unwrap_or_default();
    let stderr = stderr_rx.recv().unwrap_or_default();

    Ok(CommandOutput {
        exit_code: exit_code_of(status),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Read `pipe` to EOF on its own thread; the bytes arrive on the channel.
fn drain<R: Read + Send + 'static>(pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(pipe).read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

fn wait_for(child: &mut Child, label: &str, timeout: Option<Duration>) -> Result<ExitStatus> {
    let wait_failed = |e: std::io::Error| UvstartError::ProcessWaitFailed {
        command: label.to_string(),
        reason: e.to_string(),
    };

    let Some(timeout) = timeout else {
        return child.wait().map_err(wait_failed);
    };

    let start = Instant::now();
    loop {
        match child.try_wait().map_err(wait_failed)? {
            Some(status) => return Ok(status),
            None => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(UvstartError::CommandTimedOut {
                        command: label.to_string(),
                        timeout,
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Exit code of a finished child; signals map to 128 + signal number.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn op(program: &str, args: &[&str]) -> ResolvedOperation {
        ResolvedOperation::new(program, args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn captures_stdout_and_exit_code() {
        let output = SystemRunner::new().run(&op("echo", &["hello world"])).unwrap();
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "hello world\n");
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let output = SystemRunner::new()
            .run(&op("echo", &["$HOME; echo injected"]))
            .unwrap();
        assert_eq!(output.stdout, "$HOME; echo injected\n");
    }

    #[test]
    fn non_zero_exit_is_reported_not_raised() {
        let output = SystemRunner::new()
            .run(&op("sh", &["-c", "echo oops >&2; exit 3"]))
            .unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr, "oops\n");
    }

    #[test]
    fn missing_program_is_a_launch_failure() {
        let err = SystemRunner::new()
            .run(&op("uvstart-definitely-not-a-program", &[]))
            .unwrap_err();
        assert!(matches!(err, UvstartError::SystemCommandFailed { .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn timeout_kills_long_running_commands() {
        let runner = SystemRunner::with_timeout(Some(Duration::from_millis(200)));
        let err = runner.run(&op("sleep", &["5"])).unwrap_err();
        assert!(matches!(err, UvstartError::CommandTimedOut { .. }));
    }

    #[test]
    fn timeout_returns_while_a_grandchild_holds_the_pipes() {
        let runner = SystemRunner::with_timeout(Some(Duration::from_millis(200)));
        let start = Instant::now();

        let err = runner
            .run(&op("sh", &["-c", "sleep 5 & sleep 10"]))
            .unwrap_err();

        assert!(start.elapsed() < Duration::from_secs(3));
        assert!(matches!(err, UvstartError::CommandTimedOut { .. }));
        assert!(err.to_string().ends_with("after 200ms"));
        assert_eq!(err.exit_code(), 124);
    }

    #[test]
    fn fast_commands_finish_under_a_timeout() {
        let runner = SystemRunner::with_timeout(Some(Duration::from_secs(10)));
        let output = runner.run(&op("sh", &["-c", "echo out; echo err >&2"])).unwrap();
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn stdin_is_inherited_from_the_caller() {
        // The child's fd 0 must be the same file as ours, never /dev/null
        let output = SystemRunner::new()
            .run(&op(
                "sh",
                &[
                    "-c",
                    r#"test "$(readlink /proc/$$/fd/0)" = "$(readlink /proc/$PPID/fd/0)""#,
                ],
            ))
            .unwrap();
        assert_eq!(output.exit_code, 0, "stderr: {}", output.stderr);
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let runner = SystemRunner::with_timeout(Some(Duration::ZERO));
        assert!(runner.timeout().is_none());
    }
}
