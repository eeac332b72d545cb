//! Shell command execution.

use crate::error::{PreflightError, Result};
use std::io::{IsTerminal, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// How long output readers may keep draining after a timeout kill.
const READER_GRACE: Duration = Duration::from_secs(1);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed after exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a command that was killed on timeout.
    pub fn timeout(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: true,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Let the command read from the terminal (stdin inherited).
    pub interactive: bool,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Timeout in seconds (None = no timeout).
    pub timeout: Option<u64>,
}

impl CommandOptions {
    /// Options for a silent probe: no input, all output captured.
    pub fn probe(timeout: Option<u64>) -> Self {
        Self {
            interactive: false,
            capture_stdout: true,
            capture_stderr: true,
            timeout,
        }
    }

    /// Options for an install command: stdout streams to the terminal,
    /// stderr is kept for error reporting.
    pub fn install(timeout: Option<u64>) -> Self {
        Self {
            interactive: true,
            capture_stdout: false,
            capture_stderr: true,
            timeout,
        }
    }
}

/// Execute a shell command.
///
/// A spawn failure is reported as [`PreflightError::InfrastructureUnavailable`];
/// a command that runs and fails (including "command not found" inside the
/// shell) is an `Ok` result with `success == false`.
///
/// On timeout the shell and everything it started are killed. The one
/// exception is an interactive command attached to a terminal: it has to stay
/// in the terminal's foreground process group (so `sudo` can ask for a
/// password), which means only the shell itself can be killed. Its output is
/// then collected for at most `READER_GRACE` before giving up.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = detect_shell();
    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    cmd.stdin(if options.interactive {
        Stdio::inherit()
    } else {
        Stdio::null()
    });
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let grouped = !(options.interactive && std::io::stdin().is_terminal());
    if grouped {
        own_process_group(&mut cmd);
    }

    tracing::debug!("Executing `{}` via {}", command, shell);

    let mut child = cmd
        .spawn()
        .map_err(|e| PreflightError::InfrastructureUnavailable {
            command: command.to_string(),
            message: format!("failed to spawn {}: {}", shell, e),
        })?;

    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let status = wait_bounded(&mut child, options.timeout, grouped).map_err(|e| {
        PreflightError::InfrastructureUnavailable {
            command: command.to_string(),
            message: format!("failed to wait for process: {}", e),
        }
    })?;

    let grace = status.is_none().then_some(READER_GRACE);
    let stdout = collect_reader(stdout_reader, grace);
    let stderr = collect_reader(stderr_reader, grace);
    let duration = start.elapsed();

    match status {
        None => {
            tracing::warn!(
                "`{}` timed out after {}s and was killed",
                command,
                options.timeout.unwrap_or_default()
            );
            Ok(CommandResult::timeout(stdout, stderr, duration))
        }
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
    }
}

#[cfg(unix)]
fn own_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_cmd: &mut Command) {}

/// Wait for the child, killing it if it outlives `timeout` seconds.
///
/// Returns `None` when the child was killed.
fn wait_bounded(
    child: &mut Child,
    timeout: Option<u64>,
    grouped: bool,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let Some(secs) = timeout else {
        return child.wait().map(Some);
    };

    match child.wait_timeout(Duration::from_secs(secs))? {
        Some(status) => Ok(Some(status)),
        None => {
            if grouped {
                kill_group(child);
            }
            let _ = child.kill();
            let _ = child.wait();
            Ok(None)
        }
    }
}

/// Kill the process group led by `child`.
#[cfg(unix)]
fn kill_group(child: &Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: killpg only sends a signal. The child was spawned as the
    // leader of its own group and has not been reaped yet, so the id
    // cannot refer to an unrelated group.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(
            "killpg({}) failed: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
    });
    rx
}

/// Take a reader's output, waiting at most `grace` when one is given.
fn collect_reader(reader: Option<Receiver<String>>, grace: Option<Duration>) -> String {
    let Some(rx) = reader else {
        return String::new();
    };
    match grace {
        Some(grace) => rx.recv_timeout(grace).unwrap_or_default(),
        None => rx.recv().unwrap_or_default(),
    }
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Get the flag to pass commands to the shell.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}
