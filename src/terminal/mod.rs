use crate::console::error::{ConsoleError, ConsoleResult};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub mod buffer;
pub mod ping;
pub mod task;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// The command interpreter of a platform family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpreter {
    /// `cmd.exe /C`
    Cmd,
    /// `/bin/sh -c`
    Posix,
}

impl Interpreter {
    pub fn native() -> Self {
        if cfg!(windows) {
            Interpreter::Cmd
        } else {
            Interpreter::Posix
        }
    }

    /// Builds `cd <cwd> && <command>` for this interpreter.
    pub fn invocation(self, command: &str, cwd: &Path) -> ConsoleResult<Invocation> {
        let cwd = cwd.to_string_lossy();
        match self {
            Interpreter::Cmd => {
                let cwd = if cwd.chars().any(char::is_whitespace) {
                    format!("\"{cwd}\"")
                } else {
                    cwd.to_string()
                };
                Ok(Invocation {
                    program: "cmd.exe".to_string(),
                    args: vec!["/C".to_string(), format!("cd /d {cwd} && {command}")],
                })
            }
            Interpreter::Posix => {
                let quoted = shlex::try_quote(&cwd).map_err(|err| ConsoleError::Launch {
                    program: "/bin/sh".to_string(),
                    reason: format!("cannot quote working directory: {err}"),
                })?;
                Ok(Invocation {
                    program: "/bin/sh".to_string(),
                    args: vec!["-c".to_string(), format!("cd {quoted} && {command}")],
                })
            }
        }
    }
}

/// A program and its arguments, ready to spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        #[cfg(unix)]
        {
            // Own process group, so stop() also reaches whatever the shell forks.
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        #[cfg(windows)]
        {
            // cmd.exe does its own parsing of the command line, so the
            // script must reach it unescaped.
            use std::os::windows::process::CommandExt;
            if self.program.eq_ignore_ascii_case("cmd.exe") {
                for arg in &self.args {
                    cmd.raw_arg(arg);
                }
                return cmd;
            }
        }
        cmd.args(&self.args);
        cmd
    }
}

/// Captured result of one finished process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    #[cfg(test)]
    fn launch_failure(message: String) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    Completed(ExecutionResult),
    TimedOut,
    Cancelled,
    LaunchFailed(String),
}

/// Shared flag a running job polls to know it should stop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs `command` in `cwd` and waits for it with no time limit. Launch
/// failures come back as exit code `-1` with the reason in `stderr`.
#[cfg(test)]
pub fn run(command: &str, cwd: &Path) -> ExecutionResult {
    match run_cancellable(command, cwd, &CancelToken::new()) {
        ExecOutcome::Completed(result) => result,
        ExecOutcome::LaunchFailed(message) => ExecutionResult::launch_failure(message),
        ExecOutcome::TimedOut | ExecOutcome::Cancelled => {
            ExecutionResult::launch_failure("command was stopped".to_string())
        }
    }
}

/// Runs `command` in `cwd` through the native interpreter until it exits
/// or `cancel` fires.
pub fn run_cancellable(command: &str, cwd: &Path, cancel: &CancelToken) -> ExecOutcome {
    match Interpreter::native().invocation(command, cwd) {
        Ok(invocation) => execute(&invocation, None, cancel),
        Err(err) => ExecOutcome::LaunchFailed(err.to_string()),
    }
}

/// Spawns `invocation`, captures both output streams and waits until it
/// exits, `deadline` elapses or `cancel` fires. The process is killed in
/// the latter two cases and its output discarded.
pub fn execute(
    invocation: &Invocation,
    deadline: Option<Duration>,
    cancel: &CancelToken,
) -> ExecOutcome {
    let mut child = match invocation
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!(program = %invocation.program, "launch failed: {err}");
            return ExecOutcome::LaunchFailed(format!(
                "failed to launch {}: {err}",
                invocation.program
            ));
        }
    };

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let started = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(err) => {
                stop(&mut child);
                return ExecOutcome::LaunchFailed(format!("failed to wait for process: {err}"));
            }
        }
        if cancel.is_cancelled() {
            stop(&mut child);
            tracing::info!(program = %invocation.program, "process cancelled");
            return ExecOutcome::Cancelled;
        }
        if deadline.is_some_and(|limit| started.elapsed() >= limit) {
            stop(&mut child);
            tracing::info!(program = %invocation.program, "process timed out");
            return ExecOutcome::TimedOut;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let result = ExecutionResult {
        exit_code: status.code().unwrap_or(-1),
        stdout: collect(stdout),
        stderr: collect(stderr),
    };
    tracing::debug!(exit_code = result.exit_code, "process finished");
    ExecOutcome::Completed(result)
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Kills the child together with everything it started.
fn stop(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own group; a negative pid signals all of it.
        let pgid = child.id() as libc::pid_t;
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
    #[cfg(windows)]
    {
        let _ = Command::new("taskkill")
            .args(["/T", "/F", "/PID", &child.id().to_string()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_quotes_directories_with_spaces() {
        let inv = Interpreter::Cmd
            .invocation("dir", Path::new(r"C:\Users\me\My Desktop"))
            .unwrap();
        assert_eq!(inv.program, "cmd.exe");
        assert_eq!(inv.args[0], "/C");
        assert_eq!(inv.args[1], r#"cd /d "C:\Users\me\My Desktop" && dir"#);

        let plain = Interpreter::Cmd
            .invocation("dir", Path::new(r"C:\work"))
            .unwrap();
        assert_eq!(plain.args[1], r"cd /d C:\work && dir");
    }

    #[test]
    fn posix_escapes_the_directory() {
        let inv = Interpreter::Posix
            .invocation("ls -la", Path::new("/home/me/it's here"))
            .unwrap();
        assert_eq!(inv.program, "/bin/sh");
        assert_eq!(inv.args[0], "-c");
        assert!(inv.args[1].ends_with(" && ls -la"));
        let quoted = inv.args[1]
            .strip_prefix("cd ")
            .and_then(|rest| rest.strip_suffix(" && ls -la"))
            .unwrap();
        assert_eq!(shlex::split(quoted).unwrap(), ["/home/me/it's here"]);
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_the_target_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("with space");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("marker.txt"), "").unwrap();

        let result = run("ls", &dir);
        assert!(result.success());
        assert!(result.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stderr_and_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run("echo oops >&2; exit 3", tmp.path());
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stderr.trim(), "oops");
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn missing_directory_skips_the_command() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run("echo should-not-run", &tmp.path().join("missing"));
        assert!(!result.success());
        assert!(!result.stdout.contains("should-not-run"));
    }

    #[cfg(unix)]
    #[test]
    fn deadline_kills_slow_processes() {
        let inv = Invocation {
            program: "sleep".to_string(),
            args: vec!["5".to_string()],
        };
        let started = Instant::now();
        let outcome = execute(&inv, Some(Duration::from_millis(100)), &CancelToken::new());
        assert_eq!(outcome, ExecOutcome::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn cancel_stops_a_running_command() {
        let tmp = tempfile::tempdir().unwrap();
        let token = CancelToken::new();
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            remote.cancel();
        });
        let outcome = run_cancellable("exec sleep 5", tmp.path(), &token);
        canceller.join().unwrap();
        assert_eq!(outcome, ExecOutcome::Cancelled);
    }

    #[cfg(unix)]
    #[test]
    fn cancel_reaches_commands_the_shell_forked() {
        let tmp = tempfile::tempdir().unwrap();
        let token = CancelToken::new();
        let remote = token.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            remote.cancel();
        });
        let started = Instant::now();
        let outcome = run_cancellable("(sleep 1; touch marker)", tmp.path(), &token);
        canceller.join().unwrap();
        assert_eq!(outcome, ExecOutcome::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(1));

        thread::sleep(Duration::from_millis(1500));
        assert!(!tmp.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn deadline_reaches_commands_the_shell_forked() {
        let tmp = tempfile::tempdir().unwrap();
        let inv = Interpreter::Posix
            .invocation("(sleep 1; touch marker)", tmp.path())
            .unwrap();
        let outcome = execute(&inv, Some(Duration::from_millis(200)), &CancelToken::new());
        assert_eq!(outcome, ExecOutcome::TimedOut);

        thread::sleep(Duration::from_millis(1500));
        assert!(!tmp.path().join("marker").exists());
    }

    #[test]
    fn unknown_program_is_a_soft_failure() {
        let inv = Invocation {
            program: "definitely-not-a-real-program-4242".to_string(),
            args: Vec::new(),
        };
        match execute(&inv, None, &CancelToken::new()) {
            ExecOutcome::LaunchFailed(message) => {
                assert!(message.contains("definitely-not-a-real-program-4242"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
