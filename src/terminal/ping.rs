use super::{CancelToken, ExecOutcome, Invocation, execute};
use crate::console::output::{LineStyle, OutputLine, lines_of};
use std::time::Duration;

pub const PING_TIMEOUT: Duration = Duration::from_secs(10);
pub const PING_COUNT: u32 = 4;
const SUCCESS_OUTPUT_LIMIT: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PingOutcome {
    Success { output: String },
    Failed { exit_code: i32, stderr: String },
    TimedOut,
    Cancelled,
    LaunchFailed(String),
}

pub fn invocation(host: &str) -> Invocation {
    let count_flag = if cfg!(windows) { "-n" } else { "-c" };
    Invocation {
        program: "ping".to_string(),
        args: vec![
            count_flag.to_string(),
            PING_COUNT.to_string(),
            host.to_string(),
        ],
    }
}

/// Pings `host` with the system utility, bounded by [`PING_TIMEOUT`].
pub fn ping(host: &str, cancel: &CancelToken) -> PingOutcome {
    classify(execute(&invocation(host), Some(PING_TIMEOUT), cancel))
}

pub fn classify(outcome: ExecOutcome) -> PingOutcome {
    match outcome {
        ExecOutcome::Completed(result) if result.success() => PingOutcome::Success {
            output: result.stdout.chars().take(SUCCESS_OUTPUT_LIMIT).collect(),
        },
        ExecOutcome::Completed(result) => PingOutcome::Failed {
            exit_code: result.exit_code,
            stderr: result.stderr,
        },
        ExecOutcome::TimedOut => PingOutcome::TimedOut,
        ExecOutcome::Cancelled => PingOutcome::Cancelled,
        ExecOutcome::LaunchFailed(message) => PingOutcome::LaunchFailed(message),
    }
}

impl PingOutcome {
    pub fn lines(&self, host: &str) -> Vec<OutputLine> {
        match self {
            PingOutcome::Success { output } => {
                let mut lines = vec![OutputLine::success(format!("Ping {host} succeeded"))];
                lines.extend(lines_of(LineStyle::Plain, output));
                lines
            }
            PingOutcome::Failed { exit_code, stderr } if stderr.trim().is_empty() => {
                vec![OutputLine::error(format!(
                    "Ping {host} failed (exit code {exit_code})"
                ))]
            }
            PingOutcome::Failed { stderr, .. } => {
                vec![OutputLine::error(format!("Ping {host} failed: {}", stderr.trim_end()))]
            }
            PingOutcome::TimedOut => vec![OutputLine::error(format!(
                "Ping {host} timed out after {}s",
                PING_TIMEOUT.as_secs()
            ))],
            PingOutcome::Cancelled => vec![OutputLine::warning(format!("Ping {host} cancelled"))],
            PingOutcome::LaunchFailed(message) => vec![OutputLine::error(message.clone())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ExecutionResult;

    fn completed(exit_code: i32, stdout: &str, stderr: &str) -> ExecOutcome {
        ExecOutcome::Completed(ExecutionResult {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn exit_zero_is_success() {
        let outcome = classify(completed(0, "64 bytes from 8.8.8.8", ""));
        assert_eq!(
            outcome,
            PingOutcome::Success {
                output: "64 bytes from 8.8.8.8".into()
            }
        );
    }

    #[test]
    fn non_zero_exit_reports_stderr() {
        let outcome = classify(completed(2, "", "ping: unknown host\n"));
        let lines = outcome.lines("nowhere");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].style, LineStyle::Error);
        assert_eq!(lines[0].text, "Ping nowhere failed: ping: unknown host");
    }

    #[test]
    fn deadline_wins_over_any_exit_code() {
        assert_eq!(classify(ExecOutcome::TimedOut), PingOutcome::TimedOut);
        let lines = PingOutcome::TimedOut.lines("8.8.8.8");
        assert_eq!(lines[0].text, "Ping 8.8.8.8 timed out after 10s");
    }

    #[test]
    fn success_output_is_truncated() {
        let long = "x".repeat(2_000);
        match classify(completed(0, &long, "")) {
            PingOutcome::Success { output } => assert_eq!(output.len(), SUCCESS_OUTPUT_LIMIT),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn sends_four_echo_requests() {
        let inv = invocation("example.com");
        assert_eq!(inv.program, "ping");
        assert_eq!(inv.args[1], "4");
        assert_eq!(inv.args[2], "example.com");
    }
}
