use super::buffer::strip_ansi;
use super::ping::{self, PingOutcome};
use super::{CancelToken, ExecOutcome, run_cancellable};
use crate::console::output::{LineStyle, OutputLine, lines_of};
use crate::console::host_info::{NetworkReport, SystemSnapshot};
use futures::channel::mpsc;
use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;

pub type TaskId = u64;

/// Work that must not run on the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    Shell { command: String, cwd: PathBuf },
    Ping { host: String },
    NetworkReport,
    SystemMonitor,
}

impl Job {
    pub fn label(&self) -> String {
        match self {
            Job::Shell { command, .. } => command.clone(),
            Job::Ping { host } => format!("ping {host}"),
            Job::NetworkReport => "network report".to_string(),
            Job::SystemMonitor => "system monitor".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum JobOutput {
    Shell(ExecOutcome),
    Ping { host: String, outcome: PingOutcome },
    Network(NetworkReport),
    Monitor(SystemSnapshot),
}

#[derive(Clone, Debug)]
pub struct TaskReport {
    pub id: TaskId,
    pub label: String,
    pub output: JobOutput,
}

impl TaskReport {
    /// Console lines for this report. A monitor snapshot is shown in a panel
    /// instead and prints nothing.
    pub fn lines(&self) -> Vec<OutputLine> {
        match &self.output {
            JobOutput::Shell(outcome) => shell_lines(outcome),
            JobOutput::Ping { host, outcome } => outcome.lines(host),
            JobOutput::Network(report) => report.lines(),
            JobOutput::Monitor(_) => Vec::new(),
        }
    }
}

fn shell_lines(outcome: &ExecOutcome) -> Vec<OutputLine> {
    match outcome {
        ExecOutcome::Completed(result) => {
            let mut lines = lines_of(LineStyle::Plain, &strip_ansi(&result.stdout));
            lines.extend(lines_of(LineStyle::Error, &strip_ansi(&result.stderr)));
            if result.success() {
                lines.push(OutputLine::success("Command finished"));
            } else {
                lines.push(OutputLine::error(format!("Exit code: {}", result.exit_code)));
            }
            lines
        }
        ExecOutcome::TimedOut => vec![OutputLine::error("Command timed out")],
        ExecOutcome::Cancelled => vec![OutputLine::warning("Command cancelled")],
        ExecOutcome::LaunchFailed(message) => vec![OutputLine::error(message.clone())],
    }
}

/// Runs jobs on worker threads and reports each completion on a channel
/// drained by the UI thread.
pub struct TaskRunner {
    next_id: TaskId,
    running: HashMap<TaskId, CancelToken>,
    tx: mpsc::UnboundedSender<TaskReport>,
}

impl TaskRunner {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskReport>) {
        let (tx, rx) = mpsc::unbounded();
        (
            Self {
                next_id: 1,
                running: HashMap::new(),
                tx,
            },
            rx,
        )
    }

    pub fn spawn(&mut self, job: Job) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        let cancel = CancelToken::new();
        self.running.insert(id, cancel.clone());

        let tx = self.tx.clone();
        tracing::debug!(id, job = %job.label(), "task started");
        thread::spawn(move || {
            let label = job.label();
            let output = run_job(job, &cancel);
            if tx.unbounded_send(TaskReport { id, label, output }).is_err() {
                tracing::debug!(id, "task finished after the console closed");
            }
        });
        id
    }

    /// Forgets a task whose report has been handled.
    pub fn finish(&mut self, id: TaskId) {
        self.running.remove(&id);
    }

    /// Asks every running task to stop. Returns how many were signalled.
    pub fn cancel_all(&mut self) -> usize {
        for token in self.running.values() {
            token.cancel();
        }
        self.running.len()
    }

    pub fn running(&self) -> usize {
        self.running.len()
    }
}

fn run_job(job: Job, cancel: &CancelToken) -> JobOutput {
    match job {
        Job::Shell { command, cwd } => JobOutput::Shell(run_cancellable(&command, &cwd, cancel)),
        Job::Ping { host } => {
            let outcome = ping::ping(&host, cancel);
            JobOutput::Ping { host, outcome }
        }
        Job::NetworkReport => JobOutput::Network(NetworkReport::collect()),
        Job::SystemMonitor => JobOutput::Monitor(SystemSnapshot::collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ExecutionResult;
    use futures::StreamExt;
    use futures::executor::block_on;

    #[test]
    fn shell_report_lists_streams_then_status() {
        let report = TaskReport {
            id: 1,
            label: "build".into(),
            output: JobOutput::Shell(ExecOutcome::Completed(ExecutionResult {
                exit_code: 1,
                stdout: "\x1b[32mok\x1b[0m\n".into(),
                stderr: "warn\n".into(),
            })),
        };
        let lines = report.lines();
        assert_eq!(lines[0], OutputLine::plain("ok"));
        assert_eq!(lines[1], OutputLine::error("warn"));
        assert_eq!(lines[2], OutputLine::error("Exit code: 1"));
    }

    #[test]
    fn monitor_report_prints_nothing() {
        let report = TaskReport {
            id: 2,
            label: "system monitor".into(),
            output: JobOutput::Monitor(SystemSnapshot::default()),
        };
        assert!(report.lines().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn reports_arrive_on_the_channel() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut runner, mut rx) = TaskRunner::new();
        let id = runner.spawn(Job::Shell {
            command: "echo hello".into(),
            cwd: tmp.path().to_path_buf(),
        });
        assert_eq!(runner.running(), 1);

        let report = block_on(rx.next()).unwrap();
        assert_eq!(report.id, id);
        assert_eq!(report.label, "echo hello");
        assert_eq!(report.lines()[0], OutputLine::plain("hello"));

        runner.finish(id);
        assert_eq!(runner.running(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn cancel_all_stops_long_jobs() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut runner, mut rx) = TaskRunner::new();
        runner.spawn(Job::Shell {
            command: "exec sleep 5".into(),
            cwd: tmp.path().to_path_buf(),
        });
        assert_eq!(runner.cancel_all(), 1);

        let report = block_on(rx.next()).unwrap();
        assert!(matches!(
            report.output,
            JobOutput::Shell(ExecOutcome::Cancelled)
        ));
    }
}
