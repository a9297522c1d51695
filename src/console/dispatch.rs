use super::command::ConsoleCommand;
use super::context::ConsoleContext;
use super::error::ConsoleResult;
use super::files::{self, Created};
use super::history::HistoryBuffer;
use super::output::OutputLine;
use super::panels::{self, Panel};
use crate::terminal::task::Job;
use std::path::Path;

/// What a name prompt is collecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Folder,
    Notebook,
}

impl NameKind {
    pub fn title(self) -> &'static str {
        match self {
            NameKind::Folder => "Create folder",
            NameKind::Notebook => "Create notebook",
        }
    }
}

/// Side effects the dispatcher can request from whoever owns the console.
pub trait ConsoleHost {
    fn print(&mut self, line: OutputLine);
    fn clear(&mut self);
    fn show_panel(&mut self, panel: Panel);
    fn prompt_name(&mut self, kind: NameKind);
    fn open_folder(&mut self, path: &Path) -> ConsoleResult<()>;
    fn spawn(&mut self, job: Job);
    fn quit(&mut self);

    fn print_all(&mut self, lines: Vec<OutputLine>) {
        for line in lines {
            self.print(line);
        }
    }
}

/// Routes input lines to their handlers and keeps the input history.
#[derive(Debug, Default)]
pub struct Dispatcher {
    history: HistoryBuffer,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    pub fn dispatch(&mut self, line: &str, ctx: &mut ConsoleContext, host: &mut impl ConsoleHost) {
        let line = line.trim();
        let Some(command) = ConsoleCommand::resolve(line) else {
            return;
        };
        self.history.push(line);
        host.print(OutputLine::prompt(line));
        tracing::debug!(?command, shell = command.is_shell(), "dispatching");
        execute(command, ctx, host);
    }
}

/// Runs one resolved command. Also used directly by hot keys and quick
/// action buttons, which bypass history.
pub fn execute(command: ConsoleCommand, ctx: &mut ConsoleContext, host: &mut impl ConsoleHost) {
    match command {
        ConsoleCommand::Help => host.print_all(panels::help_lines()),
        ConsoleCommand::OpenFolder => match ctx.ensure_target_dir() {
            Ok(dir) => match host.open_folder(dir) {
                Ok(()) => {
                    host.print(OutputLine::success(format!("Opened folder: {}", dir.display())))
                }
                Err(err) => host.print(OutputLine::error(format!("Cannot open folder: {err}"))),
            },
            Err(err) => host.print(OutputLine::error(format!("Cannot open folder: {err}"))),
        },
        ConsoleCommand::MakeFolder(None) => host.prompt_name(NameKind::Folder),
        ConsoleCommand::MakeFolder(Some(name)) => create(NameKind::Folder, &name, ctx, host),
        ConsoleCommand::Notebook(None) => host.prompt_name(NameKind::Notebook),
        ConsoleCommand::Notebook(Some(name)) => create(NameKind::Notebook, &name, ctx, host),
        ConsoleCommand::NetworkInfo => {
            host.print(OutputLine::network("Collecting network information..."));
            host.spawn(Job::NetworkReport);
        }
        ConsoleCommand::Monitor => {
            host.print(OutputLine::info("Sampling system load..."));
            host.spawn(Job::SystemMonitor);
        }
        ConsoleCommand::Ping(Some(host_name)) => {
            host.print(OutputLine::network(format!("Pinging {host_name}...")));
            host.spawn(Job::Ping { host: host_name });
        }
        ConsoleCommand::Ping(None) => host.print(OutputLine::error("usage: ping <host>")),
        ConsoleCommand::Clear => {
            host.clear();
            host.print(OutputLine::success("Console cleared"));
        }
        ConsoleCommand::Exit => {
            ctx.persist();
            host.quit();
        }
        ConsoleCommand::Bios => host.show_panel(Panel::Bios),
        ConsoleCommand::Optimize => host.show_panel(Panel::Optimization),
        ConsoleCommand::Firewall => host.print(OutputLine::info(
            "Firewall tools live in the Security panel (F10)",
        )),
        ConsoleCommand::SpeedTest => {
            host.print(OutputLine::info("Internet speed test is not available yet"))
        }
        ConsoleCommand::Shell(command) => {
            let cwd = ctx.target_dir().to_path_buf();
            host.print(OutputLine::output(format!("Running in: {}", cwd.display())));
            host.spawn(Job::Shell { command, cwd });
        }
    }
}

/// Creates a folder or notebook in the target directory and reports the
/// outcome as console lines.
pub fn create(kind: NameKind, name: &str, ctx: &mut ConsoleContext, host: &mut impl ConsoleHost) {
    let dir = ctx.target_dir().to_path_buf();
    let result = match kind {
        NameKind::Folder => files::create_folder(&dir, name),
        NameKind::Notebook => files::create_notebook(&dir, name),
    };
    match result {
        Ok(created) => {
            report_created(kind, &created, host);
            ctx.persist();
        }
        Err(err) => {
            let what = match kind {
                NameKind::Folder => "folder",
                NameKind::Notebook => "notebook",
            };
            host.print(OutputLine::error(format!("Cannot create {what}: {err}")));
        }
    }
}

fn report_created(kind: NameKind, created: &Created, host: &mut impl ConsoleHost) {
    let name = created.file_name();
    if let Some(requested) = &created.requested {
        host.print(OutputLine::warning(format!(
            "'{requested}' already exists, creating '{name}'"
        )));
    }
    let what = match kind {
        NameKind::Folder => "Folder",
        NameKind::Notebook => "Notebook",
    };
    host.print(OutputLine::success(format!("{what} '{name}' created")));
    host.print(OutputLine::info(format!("Path: {}", created.path.display())));
}
