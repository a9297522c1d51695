use super::output::{LineStyle, OutputLine, lines_of};
use super::host_info::SystemSnapshot;
use std::path::Path;

/// Read-only information dialogs.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Developer,
    Security,
    Network,
    Bios,
    Optimization,
    Monitor(SystemSnapshot),
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Developer => "Developer tools",
            Panel::Security => "Security tools",
            Panel::Network => "Network tools",
            Panel::Bios => "BIOS / UEFI",
            Panel::Optimization => "System optimization",
            Panel::Monitor(_) => "System monitor",
        }
    }

    pub fn body(&self) -> Vec<String> {
        match self {
            Panel::Developer => text_lines(DEVELOPER),
            Panel::Security => text_lines(SECURITY),
            Panel::Network => text_lines(NETWORK),
            Panel::Bios => bios_lines(),
            Panel::Optimization => text_lines(OPTIMIZATION),
            Panel::Monitor(snapshot) => snapshot.lines(),
        }
    }
}

fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

const DEVELOPER: &str = "\
JSON / XML FORMATTER
  1. Paste JSON or XML into the editor
  2. Press 'Format'

API TESTING
  1. Enter the API URL
  2. Press 'Test'

Tip: any shell command typed in the console runs in the target folder.";

const SECURITY: &str = "\
PASSWORD GENERATOR
  1. Choose the password length
  2. Press 'Generate'

FILE HASH CHECK
  1. Choose a file
  2. Press 'Check hash'

Tip: `firewall` in the console points here.";

const NETWORK: &str = "\
PING A HOST
  Type `ping <host>` in the console, e.g. `ping example.com`

CHECK A PORT
  1. Enter host and port
  2. Press 'Check port'

Tip: `ip` prints host name, local, MAC and public addresses.";

const OPTIMIZATION: &str = "\
SYSTEM CLEANUP
  1. Remove temporary files
  2. Flush the DNS cache
  3. Review startup programs

SPEED UP
  1. Defragment HDDs (never SSDs)
  2. Close memory-hungry background apps
  3. Tune virtual memory

ON WINDOWS
  1. Run 'Disk Cleanup'
  2. Use 'Defragment and Optimize Drives'
  3. Disable services you do not need";

fn bios_lines() -> Vec<String> {
    let mut lines = vec![
        format!("System: {} ({})", std::env::consts::OS, std::env::consts::FAMILY),
        format!("Architecture: {}", std::env::consts::ARCH),
        String::new(),
        "ENTERING BIOS / UEFI".to_string(),
        "=".repeat(50),
        "1. Restart the computer".to_string(),
        "2. While it boots, press F2, F10, F12, Del or Esc".to_string(),
    ];
    if cfg!(windows) {
        lines.extend(text_lines(
            "3. Windows 10/11:\n   Settings > Update & Security > Recovery\n   > Advanced startup > Restart now > UEFI Firmware Settings",
        ));
    } else if cfg!(target_os = "macos") {
        lines.push("3. Intel Macs have no BIOS setup; hold Cmd+R for recovery".to_string());
    } else {
        lines.push("3. Or run `systemctl reboot --firmware-setup`".to_string());
    }
    lines
}

/// Console help, printed by `help` and F1.
pub fn help_lines() -> Vec<OutputLine> {
    lines_of(LineStyle::Output, HELP)
}

const HELP: &str = "\
HELP

FILES AND FOLDERS
  mkdir [name]        create a folder (asks for a name when omitted)
  nb [name]           create a notebook .txt file (alias: notebook)
  open                open the target folder

COMMANDS
  help                show this help
  ip                  show host and network addresses
  ping <host>         ping a host (4 requests, 10 s limit)
  monitor             system monitor
  bios | uefi         BIOS / UEFI information
  optimize            optimization tips
  firewall            firewall pointer
  speedtest | speed   internet speed test
  clear | cls         clear the console
  exit | quit         save settings and quit

  Anything else runs in the system shell inside the target folder.

HOT KEYS
  F1 help        F2 open folder   F3 notebook     F4 folder
  F5 refresh     F6 clear         F7 developer    F8 monitor
  F9 network     F10 security     F11 BIOS        F12 optimization
  Up / Down      command history
  Esc            close dialog or stop running commands";

pub fn welcome_lines(target_dir: &Path) -> Vec<OutputLine> {
    vec![
        OutputLine::output("QUICK CONSOLE"),
        OutputLine::output("=".repeat(60)),
        OutputLine::output("Type `help` or press F1 for the command list."),
        OutputLine::output("Quick actions live in the bottom bar."),
        OutputLine::output(format!("Target folder: {}", target_dir.display())),
        OutputLine::output("=".repeat(60)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::command::keywords;

    #[test]
    fn help_mentions_every_keyword() {
        let help: String = help_lines()
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n");
        for keyword in keywords() {
            assert!(help.contains(keyword), "help is missing `{keyword}`");
        }
    }

    #[test]
    fn static_panels_have_content() {
        for panel in [
            Panel::Developer,
            Panel::Security,
            Panel::Network,
            Panel::Bios,
            Panel::Optimization,
        ] {
            assert!(!panel.title().is_empty());
            assert!(panel.body().len() > 3, "{} is empty", panel.title());
        }
    }
}
