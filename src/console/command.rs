/// A console input line resolved to the action it triggers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    OpenFolder,
    /// `mkdir [name...]`; `None` opens the interactive name prompt.
    MakeFolder(Option<String>),
    /// `nb|notebook [name...]`; `None` opens the interactive name prompt.
    Notebook(Option<String>),
    NetworkInfo,
    Monitor,
    /// `ping <host>`; `None` means the host was missing.
    Ping(Option<String>),
    Clear,
    Exit,
    Bios,
    Firewall,
    SpeedTest,
    Optimize,
    /// Anything unrecognized, forwarded verbatim to the shell.
    Shell(String),
}

/// Commands that take no arguments. The whole lower-cased line must match.
const EXACT: &[(&str, fn() -> ConsoleCommand)] = &[
    ("help", || ConsoleCommand::Help),
    ("open", || ConsoleCommand::OpenFolder),
    ("mkdir", || ConsoleCommand::MakeFolder(None)),
    ("nb", || ConsoleCommand::Notebook(None)),
    ("notebook", || ConsoleCommand::Notebook(None)),
    ("ip", || ConsoleCommand::NetworkInfo),
    ("monitor", || ConsoleCommand::Monitor),
    ("clear", || ConsoleCommand::Clear),
    ("cls", || ConsoleCommand::Clear),
    ("exit", || ConsoleCommand::Exit),
    ("quit", || ConsoleCommand::Exit),
    ("bios", || ConsoleCommand::Bios),
    ("uefi", || ConsoleCommand::Bios),
    ("firewall", || ConsoleCommand::Firewall),
    ("speedtest", || ConsoleCommand::SpeedTest),
    ("speed", || ConsoleCommand::SpeedTest),
    ("optimize", || ConsoleCommand::Optimize),
];

/// Commands keyed on their first word, taking the rest of the line as argument.
const WITH_ARGS: &[(&str, fn(Option<String>) -> ConsoleCommand)] = &[
    ("ping", ConsoleCommand::Ping),
    ("mkdir", ConsoleCommand::MakeFolder),
    ("nb", ConsoleCommand::Notebook),
    ("notebook", ConsoleCommand::Notebook),
];

impl ConsoleCommand {
    /// Resolves a raw input line. Returns `None` for blank input.
    pub fn resolve(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let lower = line.to_lowercase();
        if let Some((_, build)) = EXACT.iter().find(|(name, _)| *name == lower) {
            return Some(build());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let head = parts[0].to_lowercase();
        if let Some((_, build)) = WITH_ARGS.iter().find(|(name, _)| *name == head) {
            let rest = parts[1..].join(" ");
            let arg = if rest.is_empty() { None } else { Some(rest) };
            return Some(build(arg));
        }

        Some(ConsoleCommand::Shell(line.to_string()))
    }

    /// Whether the command runs through the system interpreter.
    pub fn is_shell(&self) -> bool {
        matches!(self, ConsoleCommand::Shell(_))
    }
}

/// Keywords understood by the console, used for the help screen.
pub fn keywords() -> impl Iterator<Item = &'static str> {
    EXACT
        .iter()
        .map(|(name, _)| *name)
        .chain(WITH_ARGS.iter().map(|(name, _)| *name))
}

#[cfg(test)]
mod tests {
    use super::ConsoleCommand;

    #[test]
    fn blank_lines_resolve_to_nothing() {
        assert_eq!(ConsoleCommand::resolve(""), None);
        assert_eq!(ConsoleCommand::resolve("   \t "), None);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(ConsoleCommand::resolve("HELP"), Some(ConsoleCommand::Help));
        assert_eq!(ConsoleCommand::resolve("  Cls "), Some(ConsoleCommand::Clear));
        assert_eq!(ConsoleCommand::resolve("UEFI"), Some(ConsoleCommand::Bios));
        assert_eq!(ConsoleCommand::resolve("Speed"), Some(ConsoleCommand::SpeedTest));
    }

    #[test]
    fn exact_table_requires_whole_line() {
        assert_eq!(
            ConsoleCommand::resolve("help me"),
            Some(ConsoleCommand::Shell("help me".into()))
        );
        assert_eq!(
            ConsoleCommand::resolve("openssl version"),
            Some(ConsoleCommand::Shell("openssl version".into()))
        );
    }

    #[test]
    fn bare_creation_commands_open_the_prompt() {
        assert_eq!(
            ConsoleCommand::resolve("mkdir"),
            Some(ConsoleCommand::MakeFolder(None))
        );
        assert_eq!(ConsoleCommand::resolve("NB"), Some(ConsoleCommand::Notebook(None)));
        assert_eq!(
            ConsoleCommand::resolve("notebook"),
            Some(ConsoleCommand::Notebook(None))
        );
    }

    #[test]
    fn arguments_keep_their_case_and_are_joined() {
        assert_eq!(
            ConsoleCommand::resolve("MKDIR  My   Projects"),
            Some(ConsoleCommand::MakeFolder(Some("My Projects".into())))
        );
        assert_eq!(
            ConsoleCommand::resolve("nb Shopping List"),
            Some(ConsoleCommand::Notebook(Some("Shopping List".into())))
        );
        assert_eq!(
            ConsoleCommand::resolve("Ping Example.COM"),
            Some(ConsoleCommand::Ping(Some("Example.COM".into())))
        );
    }

    #[test]
    fn bare_ping_has_no_host() {
        assert_eq!(ConsoleCommand::resolve("ping"), Some(ConsoleCommand::Ping(None)));
    }

    #[test]
    fn unknown_input_is_forwarded_verbatim() {
        let command = ConsoleCommand::resolve("  unknownthing --flag ").unwrap();
        assert_eq!(command, ConsoleCommand::Shell("unknownthing --flag".into()));
        assert!(command.is_shell());
    }
}
