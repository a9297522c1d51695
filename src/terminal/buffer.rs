use crate::console::output::OutputLine;

/// Console scrollback. The oldest lines are dropped once `max_scrollback`
/// is reached.
pub struct ConsoleBuffer {
    lines: Vec<OutputLine>,
    max_scrollback: usize,
}

impl ConsoleBuffer {
    pub fn new(max_scrollback: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_scrollback,
        }
    }

    pub fn push_line(&mut self, line: OutputLine) {
        if self.lines.len() >= self.max_scrollback {
            self.lines.remove(0);
        }
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get_lines(&self) -> &[OutputLine] {
        &self.lines
    }
}

/// Removes CSI and OSC escape sequences, e.g. colors from `ls --color`.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\x07' || (prev == '\x1b' && c == '\\') {
                        break;
                    }
                    prev = c;
                }
            }
            Some(_) => {
                chars.next();
            }
            None => {}
        }
    }
    out
}
