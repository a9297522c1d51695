/// Submitted command lines with an up/down recall cursor.
///
/// The cursor ranges over `0..=len`, where `len` means "fresh input, nothing
/// recalled". Entries are never removed.
#[derive(Clone, Debug, Default)]
pub struct HistoryBuffer {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `line` unless it repeats the last entry. Always resets the
    /// cursor to the fresh-input position. Returns whether an entry was added.
    pub fn push(&mut self, line: &str) -> bool {
        let added = if self.entries.last().map(|last| last == line).unwrap_or(false) {
            false
        } else {
            self.entries.push(line.to_string());
            true
        };
        self.cursor = self.entries.len();
        added
    }

    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Moves towards fresh input. Stepping onto the fresh position yields
    /// `Some("")` so the caller clears the input line.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries.get(self.cursor).map(String::as_str).unwrap_or(""))
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
