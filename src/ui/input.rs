/// Single-line editable text with a character cursor.
#[derive(Clone, Debug, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns the text and leaves the line empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert(&mut self, insert: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, insert);
        self.cursor += insert.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_index(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::InputLine;

    #[test]
    fn edits_around_the_cursor() {
        let mut input = InputLine::new();
        input.insert("pig");
        input.move_left();
        input.insert("n");
        assert_eq!(input.as_str(), "ping");
        assert_eq!(input.split_at_cursor(), ("pin", "g"));

        input.move_home();
        input.delete_forward();
        assert_eq!(input.as_str(), "ing");
        input.backspace();
        assert_eq!(input.as_str(), "ing");

        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "in");
    }

    #[test]
    fn handles_multibyte_text() {
        let mut input = InputLine::new();
        input.set("mkdir Рабочий");
        input.move_left();
        input.backspace();
        assert_eq!(input.as_str(), "mkdir Рабочй");
        assert_eq!(input.split_at_cursor(), ("mkdir Рабоч", "й"));
    }

    #[test]
    fn take_empties_the_line() {
        let mut input = InputLine::new();
        input.set("help");
        assert_eq!(input.take(), "help");
        assert!(input.is_empty());
        assert_eq!(input.split_at_cursor(), ("", ""));
    }
}
