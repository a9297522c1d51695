/// How a console line is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Prompt,
    Info,
    Success,
    Warning,
    Error,
    Network,
    Output,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub style: LineStyle,
}

impl OutputLine {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Plain, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Error, text)
    }

    pub fn network(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Network, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(LineStyle::Output, text)
    }

    /// The echo of a submitted command.
    pub fn prompt(command: &str) -> Self {
        let symbol = if cfg!(windows) { ">" } else { "$" };
        Self::new(LineStyle::Prompt, format!("[{symbol}] {command}"))
    }
}

/// Splits a block of text into lines of one style.
pub fn lines_of(style: LineStyle, text: &str) -> Vec<OutputLine> {
    text.lines().map(|line| OutputLine::new(style, line)).collect()
}
