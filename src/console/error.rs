use std::io;
use thiserror::Error;

/// Errors raised by console actions. None of them is fatal: the dispatcher
/// turns each one into a single error line.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    #[error("invalid {kind} name: {name}")]
    InvalidName { kind: &'static str, name: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to launch {program}: {reason}")]
    Launch { program: String, reason: String },
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
