//! Crate-level error type for the command surface
//!
//! The three failure kinds are disjoint and terminal: lexing, parsing, and
//! file access. None is retried; the first one aborts the pipeline and is
//! reported to the user with its position where it has one.

use crate::parser::lexer::LexError;
use crate::parser::parse::SyntaxError;
use std::fmt;
use std::io;

/// Any failure the front end can report.
#[derive(Debug)]
pub enum FrontendError {
    Lex(LexError),
    Syntax(SyntaxError),
    Io(io::Error),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Lex(e) => write!(f, "{}", e),
            FrontendError::Syntax(e) => write!(f, "{}", e),
            FrontendError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Lex(e) => Some(e),
            FrontendError::Syntax(e) => Some(e),
            FrontendError::Io(e) => Some(e),
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(err: LexError) -> Self {
        FrontendError::Lex(err)
    }
}

impl From<SyntaxError> for FrontendError {
    fn from(err: SyntaxError) -> Self {
        FrontendError::Syntax(err)
    }
}

impl From<io::Error> for FrontendError {
    fn from(err: io::Error) -> Self {
        FrontendError::Io(err)
    }
}
