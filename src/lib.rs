//! # Introduction
//!
//! decafc is a front end for the Decaf programming language: it lexes and
//! parses a source file into a concrete parse tree and renders that tree
//! in a canonical indented form.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Parse tree → Printer
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source: keywords, identifiers,
//!    int/double/string constants, operators; whitespace and comments are
//!    stripped.
//! 2. [`parser`] — recursive descent over the token stream, guided by the
//!    immutable grammar model in [`parser::grammar`]. The output mirrors
//!    the grammar production by production ([`parser::tree`]).
//! 3. [`printer`] — renders the tree one node per line, children indented
//!    two spaces.
//!
//! There is no semantic analysis, optimization, or code generation here;
//! the tree is handed to the caller as-is. Parsing stops at the first
//! error and never returns a partial tree.
//!
//! The grammar model is built once per process and is immutable, so any
//! number of files can be parsed concurrently, each with its own
//! [`Parser`].

pub mod error;
pub mod parser;
pub mod printer;

pub use error::FrontendError;
pub use parser::parse::Parser;
pub use parser::tree::ParseNode;

/// Parse Decaf source text into a concrete parse tree.
pub fn parse_source(source: &str) -> Result<ParseNode, FrontendError> {
    let mut parser = Parser::new(source)?;
    Ok(parser.parse_program()?)
}
