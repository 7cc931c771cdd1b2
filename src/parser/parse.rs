//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including the syntax error type, cursor and expectation
//! helpers, and the `parse_program` entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses recursive descent with one token of lookahead:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level, class, and interface declarations
//! - `statements`: statements and statement blocks
//! - `expressions`: the precedence chain and postfix chaining
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while maintaining access to the shared parser state.
//!
//! Every `parse_*` method consumes the right-hand side of exactly one
//! production and returns the internal node for it, so the resulting tree
//! is concrete: keywords and punctuation stay in as leaves, and the
//! single-child pass-through levels of the expression chain are kept.
//! Parsing is deterministic and stops at the first error; no partial tree
//! is ever returned.

use super::grammar::{NonTerminal, GRAMMAR};
use super::lexer::{LexError, Lexer, Token, TokenKind};
use super::tree::{ParseNode, SourceLocation};
use std::fmt;

/// Syntax error: the first token that cannot extend any valid derivation,
/// together with the set of symbols that could have.
#[derive(Debug)]
pub struct SyntaxError {
    pub expected: Vec<String>,
    pub found: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub(crate) fn new(expected: Vec<String>, found: &Token) -> Self {
        SyntaxError {
            expected,
            found: found.to_string(),
            location: found.location,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: expected ",
            self.location.line, self.location.column
        )?;
        if self.expected.len() == 1 {
            write!(f, "{}", self.expected[0])?;
        } else {
            write!(f, "one of {}", self.expected.join(", "))?;
        }
        write!(f, ", found {}", self.found)
    }
}

impl std::error::Error for SyntaxError {}

/// Recursive descent parser for Decaf
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Lexes `source` up front. Lexical failures surface here; syntax
    /// failures come from the parse methods.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse a whole program: one or more declarations, then end of input.
    pub fn parse_program(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.parse_decl()?];
        while !self.is_at_end() {
            children.push(self.parse_decl()?);
        }
        Ok(ParseNode::internal(NonTerminal::Start, children))
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Terminal category of the lookahead token.
    pub(crate) fn kind(&self) -> TokenKind {
        self.tokens[self.position].kind
    }

    /// Terminal category `n` tokens past the lookahead, if any.
    pub(crate) fn kind_at(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + n).map(|t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    /// Consume the current token into a leaf node. The end-of-input
    /// sentinel is never consumed.
    pub(crate) fn leaf(&mut self) -> ParseNode {
        let token = self.tokens[self.position].clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        ParseNode::Leaf(token)
    }

    /// Consume the current token into a leaf when it has the wanted kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<ParseNode> {
        if self.check(kind) {
            Some(self.leaf())
        } else {
            None
        }
    }

    /// Consume the current token into a leaf, or fail with `kind` as the
    /// expected symbol.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<ParseNode, SyntaxError> {
        if self.check(kind) {
            Ok(self.leaf())
        } else {
            Err(self.unexpected(&[kind.describe()]))
        }
    }

    /// Syntax error at the lookahead token with an explicit expected set.
    pub(crate) fn unexpected(&self, expected: &[&str]) -> SyntaxError {
        SyntaxError::new(
            expected.iter().map(|s| s.to_string()).collect(),
            self.peek(),
        )
    }

    /// Syntax error at the lookahead token whose expected set is
    /// FIRST(`nt`), optionally extended with further symbols.
    pub(crate) fn unexpected_in(&self, nt: NonTerminal, also: &[&str]) -> SyntaxError {
        let mut expected = GRAMMAR.expected_first(nt);
        for extra in also {
            expected.push(extra.to_string());
        }
        expected.sort();
        expected.dedup();
        SyntaxError::new(expected, self.peek())
    }

    /// ident rule: wraps the identifier token in its rule node.
    pub(crate) fn parse_ident(&mut self) -> Result<ParseNode, SyntaxError> {
        let leaf = self.expect(TokenKind::Ident)?;
        Ok(ParseNode::internal(NonTerminal::Ident, vec![leaf]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseNode {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_program().unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_program().unwrap_err()
    }

    #[test]
    fn test_parse_simple_variable() {
        let tree = parse("int x;");

        assert_eq!(tree.label(), Some(NonTerminal::Start));
        assert_eq!(tree.children().len(), 1);
        let decl = &tree.children()[0];
        assert_eq!(decl.label(), Some(NonTerminal::Decl));
        assert_eq!(
            decl.children()[0].label(),
            Some(NonTerminal::VariableDecl)
        );
    }

    #[test]
    fn test_parse_simple_function() {
        let tree = parse("void main() { return; }");

        let decl = &tree.children()[0];
        let func = &decl.children()[0];
        assert_eq!(func.label(), Some(NonTerminal::FunctionDecl));
        // void ident ( formals ) stmtblock
        assert_eq!(func.children().len(), 6);
        assert_eq!(func.children()[3].label(), Some(NonTerminal::Formals));
        assert_eq!(func.children()[5].label(), Some(NonTerminal::StmtBlock));
    }

    #[test]
    fn test_parse_if_statement() {
        parse("void main() { if (x > 0) return 1; else return 0; }");
    }

    #[test]
    fn test_missing_semicolon_reports_end_of_input() {
        let err = parse_err("int x");

        assert_eq!(err.found, "end of input");
        assert!(err.expected.iter().any(|e| e == "';'"));
    }

    #[test]
    fn test_unexpected_token_reports_expected_set() {
        let err = parse_err("int 5;");

        assert!(err.expected.iter().any(|e| e == "identifier"));
        assert!(err.found.contains("int constant 5"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = parse_err("");
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_error_carries_position() {
        let err = parse_err("int x;\nint ;");
        assert_eq!(err.location.line, 2);
        assert_eq!(err.location.column, 5);
    }
}
