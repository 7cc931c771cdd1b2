//! Statement parsing implementation
//!
//! This module handles statement blocks and the statement forms: empty and
//! expression statements, `if`/`else`, `while`, `for`, `break`, `return`,
//! `Print`, and nested blocks.
//!
//! # Dangling else
//!
//! The optional `else` is parsed immediately after the then-branch, so an
//! `else` always binds to the nearest unmatched `if`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::grammar::{NonTerminal, GRAMMAR};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tree::ParseNode;

impl Parser {
    /// stmtblock: "{" variabledecl* stmt* "}"
    pub(crate) fn parse_stmtblock(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.expect(TokenKind::LBrace)?];

        while self.at_variabledecl() {
            children.push(self.parse_variabledecl()?);
        }
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            children.push(self.parse_stmt()?);
        }

        children.push(self.expect(TokenKind::RBrace)?);
        Ok(ParseNode::internal(NonTerminal::StmtBlock, children))
    }

    /// True at a declaration head inside a block: a builtin type keyword,
    /// or an identifier that reads as a type (`Shape s`, `Shape[] s`, ...).
    /// An identifier followed by anything else starts an expression
    /// statement.
    fn at_variabledecl(&self) -> bool {
        match self.kind() {
            TokenKind::Int | TokenKind::Double | TokenKind::Bool | TokenKind::String => true,
            TokenKind::Ident => {
                let mut n = 1;
                while self.kind_at(n) == Some(TokenKind::LBracket)
                    && self.kind_at(n + 1) == Some(TokenKind::RBracket)
                {
                    n += 2;
                }
                self.kind_at(n) == Some(TokenKind::Ident)
            }
            _ => false,
        }
    }

    /// stmt: dispatched on the lookahead token; everything that is not a
    /// keyword statement or a block is "(expr)? ;"
    pub(crate) fn parse_stmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let inner = match self.kind() {
            TokenKind::If => self.parse_ifstmt()?,
            TokenKind::While => self.parse_whilestmt()?,
            TokenKind::For => self.parse_forstmt()?,
            TokenKind::Break => self.parse_breakstmt()?,
            TokenKind::Return => self.parse_returnstmt()?,
            TokenKind::Print => self.parse_printstmt()?,
            TokenKind::LBrace => self.parse_stmtblock()?,
            TokenKind::Semicolon => {
                let semi = self.leaf();
                return Ok(ParseNode::internal(NonTerminal::Stmt, vec![semi]));
            }
            kind if GRAMMAR.starts(NonTerminal::Expr, kind) => {
                let expr = self.parse_expr()?;
                let semi = self.expect(TokenKind::Semicolon)?;
                return Ok(ParseNode::internal(NonTerminal::Stmt, vec![expr, semi]));
            }
            _ => return Err(self.unexpected_in(NonTerminal::Stmt, &[])),
        };
        Ok(ParseNode::internal(NonTerminal::Stmt, vec![inner]))
    }

    /// ifstmt: "if" "(" expr ")" stmt ("else" stmt)?
    fn parse_ifstmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'if'
        children.push(self.expect(TokenKind::LParen)?);
        children.push(self.parse_expr()?);
        children.push(self.expect(TokenKind::RParen)?);
        children.push(self.parse_stmt()?);

        if let Some(else_kw) = self.eat(TokenKind::Else) {
            children.push(else_kw);
            children.push(self.parse_stmt()?);
        }

        Ok(ParseNode::internal(NonTerminal::IfStmt, children))
    }

    /// whilestmt: "while" "(" expr ")" stmt
    fn parse_whilestmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'while'
        children.push(self.expect(TokenKind::LParen)?);
        children.push(self.parse_expr()?);
        children.push(self.expect(TokenKind::RParen)?);
        children.push(self.parse_stmt()?);
        Ok(ParseNode::internal(NonTerminal::WhileStmt, children))
    }

    /// forstmt: "for" "(" (expr)? ";" expr ";" (expr)? ")" stmt
    ///
    /// The first and third clauses are optional; the condition is not.
    fn parse_forstmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'for'
        children.push(self.expect(TokenKind::LParen)?);

        if !self.check(TokenKind::Semicolon) {
            if !GRAMMAR.starts(NonTerminal::Expr, self.kind()) {
                return Err(self.unexpected_in(NonTerminal::Expr, &["';'"]));
            }
            children.push(self.parse_expr()?);
        }
        children.push(self.expect(TokenKind::Semicolon)?);

        children.push(self.parse_expr()?);
        children.push(self.expect(TokenKind::Semicolon)?);

        if !self.check(TokenKind::RParen) {
            if !GRAMMAR.starts(NonTerminal::Expr, self.kind()) {
                return Err(self.unexpected_in(NonTerminal::Expr, &["')'"]));
            }
            children.push(self.parse_expr()?);
        }
        children.push(self.expect(TokenKind::RParen)?);

        children.push(self.parse_stmt()?);
        Ok(ParseNode::internal(NonTerminal::ForStmt, children))
    }

    /// returnstmt: "return" (expr)? ";"
    fn parse_returnstmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'return'

        if !self.check(TokenKind::Semicolon) {
            if !GRAMMAR.starts(NonTerminal::Expr, self.kind()) {
                return Err(self.unexpected_in(NonTerminal::Expr, &["';'"]));
            }
            children.push(self.parse_expr()?);
        }
        children.push(self.expect(TokenKind::Semicolon)?);

        Ok(ParseNode::internal(NonTerminal::ReturnStmt, children))
    }

    /// breakstmt: "break" ";"
    fn parse_breakstmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let break_kw = self.leaf();
        let semi = self.expect(TokenKind::Semicolon)?;
        Ok(ParseNode::internal(
            NonTerminal::BreakStmt,
            vec![break_kw, semi],
        ))
    }

    /// printstmt: "Print" "(" expr ("," expr)* ")" ";" with at least one
    /// argument
    fn parse_printstmt(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'Print'
        children.push(self.expect(TokenKind::LParen)?);
        children.push(self.parse_expr()?);

        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma);
            children.push(self.parse_expr()?);
        }

        children.push(self.expect(TokenKind::RParen)?);
        children.push(self.expect(TokenKind::Semicolon)?);
        Ok(ParseNode::internal(NonTerminal::PrintStmt, children))
    }
}
