//! Declaration parsing implementation
//!
//! This module handles the declaration layer of the grammar: top-level
//! declarations, class declarations with their extends/implements clauses,
//! interface declarations with method prototypes, and the shared
//! variable/function forms.
//!
//! # Disambiguation
//!
//! A declaration starting with `void` is always a function. Otherwise a
//! type and an identifier are parsed first and the next token decides:
//! `;` closes a variable declaration, `(` opens a function declaration.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::grammar::{NonTerminal, GRAMMAR};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tree::ParseNode;

impl Parser {
    /// decl: variabledecl | functiondecl | classdecl | interfacedecl
    pub(crate) fn parse_decl(&mut self) -> Result<ParseNode, SyntaxError> {
        let inner = match self.kind() {
            TokenKind::Class => self.parse_classdecl()?,
            TokenKind::Interface => self.parse_interfacedecl()?,
            _ => self.parse_variable_or_function_decl(NonTerminal::Decl)?,
        };
        Ok(ParseNode::internal(NonTerminal::Decl, vec![inner]))
    }

    /// variabledecl or functiondecl, the forms shared by top-level
    /// declarations and class fields. `ctx` names the enclosing rule so a
    /// bad first token reports that rule's expected set.
    pub(crate) fn parse_variable_or_function_decl(
        &mut self,
        ctx: NonTerminal,
    ) -> Result<ParseNode, SyntaxError> {
        if self.check(TokenKind::Void) {
            let void = self.leaf();
            let name = self.parse_ident()?;
            return self.parse_function_tail(void, name);
        }

        if !GRAMMAR.starts(NonTerminal::Type, self.kind()) {
            return Err(self.unexpected_in(ctx, &[]));
        }

        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        match self.kind() {
            TokenKind::Semicolon => {
                let variable = ParseNode::internal(NonTerminal::Variable, vec![ty, name]);
                let semi = self.leaf();
                Ok(ParseNode::internal(
                    NonTerminal::VariableDecl,
                    vec![variable, semi],
                ))
            }
            TokenKind::LParen => self.parse_function_tail(ty, name),
            _ => Err(self.unexpected(&["';'", "'('"])),
        }
    }

    /// The rest of a functiondecl after its return type (or `void`) and
    /// name: "(" formals ")" stmtblock
    fn parse_function_tail(
        &mut self,
        head: ParseNode,
        name: ParseNode,
    ) -> Result<ParseNode, SyntaxError> {
        let lparen = self.expect(TokenKind::LParen)?;
        let formals = self.parse_formals()?;
        let rparen = self.expect(TokenKind::RParen)?;
        let body = self.parse_stmtblock()?;
        Ok(ParseNode::internal(
            NonTerminal::FunctionDecl,
            vec![head, name, lparen, formals, rparen, body],
        ))
    }

    /// variabledecl: variable ";"
    pub(crate) fn parse_variabledecl(&mut self) -> Result<ParseNode, SyntaxError> {
        let variable = self.parse_variable()?;
        let semi = self.expect(TokenKind::Semicolon)?;
        Ok(ParseNode::internal(
            NonTerminal::VariableDecl,
            vec![variable, semi],
        ))
    }

    /// variable: type ident
    pub(crate) fn parse_variable(&mut self) -> Result<ParseNode, SyntaxError> {
        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        Ok(ParseNode::internal(NonTerminal::Variable, vec![ty, name]))
    }

    /// type: a builtin type keyword or a class/interface name, then any
    /// number of "[]" suffixes, each nesting the previous type node
    pub(crate) fn parse_type(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut ty = match self.kind() {
            TokenKind::Int | TokenKind::Double | TokenKind::Bool | TokenKind::String => {
                ParseNode::internal(NonTerminal::Type, vec![self.leaf()])
            }
            TokenKind::Ident => {
                let name = self.parse_ident()?;
                ParseNode::internal(NonTerminal::Type, vec![name])
            }
            _ => return Err(self.unexpected_in(NonTerminal::Type, &[])),
        };

        while let Some(lbracket) = self.eat(TokenKind::LBracket) {
            let rbracket = self.expect(TokenKind::RBracket)?;
            ty = ParseNode::internal(NonTerminal::Type, vec![ty, lbracket, rbracket]);
        }

        Ok(ty)
    }

    /// formals: comma-separated variable list, possibly empty. An empty
    /// list still yields a formals node (with no children).
    pub(crate) fn parse_formals(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = Vec::new();

        if !self.check(TokenKind::RParen) {
            if !GRAMMAR.starts(NonTerminal::Variable, self.kind()) {
                return Err(self.unexpected_in(NonTerminal::Variable, &["')'"]));
            }
            children.push(self.parse_variable()?);
            while let Some(comma) = self.eat(TokenKind::Comma) {
                children.push(comma);
                children.push(self.parse_variable()?);
            }
        }

        Ok(ParseNode::internal(NonTerminal::Formals, children))
    }

    /// classdecl: "class" ident ("extends" ident)?
    /// ("implements" ident ("," ident)*)? "{" field* "}"
    fn parse_classdecl(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'class'
        children.push(self.parse_ident()?);

        if let Some(extends) = self.eat(TokenKind::Extends) {
            children.push(extends);
            children.push(self.parse_ident()?);
        }

        if let Some(implements) = self.eat(TokenKind::Implements) {
            children.push(implements);
            children.push(self.parse_ident()?);
            while let Some(comma) = self.eat(TokenKind::Comma) {
                children.push(comma);
                children.push(self.parse_ident()?);
            }
        }

        children.push(self.expect(TokenKind::LBrace)?);
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let member = self.parse_variable_or_function_decl(NonTerminal::Field)?;
            children.push(ParseNode::internal(NonTerminal::Field, vec![member]));
        }
        children.push(self.expect(TokenKind::RBrace)?);

        Ok(ParseNode::internal(NonTerminal::ClassDecl, children))
    }

    /// interfacedecl: "interface" ident "{" prototype* "}"
    fn parse_interfacedecl(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = vec![self.leaf()]; // 'interface'
        children.push(self.parse_ident()?);
        children.push(self.expect(TokenKind::LBrace)?);

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            children.push(self.parse_prototype()?);
        }

        children.push(self.expect(TokenKind::RBrace)?);
        Ok(ParseNode::internal(NonTerminal::InterfaceDecl, children))
    }

    /// prototype: (type | "void") ident "(" formals ")" ";"
    fn parse_prototype(&mut self) -> Result<ParseNode, SyntaxError> {
        let head = if self.check(TokenKind::Void) {
            self.leaf()
        } else if GRAMMAR.starts(NonTerminal::Type, self.kind()) {
            self.parse_type()?
        } else {
            return Err(self.unexpected_in(NonTerminal::Prototype, &[]));
        };

        let name = self.parse_ident()?;
        let lparen = self.expect(TokenKind::LParen)?;
        let formals = self.parse_formals()?;
        let rparen = self.expect(TokenKind::RParen)?;
        let semi = self.expect(TokenKind::Semicolon)?;

        Ok(ParseNode::internal(
            NonTerminal::Prototype,
            vec![head, name, lparen, formals, rparen, semi],
        ))
    }
}
