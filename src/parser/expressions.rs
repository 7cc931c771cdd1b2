//! Expression parsing implementation
//!
//! This module handles the concrete expression chain `expr` → `expr1` →
//! … → `expr8`. Binary operators are parsed by precedence climbing driven
//! by the grammar model's level table; every pass-through level is kept in
//! the tree, so the output mirrors the grammar rather than collapsing to
//! an abstract syntax tree.
//!
//! # Postfix chaining
//!
//! After a primary expression, one suffix loop consumes `.ident` (field
//! access), `.ident(actuals)` (method call), and `[expr]` (indexing). Each
//! suffix commits on a single token of lookahead and wraps the previous
//! `expr8`, so `a.b.c()[0]` nests suffix by suffix instead of flattening.
//!
//! # Assignment
//!
//! `expr : expr1 | lvalue "=" expr`. The chain is parsed first; an `=` may
//! only follow when that chain is nothing but pass-through levels around
//! an lvalue, in which case the wrappers are stripped to recover the
//! assignment target. An `=` after anything else is left for the caller to
//! reject, which reproduces the bottom-up behavior where `=` can only
//! follow a reduced lvalue.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::grammar::{NonTerminal, GRAMMAR};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};
use crate::parser::tree::ParseNode;

impl Parser {
    /// expr: expr1, or lvalue "=" expr (right-associative)
    pub(crate) fn parse_expr(&mut self) -> Result<ParseNode, SyntaxError> {
        let chain = self.parse_binary_level(0)?;

        if self.check(TokenKind::Eq) && is_assignment_target(&chain) {
            let lvalue = unwrap_to_lvalue(chain);
            let eq = self.leaf();
            let rhs = self.parse_expr()?;
            return Ok(ParseNode::internal(
                NonTerminal::Expr,
                vec![lvalue, eq, rhs],
            ));
        }

        Ok(ParseNode::internal(NonTerminal::Expr, vec![chain]))
    }

    /// One left-associative binary level from the grammar model's table;
    /// past the last level sits the unary rule.
    fn parse_binary_level(&mut self, level: usize) -> Result<ParseNode, SyntaxError> {
        let levels = GRAMMAR.binary_levels();
        let entry = match levels.get(level) {
            Some(entry) => entry,
            None => return self.parse_unary(),
        };

        let operand = self.parse_binary_level(level + 1)?;
        let mut node = ParseNode::internal(entry.label, vec![operand]);

        while entry.ops.contains(&self.kind()) {
            let op = self.leaf();
            let rhs = self.parse_binary_level(level + 1)?;
            node = ParseNode::internal(entry.label, vec![node, op, rhs]);
        }

        Ok(node)
    }

    /// expr7: "-"/"!" unary prefix (right-recursive) or expr8
    fn parse_unary(&mut self) -> Result<ParseNode, SyntaxError> {
        if self.check(TokenKind::Minus) || self.check(TokenKind::Bang) {
            let op = self.leaf();
            let operand = self.parse_unary()?;
            return Ok(ParseNode::internal(NonTerminal::Expr7, vec![op, operand]));
        }

        let primary = self.parse_expr8()?;
        Ok(ParseNode::internal(NonTerminal::Expr7, vec![primary]))
    }

    /// expr8 with its postfix suffixes: ".ident" (field access),
    /// ".ident(actuals)" (method call), "[expr]" (indexing)
    fn parse_expr8(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut expr8 = self.parse_primary()?;

        loop {
            match self.kind() {
                TokenKind::Dot => {
                    let dot = self.leaf();
                    let name = self.parse_ident()?;
                    // one token of lookahead commits: '(' makes it a call
                    let wrapped = if self.check(TokenKind::LParen) {
                        let lparen = self.leaf();
                        let actuals = self.parse_actuals()?;
                        let rparen = self.expect(TokenKind::RParen)?;
                        ParseNode::internal(
                            NonTerminal::Call,
                            vec![expr8, dot, name, lparen, actuals, rparen],
                        )
                    } else {
                        ParseNode::internal(NonTerminal::LValue, vec![expr8, dot, name])
                    };
                    expr8 = ParseNode::internal(NonTerminal::Expr8, vec![wrapped]);
                }
                TokenKind::LBracket => {
                    let lbracket = self.leaf();
                    let index = self.parse_expr()?;
                    let rbracket = self.expect(TokenKind::RBracket)?;
                    let lvalue = ParseNode::internal(
                        NonTerminal::LValue,
                        vec![expr8, lbracket, index, rbracket],
                    );
                    expr8 = ParseNode::internal(NonTerminal::Expr8, vec![lvalue]);
                }
                _ => break,
            }
        }

        Ok(expr8)
    }

    /// The primary expr8 forms, before any postfix suffix
    fn parse_primary(&mut self) -> Result<ParseNode, SyntaxError> {
        let children = match self.kind() {
            TokenKind::IntLit => vec![self.parse_constant(NonTerminal::Integer)],
            TokenKind::HexLit => vec![self.parse_constant(NonTerminal::HexInt)],
            TokenKind::DoubleLit => vec![self.parse_constant(NonTerminal::DoubleConstant)],
            TokenKind::StringLit => vec![self.parse_constant(NonTerminal::StringConstant)],
            TokenKind::True | TokenKind::False => {
                vec![self.parse_constant(NonTerminal::BoolConstant)]
            }
            TokenKind::Null => {
                let null = self.leaf();
                vec![ParseNode::internal(NonTerminal::Constant, vec![null])]
            }
            TokenKind::This => vec![self.leaf()],
            TokenKind::ReadInteger | TokenKind::ReadLine => {
                let keyword = self.leaf();
                let lparen = self.expect(TokenKind::LParen)?;
                let rparen = self.expect(TokenKind::RParen)?;
                vec![keyword, lparen, rparen]
            }
            TokenKind::New => {
                let new = self.leaf();
                let name = self.parse_ident()?;
                vec![new, name]
            }
            TokenKind::NewArray => {
                let keyword = self.leaf();
                let lparen = self.expect(TokenKind::LParen)?;
                let length = self.parse_expr()?;
                let comma = self.expect(TokenKind::Comma)?;
                let ty = self.parse_type()?;
                let rparen = self.expect(TokenKind::RParen)?;
                vec![keyword, lparen, length, comma, ty, rparen]
            }
            TokenKind::LParen => {
                let lparen = self.leaf();
                let expr = self.parse_expr()?;
                let rparen = self.expect(TokenKind::RParen)?;
                vec![lparen, expr, rparen]
            }
            TokenKind::Ident => {
                let name = self.parse_ident()?;
                if self.check(TokenKind::LParen) {
                    // call: ident "(" actuals ")"
                    let lparen = self.leaf();
                    let actuals = self.parse_actuals()?;
                    let rparen = self.expect(TokenKind::RParen)?;
                    vec![ParseNode::internal(
                        NonTerminal::Call,
                        vec![name, lparen, actuals, rparen],
                    )]
                } else {
                    vec![ParseNode::internal(NonTerminal::LValue, vec![name])]
                }
            }
            // report FIRST(expr7): the unary operators are still viable
            // alternatives at this point
            _ => return Err(self.unexpected_in(NonTerminal::Expr7, &[])),
        };

        Ok(ParseNode::internal(NonTerminal::Expr8, children))
    }

    /// constant wrapping one literal rule; int literals get the extra
    /// intconstant level the grammar has for them
    fn parse_constant(&mut self, rule: NonTerminal) -> ParseNode {
        let leaf = self.leaf();
        let literal = ParseNode::internal(rule, vec![leaf]);
        let wrapped = match rule {
            NonTerminal::Integer | NonTerminal::HexInt => {
                ParseNode::internal(NonTerminal::IntConstant, vec![literal])
            }
            _ => literal,
        };
        ParseNode::internal(NonTerminal::Constant, vec![wrapped])
    }

    /// actuals: comma-separated expression list, possibly empty. A call
    /// with no arguments gets an actuals node with zero children.
    fn parse_actuals(&mut self) -> Result<ParseNode, SyntaxError> {
        let mut children = Vec::new();

        if !self.check(TokenKind::RParen) {
            children.push(self.parse_expr()?);
            while let Some(comma) = self.eat(TokenKind::Comma) {
                children.push(comma);
                children.push(self.parse_expr()?);
            }
        }

        Ok(ParseNode::internal(NonTerminal::Actuals, children))
    }
}

/// True when the chain is nothing but pass-through levels around an
/// lvalue, the only shape an "=" may follow.
fn is_assignment_target(node: &ParseNode) -> bool {
    match node {
        ParseNode::Internal { label, children } => match label {
            NonTerminal::LValue => true,
            _ if is_chain_level(*label) => {
                children.len() == 1 && is_assignment_target(&children[0])
            }
            _ => false,
        },
        ParseNode::Leaf(_) => false,
    }
}

fn is_chain_level(label: NonTerminal) -> bool {
    matches!(
        label,
        NonTerminal::Expr1
            | NonTerminal::Expr2
            | NonTerminal::Expr3
            | NonTerminal::Expr4
            | NonTerminal::Expr5
            | NonTerminal::Expr6
            | NonTerminal::Expr7
            | NonTerminal::Expr8
    )
}

/// Strips the pass-through wrappers down to the lvalue node. Only called
/// on nodes accepted by [`is_assignment_target`].
fn unwrap_to_lvalue(mut node: ParseNode) -> ParseNode {
    loop {
        match node {
            ParseNode::Internal {
                label: NonTerminal::LValue,
                children,
            } => {
                return ParseNode::Internal {
                    label: NonTerminal::LValue,
                    children,
                };
            }
            ParseNode::Internal { mut children, .. } if children.len() == 1 => {
                node = children.remove(0);
            }
            other => return other,
        }
    }
}
