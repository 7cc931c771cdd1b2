//! Canonical parse tree rendering
//!
//! Renders a parse tree one node per line: an internal node prints its
//! rule label, a leaf prints its lexeme, and children sit two spaces
//! deeper than their parent. The output is deterministic and lossless with
//! respect to tree shape; original whitespace and comments are gone by
//! this point.

use crate::parser::tree::ParseNode;
use std::fmt::{self, Write};

/// Render the tree into a freshly allocated string.
pub fn render(tree: &ParseNode) -> String {
    let mut out = String::new();
    render_to(&mut out, tree).expect("rendering to a String does not fail");
    out
}

/// Render the tree into any [`fmt::Write`] sink.
pub fn render_to<W: Write>(out: &mut W, tree: &ParseNode) -> fmt::Result {
    render_node(out, tree, 0)
}

fn render_node<W: Write>(out: &mut W, node: &ParseNode, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    match node {
        ParseNode::Leaf(token) => writeln!(out, "{}", token.lexeme)?,
        ParseNode::Internal { label, children } => {
            writeln!(out, "{}", label.label())?;
            for child in children {
                render_node(out, child, depth + 1)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::NonTerminal;
    use crate::parser::lexer::{Token, TokenKind};
    use crate::parser::tree::SourceLocation;

    #[test]
    fn test_render_leaf_prints_lexeme() {
        let leaf = ParseNode::Leaf(Token::new(
            TokenKind::Ident,
            "answer",
            SourceLocation::new(1, 1),
        ));
        assert_eq!(render(&leaf), "answer\n");
    }

    #[test]
    fn test_render_indents_children() {
        let loc = SourceLocation::new(1, 1);
        let tree = ParseNode::internal(
            NonTerminal::Ident,
            vec![ParseNode::Leaf(Token::new(TokenKind::Ident, "x", loc))],
        );
        assert_eq!(render(&tree), "ident\n  x\n");
    }
}
