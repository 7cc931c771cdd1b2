// Integration tests for the Decaf parser

use decafc::parser::grammar::NonTerminal;
use decafc::parser::lexer::Lexer;
use decafc::parser::parse::Parser;
use decafc::parser::tree::ParseNode;

fn parse(source: &str) -> ParseNode {
    let mut parser = Parser::new(source).expect("lexing failed");
    parser.parse_program().expect("parsing failed")
}

/// First node with the given label, depth-first.
fn find(node: &ParseNode, label: NonTerminal) -> Option<&ParseNode> {
    if node.label() == Some(label) {
        return Some(node);
    }
    node.children().iter().find_map(|child| find(child, label))
}

/// All nodes with the given label, in depth-first preorder.
fn find_all<'a>(node: &'a ParseNode, label: NonTerminal, out: &mut Vec<&'a ParseNode>) {
    if node.label() == Some(label) {
        out.push(node);
    }
    for child in node.children() {
        find_all(child, label, out);
    }
}

/// Follows single-child wrappers down to the first node with the given
/// label.
fn descend(mut node: &ParseNode, label: NonTerminal) -> &ParseNode {
    loop {
        if node.label() == Some(label) {
            return node;
        }
        assert_eq!(
            node.children().len(),
            1,
            "expected a pass-through chain, found {:?}",
            node.label()
        );
        node = &node.children()[0];
    }
}

#[test]
fn test_leaf_traversal_reproduces_token_stream() {
    let source = r#"
        class Counter extends Base implements Printable, Resettable {
            int count;
            void bump(int by) {
                count = count + by;
            }
        }

        int main() {
            Counter c;
            c = new Counter;
            c.bump(2);
            Print("done", c.count);
            return 0;
        }
    "#;

    let tree = parse(source);
    let tree_tokens = tree.leaf_tokens();

    let lexed = Lexer::new(source).tokenize().expect("lexing failed");
    // everything except the end-of-input sentinel
    let stream = &lexed[..lexed.len() - 1];

    assert_eq!(tree_tokens.len(), stream.len());
    for (from_tree, from_lexer) in tree_tokens.iter().zip(stream) {
        assert_eq!(from_tree.kind, from_lexer.kind);
        assert_eq!(from_tree.lexeme, from_lexer.lexeme);
    }
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "int main() { for (i = 0; i < 10; i = i + 1) Print(i); return 0; }";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn test_multiplication_nests_under_addition() {
    let tree = parse("void main() { x = 1 + 2 * 3; }");

    // the addition is the only expr5 with an operator
    let mut sums = Vec::new();
    find_all(&tree, NonTerminal::Expr5, &mut sums);
    let sum = sums
        .iter()
        .find(|n| n.children().len() == 3)
        .expect("no addition node");

    assert_eq!(sum.children()[1].token().map(|t| t.lexeme.as_str()), Some("+"));

    // its right operand is the multiplication, nested one level down
    let product = &sum.children()[2];
    assert_eq!(product.label(), Some(NonTerminal::Expr6));
    assert_eq!(product.children().len(), 3);
    assert_eq!(
        product.children()[1].token().map(|t| t.lexeme.as_str()),
        Some("*")
    );
}

#[test]
fn test_dangling_else_binds_to_inner_if() {
    let tree = parse("void main() { if (a) if (b) s1(); else s2(); }");

    let mut ifs = Vec::new();
    find_all(&tree, NonTerminal::IfStmt, &mut ifs);
    assert_eq!(ifs.len(), 2);

    // preorder: outer first. The outer if has no else (5 children); the
    // inner one owns it (7 children).
    assert_eq!(ifs[0].children().len(), 5);
    assert_eq!(ifs[1].children().len(), 7);
}

#[test]
fn test_postfix_chain_nests_suffix_by_suffix() {
    let tree = parse("void main() { a.b.c()[0]; }");

    let stmt = find(&tree, NonTerminal::Stmt).expect("no statement");
    let expr8 = descend(&stmt.children()[0], NonTerminal::Expr8);

    // outermost suffix: the index, an lvalue of 4 children
    let index = &expr8.children()[0];
    assert_eq!(index.label(), Some(NonTerminal::LValue));
    assert_eq!(index.children().len(), 4);

    // inside it, the method call
    let call = &index.children()[0].children()[0];
    assert_eq!(call.label(), Some(NonTerminal::Call));
    assert_eq!(call.children().len(), 6);

    // inside the call, the field access a.b
    let field = &call.children()[0].children()[0];
    assert_eq!(field.label(), Some(NonTerminal::LValue));
    assert_eq!(field.children().len(), 3);

    // and at the bottom, the bare identifier a
    let bare = &field.children()[0].children()[0];
    assert_eq!(bare.label(), Some(NonTerminal::LValue));
    assert_eq!(bare.children().len(), 1);
}

#[test]
fn test_empty_actuals_yields_zero_children() {
    let tree = parse("void main() { f(); }");

    let call = find(&tree, NonTerminal::Call).expect("no call");
    assert_eq!(call.children().len(), 4);
    let actuals = &call.children()[2];
    assert_eq!(actuals.label(), Some(NonTerminal::Actuals));
    assert_eq!(actuals.children().len(), 0);
}

#[test]
fn test_single_argument_call_is_distinct_from_empty() {
    let tree = parse("void main() { f(x); }");

    let actuals = find(&tree, NonTerminal::Actuals).expect("no actuals");
    assert_eq!(actuals.children().len(), 1);
}

#[test]
fn test_assignment_is_right_associative() {
    let tree = parse("void main() { a = b = c; }");

    let mut assignments = Vec::new();
    find_all(&tree, NonTerminal::Expr, &mut assignments);
    let with_eq: Vec<_> = assignments
        .iter()
        .filter(|n| n.children().len() == 3)
        .collect();
    assert_eq!(with_eq.len(), 2);

    // the outer assignment's right-hand side is the inner assignment
    let outer = with_eq[0];
    assert_eq!(outer.children()[0].label(), Some(NonTerminal::LValue));
    let rhs = &outer.children()[2];
    assert_eq!(rhs.label(), Some(NonTerminal::Expr));
    assert_eq!(rhs.children().len(), 3);
}

#[test]
fn test_assignment_through_field_and_index() {
    parse("void main() { this.x = 1; }");
    parse("void main() { a[0] = 1; }");
    parse("void main() { a.b[i].c = 1; }");
}

#[test]
fn test_call_result_is_not_an_assignment_target() {
    let mut parser = Parser::new("void main() { f() = 1; }").unwrap();
    let err = parser.parse_program().unwrap_err();
    // rejected at the '=': the statement wants its ';'
    assert!(err.found.contains("'='"));
    assert!(err.expected.iter().any(|e| e == "';'"));
}

#[test]
fn test_unary_chain_is_not_an_assignment_target() {
    let mut parser = Parser::new("void main() { -a = 1; }").unwrap();
    assert!(parser.parse_program().is_err());
}

#[test]
fn test_multi_dimensional_array_type_nests() {
    let tree = parse("int[][] grid;");

    let ty = find(&tree, NonTerminal::Type).expect("no type");
    // type(type(type(int) [ ]) [ ])
    assert_eq!(ty.children().len(), 3);
    let inner = &ty.children()[0];
    assert_eq!(inner.label(), Some(NonTerminal::Type));
    assert_eq!(inner.children().len(), 3);
    let base = &inner.children()[0];
    assert_eq!(base.children().len(), 1);
    assert_eq!(
        base.children()[0].token().map(|t| t.lexeme.as_str()),
        Some("int")
    );
}

#[test]
fn test_block_distinguishes_declarations_from_statements() {
    // Shape s is a declaration, s = t and s[0] = 1 are statements
    let tree = parse(
        r#"
        void main() {
            Shape s;
            Shape[] all;
            s = t;
            all[0] = s;
        }
    "#,
    );

    let block = find(&tree, NonTerminal::StmtBlock).expect("no block");
    let decls = block
        .children()
        .iter()
        .filter(|c| c.label() == Some(NonTerminal::VariableDecl))
        .count();
    let stmts = block
        .children()
        .iter()
        .filter(|c| c.label() == Some(NonTerminal::Stmt))
        .count();
    assert_eq!(decls, 2);
    assert_eq!(stmts, 2);
}

#[test]
fn test_declaration_after_statement_rejected() {
    let mut parser = Parser::new("void main() { x = 1; int y; }").unwrap();
    assert!(parser.parse_program().is_err());
}

#[test]
fn test_for_clauses_optional_condition_mandatory() {
    let tree = parse("void main() { for (; i < 10 ;) work(); }");
    let forstmt = find(&tree, NonTerminal::ForStmt).expect("no for");
    // for ( ; expr ; ) stmt
    assert_eq!(forstmt.children().len(), 7);

    let mut parser = Parser::new("void main() { for (;;) work(); }").unwrap();
    assert!(parser.parse_program().is_err());
}

#[test]
fn test_print_requires_at_least_one_argument() {
    let mut parser = Parser::new("void main() { Print(); }").unwrap();
    assert!(parser.parse_program().is_err());

    let tree = parse(r#"void main() { Print("n = ", n, "."); }"#);
    let print = find(&tree, NonTerminal::PrintStmt).expect("no print");
    // Print ( e , e , e ) ;
    assert_eq!(print.children().len(), 9);
}

#[test]
fn test_return_with_and_without_value() {
    let tree = parse("int f() { return 1; } void g() { return; }");
    let mut returns = Vec::new();
    find_all(&tree, NonTerminal::ReturnStmt, &mut returns);
    assert_eq!(returns[0].children().len(), 3);
    assert_eq!(returns[1].children().len(), 2);
}

#[test]
fn test_class_clauses_are_flattened_in_order() {
    let tree = parse("class A extends B implements C, D { int x; void f() { } }");

    let class = find(&tree, NonTerminal::ClassDecl).expect("no class");
    let lexemes: Vec<_> = class
        .children()
        .iter()
        .take(8)
        .map(|c| match c.token() {
            Some(t) => t.lexeme.clone(),
            None => c.label().map(|l| l.label().to_string()).unwrap_or_default(),
        })
        .collect();
    assert_eq!(
        lexemes,
        vec!["class", "ident", "extends", "ident", "implements", "ident", ",", "ident"]
    );

    let fields = class
        .children()
        .iter()
        .filter(|c| c.label() == Some(NonTerminal::Field))
        .count();
    assert_eq!(fields, 2);
}

#[test]
fn test_interface_holds_prototypes() {
    let tree = parse("interface Printable { void print(); int size(string unit); }");

    let mut prototypes = Vec::new();
    find_all(&tree, NonTerminal::Prototype, &mut prototypes);
    assert_eq!(prototypes.len(), 2);
    // each prototype: head ident ( formals ) ;
    assert_eq!(prototypes[0].children().len(), 6);
    assert_eq!(prototypes[1].children().len(), 6);
}

#[test]
fn test_builtin_primaries() {
    parse("void main() { x = ReadInteger(); s = ReadLine(); }");
    parse("void main() { o = new Shape; a = NewArray(10, int); }");
    parse("void main() { m = NewArray(n, Shape[]); }");
}

#[test]
fn test_constants_carry_their_rules() {
    let tree = parse(r#"void main() { Print(10, 0x1A, 1.5e10, "hi", true, null); }"#);

    assert!(find(&tree, NonTerminal::Integer).is_some());
    assert!(find(&tree, NonTerminal::HexInt).is_some());
    assert!(find(&tree, NonTerminal::DoubleConstant).is_some());
    assert!(find(&tree, NonTerminal::StringConstant).is_some());
    assert!(find(&tree, NonTerminal::BoolConstant).is_some());
    // both integer rules sit under an intconstant
    let mut ints = Vec::new();
    find_all(&tree, NonTerminal::IntConstant, &mut ints);
    assert_eq!(ints.len(), 2);
}

#[test]
fn test_trailing_tokens_rejected() {
    let mut parser = Parser::new("int x; }").unwrap();
    assert!(parser.parse_program().is_err());
}

#[test]
fn test_logical_operators_fold_left() {
    let tree = parse("void main() { x = a || b || c; }");

    let mut ors = Vec::new();
    find_all(&tree, NonTerminal::Expr1, &mut ors);
    let with_op: Vec<_> = ors.iter().filter(|n| n.children().len() == 3).collect();
    assert_eq!(with_op.len(), 2);
    // left-associative: the outer node's left child is the inner operator
    // node, its right child a plain operand
    let outer = with_op[0];
    assert_eq!(outer.children()[0].children().len(), 3);
    assert_eq!(outer.children()[2].label(), Some(NonTerminal::Expr2));
}
