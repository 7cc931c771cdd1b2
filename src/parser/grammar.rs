//! Declarative model of the Decaf grammar
//!
//! The grammar is fixed data: the nonterminals, the production set, the
//! binary-operator precedence levels, and the keyword table all live here,
//! and [`GRAMMAR`] exposes them as a process-wide immutable value built
//! once on first use. The parser consults this model for tree labels,
//! operator levels, and token start sets instead of hard-coding them at
//! each call site; the lexer uses it to classify keywords ahead of
//! identifiers.
//!
//! FIRST sets are computed from the production table by the usual
//! fixed-point construction over nullability, so the expected-symbol sets
//! reported in syntax errors always agree with the productions.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use super::lexer::TokenKind;

/// Grammar rules, one variant per nonterminal.
///
/// The variants after [`NonTerminal::Ident`] are list/option helpers
/// introduced when lowering the grammar's repetition and option groups to
/// plain productions. Their matches are flattened into the enclosing node,
/// so they never appear as tree labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Start,
    Decl,
    VariableDecl,
    Variable,
    Type,
    FunctionDecl,
    Formals,
    ClassDecl,
    Field,
    InterfaceDecl,
    Prototype,
    StmtBlock,
    Stmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    ReturnStmt,
    BreakStmt,
    PrintStmt,
    Expr,
    Expr1,
    Expr2,
    Expr3,
    Expr4,
    Expr5,
    Expr6,
    Expr7,
    Expr8,
    LValue,
    Call,
    Actuals,
    Constant,
    BoolConstant,
    IntConstant,
    Integer,
    HexInt,
    StringConstant,
    DoubleConstant,
    Ident,
    // Lowering helpers
    FormalsList,
    ExprList,
    IdentList,
    ExtendsOpt,
    ImplementsOpt,
    ExprOpt,
    FieldSeq,
    PrototypeSeq,
    VarDeclSeq,
    StmtSeq,
}

impl NonTerminal {
    /// Rule name as it appears in rendered trees.
    pub fn label(self) -> &'static str {
        match self {
            NonTerminal::Start => "start",
            NonTerminal::Decl => "decl",
            NonTerminal::VariableDecl => "variabledecl",
            NonTerminal::Variable => "variable",
            NonTerminal::Type => "type",
            NonTerminal::FunctionDecl => "functiondecl",
            NonTerminal::Formals => "formals",
            NonTerminal::ClassDecl => "classdecl",
            NonTerminal::Field => "field",
            NonTerminal::InterfaceDecl => "interfacedecl",
            NonTerminal::Prototype => "prototype",
            NonTerminal::StmtBlock => "stmtblock",
            NonTerminal::Stmt => "stmt",
            NonTerminal::IfStmt => "ifstmt",
            NonTerminal::WhileStmt => "whilestmt",
            NonTerminal::ForStmt => "forstmt",
            NonTerminal::ReturnStmt => "returnstmt",
            NonTerminal::BreakStmt => "breakstmt",
            NonTerminal::PrintStmt => "printstmt",
            NonTerminal::Expr => "expr",
            NonTerminal::Expr1 => "expr1",
            NonTerminal::Expr2 => "expr2",
            NonTerminal::Expr3 => "expr3",
            NonTerminal::Expr4 => "expr4",
            NonTerminal::Expr5 => "expr5",
            NonTerminal::Expr6 => "expr6",
            NonTerminal::Expr7 => "expr7",
            NonTerminal::Expr8 => "expr8",
            NonTerminal::LValue => "lvalue",
            NonTerminal::Call => "call",
            NonTerminal::Actuals => "actuals",
            NonTerminal::Constant => "constant",
            NonTerminal::BoolConstant => "boolconstant",
            NonTerminal::IntConstant => "intconstant",
            NonTerminal::Integer => "integer",
            NonTerminal::HexInt => "hexint",
            NonTerminal::StringConstant => "stringconstant",
            NonTerminal::DoubleConstant => "doubleconstant",
            NonTerminal::Ident => "ident",
            NonTerminal::FormalsList => "__formals_list",
            NonTerminal::ExprList => "__expr_list",
            NonTerminal::IdentList => "__ident_list",
            NonTerminal::ExtendsOpt => "__extends_opt",
            NonTerminal::ImplementsOpt => "__implements_opt",
            NonTerminal::ExprOpt => "__expr_opt",
            NonTerminal::FieldSeq => "__field_seq",
            NonTerminal::PrototypeSeq => "__prototype_seq",
            NonTerminal::VarDeclSeq => "__vardecl_seq",
            NonTerminal::StmtSeq => "__stmt_seq",
        }
    }
}

/// A grammar symbol: either a terminal (token category) or a nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarSymbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

/// One rewrite rule: nonterminal → ordered symbol sequence.
#[derive(Debug, Clone, Copy)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [GrammarSymbol],
}

/// One left-associative binary level of the expression chain, lowest to
/// highest binding. The expression parser folds each level over its
/// operand sub-level in table order.
#[derive(Debug, Clone, Copy)]
pub struct BinaryLevel {
    pub label: NonTerminal,
    pub ops: &'static [TokenKind],
}

use self::GrammarSymbol::{NonTerminal as Nt, Terminal as Tk};
use self::NonTerminal as N;
use super::lexer::TokenKind as K;

/// Binary levels of the expression chain, lowest binding first.
/// Assignment (right-associative) and unary prefix sit outside this table.
pub static BINARY_LEVELS: &[BinaryLevel] = &[
    BinaryLevel { label: N::Expr1, ops: &[K::OrOr] },
    BinaryLevel { label: N::Expr2, ops: &[K::AndAnd] },
    BinaryLevel { label: N::Expr3, ops: &[K::EqEq, K::NotEq] },
    BinaryLevel { label: N::Expr4, ops: &[K::Lt, K::Le, K::Gt, K::Ge] },
    BinaryLevel { label: N::Expr5, ops: &[K::Plus, K::Minus] },
    BinaryLevel { label: N::Expr6, ops: &[K::Star, K::Slash, K::Percent] },
];

/// Keyword lexemes, classified ahead of generic identifiers.
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("int", K::Int),
    ("double", K::Double),
    ("bool", K::Bool),
    ("string", K::String),
    ("void", K::Void),
    ("class", K::Class),
    ("extends", K::Extends),
    ("implements", K::Implements),
    ("interface", K::Interface),
    ("if", K::If),
    ("else", K::Else),
    ("while", K::While),
    ("for", K::For),
    ("break", K::Break),
    ("return", K::Return),
    ("Print", K::Print),
    ("ReadInteger", K::ReadInteger),
    ("ReadLine", K::ReadLine),
    ("new", K::New),
    ("NewArray", K::NewArray),
    ("this", K::This),
    ("null", K::Null),
    ("true", K::True),
    ("false", K::False),
];

/// The full production set, with repetition and option groups lowered to
/// plain BNF through the helper nonterminals.
pub static PRODUCTIONS: &[Production] = &[
    // start : decl+
    Production { lhs: N::Start, rhs: &[Nt(N::Decl)] },
    Production { lhs: N::Start, rhs: &[Nt(N::Start), Nt(N::Decl)] },
    // decl
    Production { lhs: N::Decl, rhs: &[Nt(N::VariableDecl)] },
    Production { lhs: N::Decl, rhs: &[Nt(N::FunctionDecl)] },
    Production { lhs: N::Decl, rhs: &[Nt(N::ClassDecl)] },
    Production { lhs: N::Decl, rhs: &[Nt(N::InterfaceDecl)] },
    // variabledecl : variable ";"
    Production { lhs: N::VariableDecl, rhs: &[Nt(N::Variable), Tk(K::Semicolon)] },
    // variable : type ident
    Production { lhs: N::Variable, rhs: &[Nt(N::Type), Nt(N::Ident)] },
    // type
    Production { lhs: N::Type, rhs: &[Tk(K::Int)] },
    Production { lhs: N::Type, rhs: &[Tk(K::Double)] },
    Production { lhs: N::Type, rhs: &[Tk(K::Bool)] },
    Production { lhs: N::Type, rhs: &[Tk(K::String)] },
    Production { lhs: N::Type, rhs: &[Nt(N::Ident)] },
    Production { lhs: N::Type, rhs: &[Nt(N::Type), Tk(K::LBracket), Tk(K::RBracket)] },
    // functiondecl
    Production {
        lhs: N::FunctionDecl,
        rhs: &[
            Nt(N::Type),
            Nt(N::Ident),
            Tk(K::LParen),
            Nt(N::Formals),
            Tk(K::RParen),
            Nt(N::StmtBlock),
        ],
    },
    Production {
        lhs: N::FunctionDecl,
        rhs: &[
            Tk(K::Void),
            Nt(N::Ident),
            Tk(K::LParen),
            Nt(N::Formals),
            Tk(K::RParen),
            Nt(N::StmtBlock),
        ],
    },
    // formals : (variable ("," variable)*)?
    Production { lhs: N::Formals, rhs: &[] },
    Production { lhs: N::Formals, rhs: &[Nt(N::FormalsList)] },
    Production { lhs: N::FormalsList, rhs: &[Nt(N::Variable)] },
    Production { lhs: N::FormalsList, rhs: &[Nt(N::FormalsList), Tk(K::Comma), Nt(N::Variable)] },
    // classdecl : "class" ident ("extends" ident)?
    //             ("implements" ident ("," ident)*)? "{" field* "}"
    Production {
        lhs: N::ClassDecl,
        rhs: &[
            Tk(K::Class),
            Nt(N::Ident),
            Nt(N::ExtendsOpt),
            Nt(N::ImplementsOpt),
            Tk(K::LBrace),
            Nt(N::FieldSeq),
            Tk(K::RBrace),
        ],
    },
    Production { lhs: N::ExtendsOpt, rhs: &[] },
    Production { lhs: N::ExtendsOpt, rhs: &[Tk(K::Extends), Nt(N::Ident)] },
    Production { lhs: N::ImplementsOpt, rhs: &[] },
    Production { lhs: N::ImplementsOpt, rhs: &[Tk(K::Implements), Nt(N::IdentList)] },
    Production { lhs: N::IdentList, rhs: &[Nt(N::Ident)] },
    Production { lhs: N::IdentList, rhs: &[Nt(N::IdentList), Tk(K::Comma), Nt(N::Ident)] },
    Production { lhs: N::FieldSeq, rhs: &[] },
    Production { lhs: N::FieldSeq, rhs: &[Nt(N::FieldSeq), Nt(N::Field)] },
    // field
    Production { lhs: N::Field, rhs: &[Nt(N::VariableDecl)] },
    Production { lhs: N::Field, rhs: &[Nt(N::FunctionDecl)] },
    // interfacedecl : "interface" ident "{" prototype* "}"
    Production {
        lhs: N::InterfaceDecl,
        rhs: &[
            Tk(K::Interface),
            Nt(N::Ident),
            Tk(K::LBrace),
            Nt(N::PrototypeSeq),
            Tk(K::RBrace),
        ],
    },
    Production { lhs: N::PrototypeSeq, rhs: &[] },
    Production { lhs: N::PrototypeSeq, rhs: &[Nt(N::PrototypeSeq), Nt(N::Prototype)] },
    // prototype
    Production {
        lhs: N::Prototype,
        rhs: &[
            Nt(N::Type),
            Nt(N::Ident),
            Tk(K::LParen),
            Nt(N::Formals),
            Tk(K::RParen),
            Tk(K::Semicolon),
        ],
    },
    Production {
        lhs: N::Prototype,
        rhs: &[
            Tk(K::Void),
            Nt(N::Ident),
            Tk(K::LParen),
            Nt(N::Formals),
            Tk(K::RParen),
            Tk(K::Semicolon),
        ],
    },
    // stmtblock : "{" variabledecl* stmt* "}"
    Production {
        lhs: N::StmtBlock,
        rhs: &[Tk(K::LBrace), Nt(N::VarDeclSeq), Nt(N::StmtSeq), Tk(K::RBrace)],
    },
    Production { lhs: N::VarDeclSeq, rhs: &[] },
    Production { lhs: N::VarDeclSeq, rhs: &[Nt(N::VarDeclSeq), Nt(N::VariableDecl)] },
    Production { lhs: N::StmtSeq, rhs: &[] },
    Production { lhs: N::StmtSeq, rhs: &[Nt(N::StmtSeq), Nt(N::Stmt)] },
    // stmt
    Production { lhs: N::Stmt, rhs: &[Nt(N::ExprOpt), Tk(K::Semicolon)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::IfStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::WhileStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::ForStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::BreakStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::ReturnStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::PrintStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::StmtBlock)] },
    Production { lhs: N::ExprOpt, rhs: &[] },
    Production { lhs: N::ExprOpt, rhs: &[Nt(N::Expr)] },
    // ifstmt : "if" "(" expr ")" stmt ("else" stmt)?
    Production {
        lhs: N::IfStmt,
        rhs: &[Tk(K::If), Tk(K::LParen), Nt(N::Expr), Tk(K::RParen), Nt(N::Stmt)],
    },
    Production {
        lhs: N::IfStmt,
        rhs: &[
            Tk(K::If),
            Tk(K::LParen),
            Nt(N::Expr),
            Tk(K::RParen),
            Nt(N::Stmt),
            Tk(K::Else),
            Nt(N::Stmt),
        ],
    },
    // whilestmt
    Production {
        lhs: N::WhileStmt,
        rhs: &[Tk(K::While), Tk(K::LParen), Nt(N::Expr), Tk(K::RParen), Nt(N::Stmt)],
    },
    // forstmt : "for" "(" (expr)? ";" expr ";" (expr)? ")" stmt
    Production {
        lhs: N::ForStmt,
        rhs: &[
            Tk(K::For),
            Tk(K::LParen),
            Nt(N::ExprOpt),
            Tk(K::Semicolon),
            Nt(N::Expr),
            Tk(K::Semicolon),
            Nt(N::ExprOpt),
            Tk(K::RParen),
            Nt(N::Stmt),
        ],
    },
    // returnstmt : "return" (expr)? ";"
    Production { lhs: N::ReturnStmt, rhs: &[Tk(K::Return), Nt(N::ExprOpt), Tk(K::Semicolon)] },
    // breakstmt : "break" ";"
    Production { lhs: N::BreakStmt, rhs: &[Tk(K::Break), Tk(K::Semicolon)] },
    // printstmt : "Print" "(" expr ("," expr)* ")" ";"
    Production {
        lhs: N::PrintStmt,
        rhs: &[
            Tk(K::Print),
            Tk(K::LParen),
            Nt(N::ExprList),
            Tk(K::RParen),
            Tk(K::Semicolon),
        ],
    },
    Production { lhs: N::ExprList, rhs: &[Nt(N::Expr)] },
    Production { lhs: N::ExprList, rhs: &[Nt(N::ExprList), Tk(K::Comma), Nt(N::Expr)] },
    // expr : expr1 | lvalue "=" expr
    Production { lhs: N::Expr, rhs: &[Nt(N::Expr1)] },
    Production { lhs: N::Expr, rhs: &[Nt(N::LValue), Tk(K::Eq), Nt(N::Expr)] },
    // binary chain, one pass-through and one operator production per level
    Production { lhs: N::Expr1, rhs: &[Nt(N::Expr2)] },
    Production { lhs: N::Expr1, rhs: &[Nt(N::Expr1), Tk(K::OrOr), Nt(N::Expr2)] },
    Production { lhs: N::Expr2, rhs: &[Nt(N::Expr3)] },
    Production { lhs: N::Expr2, rhs: &[Nt(N::Expr2), Tk(K::AndAnd), Nt(N::Expr3)] },
    Production { lhs: N::Expr3, rhs: &[Nt(N::Expr4)] },
    Production { lhs: N::Expr3, rhs: &[Nt(N::Expr3), Tk(K::EqEq), Nt(N::Expr4)] },
    Production { lhs: N::Expr3, rhs: &[Nt(N::Expr3), Tk(K::NotEq), Nt(N::Expr4)] },
    Production { lhs: N::Expr4, rhs: &[Nt(N::Expr5)] },
    Production { lhs: N::Expr4, rhs: &[Nt(N::Expr4), Tk(K::Lt), Nt(N::Expr5)] },
    Production { lhs: N::Expr4, rhs: &[Nt(N::Expr4), Tk(K::Le), Nt(N::Expr5)] },
    Production { lhs: N::Expr4, rhs: &[Nt(N::Expr4), Tk(K::Gt), Nt(N::Expr5)] },
    Production { lhs: N::Expr4, rhs: &[Nt(N::Expr4), Tk(K::Ge), Nt(N::Expr5)] },
    Production { lhs: N::Expr5, rhs: &[Nt(N::Expr6)] },
    Production { lhs: N::Expr5, rhs: &[Nt(N::Expr5), Tk(K::Plus), Nt(N::Expr6)] },
    Production { lhs: N::Expr5, rhs: &[Nt(N::Expr5), Tk(K::Minus), Nt(N::Expr6)] },
    Production { lhs: N::Expr6, rhs: &[Nt(N::Expr7)] },
    Production { lhs: N::Expr6, rhs: &[Nt(N::Expr6), Tk(K::Star), Nt(N::Expr7)] },
    Production { lhs: N::Expr6, rhs: &[Nt(N::Expr6), Tk(K::Slash), Nt(N::Expr7)] },
    Production { lhs: N::Expr6, rhs: &[Nt(N::Expr6), Tk(K::Percent), Nt(N::Expr7)] },
    // expr7 : unary prefix, right-recursive
    Production { lhs: N::Expr7, rhs: &[Nt(N::Expr8)] },
    Production { lhs: N::Expr7, rhs: &[Tk(K::Minus), Nt(N::Expr7)] },
    Production { lhs: N::Expr7, rhs: &[Tk(K::Bang), Nt(N::Expr7)] },
    // expr8 : primary forms
    Production { lhs: N::Expr8, rhs: &[Nt(N::Constant)] },
    Production { lhs: N::Expr8, rhs: &[Nt(N::LValue)] },
    Production { lhs: N::Expr8, rhs: &[Tk(K::This)] },
    Production { lhs: N::Expr8, rhs: &[Nt(N::Call)] },
    Production { lhs: N::Expr8, rhs: &[Tk(K::ReadInteger), Tk(K::LParen), Tk(K::RParen)] },
    Production { lhs: N::Expr8, rhs: &[Tk(K::ReadLine), Tk(K::LParen), Tk(K::RParen)] },
    Production { lhs: N::Expr8, rhs: &[Tk(K::New), Nt(N::Ident)] },
    Production {
        lhs: N::Expr8,
        rhs: &[
            Tk(K::NewArray),
            Tk(K::LParen),
            Nt(N::Expr),
            Tk(K::Comma),
            Nt(N::Type),
            Tk(K::RParen),
        ],
    },
    Production { lhs: N::Expr8, rhs: &[Tk(K::LParen), Nt(N::Expr), Tk(K::RParen)] },
    // lvalue
    Production { lhs: N::LValue, rhs: &[Nt(N::Ident)] },
    Production { lhs: N::LValue, rhs: &[Nt(N::Expr8), Tk(K::Dot), Nt(N::Ident)] },
    Production {
        lhs: N::LValue,
        rhs: &[Nt(N::Expr8), Tk(K::LBracket), Nt(N::Expr), Tk(K::RBracket)],
    },
    // call
    Production {
        lhs: N::Call,
        rhs: &[Nt(N::Ident), Tk(K::LParen), Nt(N::Actuals), Tk(K::RParen)],
    },
    Production {
        lhs: N::Call,
        rhs: &[
            Nt(N::Expr8),
            Tk(K::Dot),
            Nt(N::Ident),
            Tk(K::LParen),
            Nt(N::Actuals),
            Tk(K::RParen),
        ],
    },
    // actuals : (expr ("," expr)*)?
    Production { lhs: N::Actuals, rhs: &[] },
    Production { lhs: N::Actuals, rhs: &[Nt(N::ExprList)] },
    // constants
    Production { lhs: N::Constant, rhs: &[Nt(N::IntConstant)] },
    Production { lhs: N::Constant, rhs: &[Nt(N::DoubleConstant)] },
    Production { lhs: N::Constant, rhs: &[Nt(N::BoolConstant)] },
    Production { lhs: N::Constant, rhs: &[Nt(N::StringConstant)] },
    Production { lhs: N::Constant, rhs: &[Tk(K::Null)] },
    Production { lhs: N::BoolConstant, rhs: &[Tk(K::False)] },
    Production { lhs: N::BoolConstant, rhs: &[Tk(K::True)] },
    Production { lhs: N::IntConstant, rhs: &[Nt(N::Integer)] },
    Production { lhs: N::IntConstant, rhs: &[Nt(N::HexInt)] },
    Production { lhs: N::Integer, rhs: &[Tk(K::IntLit)] },
    Production { lhs: N::HexInt, rhs: &[Tk(K::HexLit)] },
    Production { lhs: N::StringConstant, rhs: &[Tk(K::StringLit)] },
    Production { lhs: N::DoubleConstant, rhs: &[Tk(K::DoubleLit)] },
    Production { lhs: N::Ident, rhs: &[Tk(K::Ident)] },
];

/// The immutable grammar model: keyword table, productions, precedence
/// levels, and FIRST sets.
pub struct Grammar {
    keywords: FxHashMap<&'static str, TokenKind>,
    first: FxHashMap<NonTerminal, FxHashSet<TokenKind>>,
}

/// Process-wide grammar constant, built once before the first parse and
/// never mutated afterward. Safe to share across concurrent parses.
pub static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::new);

impl Grammar {
    fn new() -> Self {
        Grammar {
            keywords: KEYWORDS.iter().copied().collect(),
            first: compute_first_sets(),
        }
    }

    /// Classify a lexeme as a keyword, if it is one.
    pub fn keyword(&self, lexeme: &str) -> Option<TokenKind> {
        self.keywords.get(lexeme).copied()
    }

    /// The tokens that can begin a derivation of `nt`.
    pub fn first(&self, nt: NonTerminal) -> &FxHashSet<TokenKind> {
        &self.first[&nt]
    }

    /// True when `kind` can begin a derivation of `nt`.
    pub fn starts(&self, nt: NonTerminal, kind: TokenKind) -> bool {
        self.first(nt).contains(&kind)
    }

    /// FIRST set of `nt` as sorted human-readable symbol names, for
    /// expected-symbol reporting.
    pub fn expected_first(&self, nt: NonTerminal) -> Vec<String> {
        let mut names: Vec<String> = self
            .first(nt)
            .iter()
            .map(|kind| kind.describe().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn productions(&self) -> &'static [Production] {
        PRODUCTIONS
    }

    pub fn binary_levels(&self) -> &'static [BinaryLevel] {
        BINARY_LEVELS
    }
}

/// Standard FIRST-set construction: iterate over the productions, growing
/// FIRST sets and the nullable set, until nothing changes.
fn compute_first_sets() -> FxHashMap<NonTerminal, FxHashSet<TokenKind>> {
    let mut first: FxHashMap<NonTerminal, FxHashSet<TokenKind>> = FxHashMap::default();
    let mut nullable: FxHashSet<NonTerminal> = FxHashSet::default();

    for production in PRODUCTIONS {
        first.entry(production.lhs).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;
        for production in PRODUCTIONS {
            let mut gathered: Vec<TokenKind> = Vec::new();
            let mut all_nullable = true;

            for symbol in production.rhs {
                match symbol {
                    GrammarSymbol::Terminal(kind) => {
                        gathered.push(*kind);
                        all_nullable = false;
                    }
                    GrammarSymbol::NonTerminal(nt) => {
                        if let Some(set) = first.get(nt) {
                            gathered.extend(set.iter().copied());
                        }
                        if !nullable.contains(nt) {
                            all_nullable = false;
                        }
                    }
                }
                if !all_nullable {
                    break;
                }
            }

            if all_nullable && nullable.insert(production.lhs) {
                changed = true;
            }
            let set = first.entry(production.lhs).or_default();
            for kind in gathered {
                if set.insert(kind) {
                    changed = true;
                }
            }
        }
    }

    first
}
