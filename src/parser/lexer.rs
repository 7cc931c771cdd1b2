//! Lexer (tokenizer) for Decaf source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Whitespace and comments are stripped; everything else becomes a
//! token carrying its terminal category, its raw lexeme, and the position
//! of its first character.
//!
//! The lexer is a lazy, non-restartable token source: it implements
//! [`Iterator`], and once it has reported an error it yields nothing more.
//! [`Lexer::tokenize`] drains the whole input into a vector terminated by
//! a [`TokenKind::Eof`] sentinel, which is what the parser consumes.

use super::grammar::GRAMMAR;
use super::tree::SourceLocation;
use std::fmt;

/// Identifiers are at most 31 characters. A longer run is cut at the limit
/// and scanning resumes at the 32nd character.
const MAX_IDENT_LEN: usize = 31;

/// Terminal categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    Double,
    Bool,
    String,
    Void,
    Class,
    Extends,
    Implements,
    Interface,
    If,
    Else,
    While,
    For,
    Break,
    Return,
    Print,
    ReadInteger,
    ReadLine,
    New,
    NewArray,
    This,
    Null,
    True,
    False,

    // Identifiers and literals
    Ident,
    IntLit,
    HexLit,
    DoubleLit,
    StringLit,

    // Operators
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Lt,      // <
    Le,      // <=
    Gt,      // >
    Ge,      // >=
    EqEq,    // ==
    NotEq,   // !=
    AndAnd,  // &&
    OrOr,    // ||
    Eq,      // =
    Bang,    // !

    // Punctuation
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    LBracket,  // [
    RBracket,  // ]
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }

    /// End-of-input sentinel appended by [`Lexer::tokenize`].
    Eof,
}

impl TokenKind {
    /// Human-readable name used in expected-symbol sets.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Int => "'int'",
            TokenKind::Double => "'double'",
            TokenKind::Bool => "'bool'",
            TokenKind::String => "'string'",
            TokenKind::Void => "'void'",
            TokenKind::Class => "'class'",
            TokenKind::Extends => "'extends'",
            TokenKind::Implements => "'implements'",
            TokenKind::Interface => "'interface'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Break => "'break'",
            TokenKind::Return => "'return'",
            TokenKind::Print => "'Print'",
            TokenKind::ReadInteger => "'ReadInteger'",
            TokenKind::ReadLine => "'ReadLine'",
            TokenKind::New => "'new'",
            TokenKind::NewArray => "'NewArray'",
            TokenKind::This => "'this'",
            TokenKind::Null => "'null'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Ident => "identifier",
            TokenKind::IntLit => "int constant",
            TokenKind::HexLit => "hex constant",
            TokenKind::DoubleLit => "double constant",
            TokenKind::StringLit => "string constant",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Eq => "'='",
            TokenKind::Bang => "'!'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A classified token: terminal category, raw matched text, and the source
/// position of its first character. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLit | TokenKind::HexLit => write!(f, "int constant {}", self.lexeme),
            TokenKind::DoubleLit => write!(f, "double constant {}", self.lexeme),
            TokenKind::StringLit => write!(f, "string constant {}", self.lexeme),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for Decaf source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Tokenize the entire input, appending the end-of-input sentinel.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(result) = self.next() {
            tokens.push(result?);
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            // String literals
            '"' => self.string_literal(loc),

            // Numeric literals
            '0'..='9' => self.number_literal(ch, loc),

            // Identifiers and keywords (identifiers may not start with '_')
            'a'..='z' | 'A'..='Z' => self.identifier_or_keyword(ch, loc),

            // Operators and punctuation, longest match first
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::Le, "<=", loc))
                } else {
                    Ok(Token::new(TokenKind::Lt, "<", loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::Ge, ">=", loc))
                } else {
                    Ok(Token::new(TokenKind::Gt, ">", loc))
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::EqEq, "==", loc))
                } else {
                    Ok(Token::new(TokenKind::Eq, "=", loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::NotEq, "!=", loc))
                } else {
                    Ok(Token::new(TokenKind::Bang, "!", loc))
                }
            }
            // '&' and '|' only exist doubled
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::new(TokenKind::AndAnd, "&&", loc))
                } else {
                    Err(LexError {
                        message: "Unexpected character: '&'".to_string(),
                        location: loc,
                    })
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::new(TokenKind::OrOr, "||", loc))
                } else {
                    Err(LexError {
                        message: "Unexpected character: '|'".to_string(),
                        location: loc,
                    })
                }
            }
            '+' => Ok(Token::new(TokenKind::Plus, "+", loc)),
            '-' => Ok(Token::new(TokenKind::Minus, "-", loc)),
            '*' => Ok(Token::new(TokenKind::Star, "*", loc)),
            '/' => Ok(Token::new(TokenKind::Slash, "/", loc)),
            '%' => Ok(Token::new(TokenKind::Percent, "%", loc)),
            ';' => Ok(Token::new(TokenKind::Semicolon, ";", loc)),
            ',' => Ok(Token::new(TokenKind::Comma, ",", loc)),
            '.' => Ok(Token::new(TokenKind::Dot, ".", loc)),
            '[' => Ok(Token::new(TokenKind::LBracket, "[", loc)),
            ']' => Ok(Token::new(TokenKind::RBracket, "]", loc)),
            '(' => Ok(Token::new(TokenKind::LParen, "(", loc)),
            ')' => Ok(Token::new(TokenKind::RParen, ")", loc)),
            '{' => Ok(Token::new(TokenKind::LBrace, "{", loc)),
            '}' => Ok(Token::new(TokenKind::RBrace, "}", loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal
    ///
    /// No escape processing: a backslash is an ordinary character, so an
    /// embedded quote cannot be written. A raw newline or end of input
    /// inside the literal is an error.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::from('"');

        loop {
            match self.peek() {
                None => {
                    return Err(LexError {
                        message: "Unterminated string constant".to_string(),
                        location: loc,
                    });
                }
                Some('\n') => {
                    return Err(LexError {
                        message: "Newline in string constant".to_string(),
                        location: loc,
                    });
                }
                Some('"') => {
                    self.advance();
                    text.push('"');
                    return Ok(Token::new(TokenKind::StringLit, text, loc));
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Parse numeric literal: hexadecimal integer, decimal integer, or
    /// double. Hex takes priority over decimal; a double requires a
    /// decimal point and may carry an exponent.
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first_digit);

        if first_digit == '0' {
            if let Some(x) = self.peek() {
                if (x == 'x' || x == 'X')
                    && self.peek_ahead(1).is_some_and(|c| c.is_ascii_hexdigit())
                {
                    text.push(x);
                    self.advance();
                    while let Some(ch) = self.peek() {
                        if ch.is_ascii_hexdigit() {
                            text.push(ch);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    return Ok(Token::new(TokenKind::HexLit, text, loc));
                }
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() != Some('.') {
            return Ok(Token::new(TokenKind::IntLit, text, loc));
        }

        text.push('.');
        self.advance();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // The exponent is consumed only when a complete one follows;
        // otherwise the 'e' starts the next token.
        if let Some(e) = self.peek() {
            if e == 'e' || e == 'E' {
                let (signed, digit_at) = match self.peek_ahead(1) {
                    Some('+') | Some('-') => (true, 2),
                    _ => (false, 1),
                };
                if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    text.push(e);
                    self.advance();
                    if signed {
                        if let Some(sign) = self.advance() {
                            text.push(sign);
                        }
                    }
                    while let Some(ch) = self.peek() {
                        if ch.is_ascii_digit() {
                            text.push(ch);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        Ok(Token::new(TokenKind::DoubleLit, text, loc))
    }

    /// Parse identifier or keyword
    ///
    /// Stops after [`MAX_IDENT_LEN`] characters; a longer run continues as
    /// the next token.
    fn identifier_or_keyword(
        &mut self,
        first_char: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut ident = String::new();
        ident.push(first_char);

        while ident.len() < MAX_IDENT_LEN {
            match self.peek() {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
                    ident.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }

        match GRAMMAR.keyword(&ident) {
            Some(kind) => Ok(Token::new(kind, ident, loc)),
            None => Ok(Token::new(TokenKind::Ident, ident, loc)),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        // Single-line comment
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        // Multi-line comment
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */), non-greedy. An unterminated
    /// comment at end of input is an error at the comment's opening.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        let pos = self.position + n;
        if pos < self.input.len() {
            Some(self.input[pos])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// The stream is not restartable: after the first error, iteration
    /// ends.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Err(e) = self.skip_whitespace_and_comments() {
            self.failed = true;
            return Some(Err(e));
        }

        if self.is_at_end() {
            return None;
        }

        let result = self.next_token();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("int x;").tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_before_identifiers() {
        assert_eq!(
            kinds("class Print ReadInteger printer"),
            vec![
                TokenKind::Class,
                TokenKind::Print,
                TokenKind::ReadInteger,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("<= >= == != && || < > = !"),
            vec![
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        // Code after a line comment's newline stays live
        assert_eq!(
            lexemes("x = 1; // y = 2\n z = 3;"),
            vec!["x", "=", "1", ";", "z", "=", "3", ";", ""]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            lexemes("int x; /* block\ncomment */ int z;"),
            vec!["int", "x", ";", "int", "z", ";", ""]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("int x; /* never closed").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated block comment"));
    }

    #[test]
    fn test_literal_classification() {
        assert_eq!(kinds("0x1A")[0], TokenKind::HexLit);
        assert_eq!(kinds("0XFF")[0], TokenKind::HexLit);
        assert_eq!(kinds("10")[0], TokenKind::IntLit);
        assert_eq!(kinds("1.5")[0], TokenKind::DoubleLit);
        assert_eq!(kinds("1.5e10")[0], TokenKind::DoubleLit);
        assert_eq!(kinds("1.5E+2")[0], TokenKind::DoubleLit);
        assert_eq!(kinds("1.")[0], TokenKind::DoubleLit);
    }

    #[test]
    fn test_incomplete_exponent_left_for_next_token() {
        // "1.5e" is a double followed by an identifier
        assert_eq!(
            kinds("1.5e"),
            vec![TokenKind::DoubleLit, TokenKind::Ident, TokenKind::Eof]
        );
        // without an exponent digit the sign is not consumed either
        assert_eq!(
            kinds("1.5e+"),
            vec![
                TokenKind::DoubleLit,
                TokenKind::Ident,
                TokenKind::Plus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_exponent_without_dot_is_not_a_double() {
        assert_eq!(
            kinds("10e5"),
            vec![TokenKind::IntLit, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_identifier_length_limit() {
        let ident31 = "a".repeat(31);
        let tokens = Lexer::new(&ident31).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, ident31);
        assert_eq!(tokens[1].kind, TokenKind::Eof);

        // A 32-character run splits: 31 characters, then scanning resumes
        let ident32 = "a".repeat(32);
        let tokens = Lexer::new(&ident32).tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, "a".repeat(31));
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "a");
    }

    #[test]
    fn test_string_literal_keeps_backslash() {
        // No escape processing: the backslash is an ordinary character
        let tokens = Lexer::new(r#""a\n""#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].lexeme, r#""a\n""#);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"open").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated string"));
    }

    #[test]
    fn test_newline_in_string() {
        let err = Lexer::new("\"one\ntwo\"").tokenize().unwrap_err();
        assert!(err.message.contains("Newline in string"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("int @x;").tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character: '@'"));
        assert_eq!(err.location.line, 1);
        assert_eq!(err.location.column, 5);
    }

    #[test]
    fn test_single_ampersand_rejected() {
        let err = Lexer::new("a & b").tokenize().unwrap_err();
        assert!(err.message.contains("'&'"));
    }

    #[test]
    fn test_underscore_cannot_start_identifier() {
        let err = Lexer::new("_x").tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character: '_'"));
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int x;\n  y = 1;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_stream_stops_after_error() {
        let mut lexer = Lexer::new("@ @");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
