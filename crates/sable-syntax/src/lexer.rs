//! Lexical analysis (tokenization) for the Sable language.
//!
//! The lexer is pull-based: the parser asks for one token at a time through
//! [`Lexer::next_token`]. It handles:
//!
//! - Keywords and identifiers
//! - Integer and floating-point literals
//! - String literals (verbatim, may span lines)
//! - `#` line comments
//! - Operators and delimiters
//!
//! The lexer never fails. Malformed input becomes a [`TokenKind::Error`]
//! token and lexing continues after it.
//!
//! # Examples
//!
//! ```
//! use sable_syntax::lexer::Lexer;
//! use sable_syntax::token::TokenKind;
//!
//! let tokens = Lexer::new("let x = 42;").tokenize();
//!
//! assert_eq!(tokens.len(), 6); // let, x, =, 42, ;, EOF
//! assert_eq!(tokens[3].kind, TokenKind::IntLiteral(42));
//! ```

use crate::error::LexerError;
use crate::keywords;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// Lexical analyzer for Sable source code.
///
/// Tracks byte offset, line and column as it consumes characters so every
/// token gets an exact [`Span`].
pub struct Lexer<'input> {
    /// The source code being tokenized
    input: &'input str,

    /// Character iterator with peek capability
    chars: Peekable<Chars<'input>>,

    /// Current byte offset in the source
    position: usize,

    /// Current line number (1-indexed)
    line: usize,

    /// Current column number (1-indexed)
    column: usize,
}

impl<'input> Lexer<'input> {
    /// Creates a new lexer for the given source code.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the source text this lexer reads from.
    #[must_use]
    pub const fn source(&self) -> &'input str {
        self.input
    }

    /// Tokenizes the entire source, including the trailing `EOF` token.
    ///
    /// Error tokens are kept in the stream at the position they occurred.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Reads the next token from the source.
    ///
    /// Returns an `EOF` token once the input is exhausted, and keeps
    /// returning it on every later call.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.position;
        let start_line = self.line;
        let start_col = self.column;

        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::EOF, Span::point(start, start_line, start_col));
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),

            '0'..='9' => self.read_number(start, start_line, start_col),

            '"' => self.read_string(start, start_line, start_col),

            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),

            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.either('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.either('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),

            '&' | '|' => {
                self.bump();
                if self.peek() == Some(ch) {
                    self.bump();
                    if ch == '&' {
                        TokenKind::AmpAmp
                    } else {
                        TokenKind::PipePipe
                    }
                } else {
                    TokenKind::Error(LexerError::UnknownChar {
                        ch,
                        span: self.span_from(start, start_line, start_col),
                    })
                }
            }

            _ => {
                self.bump();
                TokenKind::Error(LexerError::UnknownChar {
                    ch,
                    span: self.span_from(start, start_line, start_col),
                })
            }
        };

        Token::new(kind, self.span_from(start, start_line, start_col))
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peeks two characters ahead.
    fn peek2(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next()
    }

    /// Consumes and returns the next character.
    ///
    /// Updates position, line, and column tracking.
    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;

        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// Consumes one character, then `next` too if it follows.
    fn either(&mut self, next: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        self.bump();
        if self.peek() == Some(next) {
            self.bump();
            matched
        } else {
            otherwise
        }
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(
            start,
            self.position,
            start_line,
            start_col,
            self.line,
            self.column,
        )
    }

    /// Skips whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == '#' {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    /// Reads an identifier or keyword.
    fn read_identifier(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.bump();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        keywords::keyword(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()))
    }

    /// Reads a numeric literal (integer or float).
    ///
    /// A `.` only continues the literal when a digit follows it.
    fn read_number(&mut self, start: usize, start_line: usize, start_col: usize) -> TokenKind {
        self.eat_digits();

        let is_float = self.peek() == Some('.') && self.peek2().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.bump(); // '.'
            self.eat_digits();
        }

        let input = self.input;
        let text = &input[start..self.position];
        let invalid = || LexerError::InvalidNumeric {
            literal: text.to_string(),
            span: self.span_from(start, start_line, start_col),
        };

        if is_float {
            match text.parse::<f64>() {
                Ok(value) => TokenKind::FloatLiteral(value),
                Err(_) => TokenKind::Error(invalid()),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => TokenKind::IntLiteral(value),
                Err(_) => TokenKind::Error(invalid()),
            }
        }
    }

    fn eat_digits(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Reads a string literal. Contents are taken verbatim.
    fn read_string(&mut self, start: usize, start_line: usize, start_col: usize) -> TokenKind {
        self.bump(); // opening quote
        let content_start = self.position;

        loop {
            match self.peek() {
                Some('"') => {
                    let value = self.input[content_start..self.position].to_string();
                    self.bump();
                    return TokenKind::StringLiteral(value);
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    return TokenKind::Error(LexerError::UnterminatedString {
                        start: self.span_from(start, start_line, start_col),
                    });
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but excluding, `EOF`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() { None } else { Some(token) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_empty() {
        let tokens = Lexer::new("").tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EOF);
    }

    #[test]
    fn test_lexer_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident("x".into()));
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn test_lexer_keywords() {
        assert_eq!(
            kinds("let if then else end while do for function return"),
            vec![
                TokenKind::Let,
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::While,
                TokenKind::Do,
                TokenKind::For,
                TokenKind::Function,
                TokenKind::Return,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_type_names_and_booleans() {
        assert_eq!(
            kinds("int float bool string void true false"),
            vec![
                TokenKind::IntType,
                TokenKind::FloatType,
                TokenKind::BoolType,
                TokenKind::StringType,
                TokenKind::VoidType,
                TokenKind::BoolLiteral(true),
                TokenKind::BoolLiteral(false),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_identifiers() {
        assert_eq!(
            kinds("print _tmp x2 letter"),
            vec![
                TokenKind::Ident("print".into()),
                TokenKind::Ident("_tmp".into()),
                TokenKind::Ident("x2".into()),
                TokenKind::Ident("letter".into()),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        assert_eq!(
            kinds("42 3.5 0"),
            vec![
                TokenKind::IntLiteral(42),
                TokenKind::FloatLiteral(3.5),
                TokenKind::IntLiteral(0),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_trailing_dot_is_not_float() {
        let kinds = kinds("1.");
        assert_eq!(kinds[0], TokenKind::IntLiteral(1));
        assert!(matches!(
            kinds[1],
            TokenKind::Error(LexerError::UnknownChar { ch: '.', .. })
        ));
    }

    #[test]
    fn test_lexer_integer_overflow() {
        let kinds = kinds("99999999999999999999");
        match &kinds[0] {
            TokenKind::Error(LexerError::InvalidNumeric { literal, .. }) => {
                assert_eq!(literal, "99999999999999999999");
            }
            other => panic!("expected InvalidNumeric, got {other:?}"),
        }
    }

    #[test]
    fn test_lexer_strings_are_verbatim() {
        assert_eq!(
            kinds(r#""a\nb" "two
lines""#),
            vec![
                TokenKind::StringLiteral("a\\nb".into()),
                TokenKind::StringLiteral("two\nlines".into()),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_unterminated_string() {
        let tokens = Lexer::new("let s = \"oops").tokenize();
        match &tokens[3].kind {
            TokenKind::Error(LexerError::UnterminatedString { start }) => {
                assert_eq!(start.start, 8);
                assert_eq!(start.start_col, 9);
            }
            other => panic!("expected UnterminatedString, got {other:?}"),
        }
        assert!(tokens[4].is_eof());
    }

    #[test]
    fn test_lexer_operators() {
        assert_eq!(
            kinds("== != <= >= && || = ! < > + - * / %"),
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn test_lexer_lone_amp_and_pipe() {
        let kinds = kinds("& |");
        assert!(matches!(
            kinds[0],
            TokenKind::Error(LexerError::UnknownChar { ch: '&', .. })
        ));
        assert!(matches!(
            kinds[1],
            TokenKind::Error(LexerError::UnknownChar { ch: '|', .. })
        ));
    }

    #[test]
    fn test_lexer_comments() {
        assert_eq!(
            kinds("# header\nlet # trailing\n x"),
            vec![TokenKind::Let, TokenKind::Ident("x".into()), TokenKind::EOF]
        );
    }

    #[test]
    fn test_lexer_spans() {
        let source = "let x\n  = 10;";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].span, Span::new(0, 3, 1, 1, 1, 4));
        assert_eq!(tokens[1].lexeme(source), "x");
        assert_eq!(tokens[2].span.start_line, 2);
        assert_eq!(tokens[2].span.start_col, 3);
        assert_eq!(tokens[3].lexeme(source), "10");
    }

    #[test]
    fn test_lexer_recovers_after_error() {
        let kinds = kinds("x @ y");
        assert_eq!(kinds[0], TokenKind::Ident("x".into()));
        assert!(matches!(kinds[1], TokenKind::Error(_)));
        assert_eq!(kinds[2], TokenKind::Ident("y".into()));
    }

    #[test]
    fn test_lexer_iterator_excludes_eof() {
        let tokens: Vec<Token> = Lexer::new("a + b").collect();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| !t.is_eof()));
    }
}
