//! Token types and lexical tokens for the Sable language.
//!
//! Literal tokens carry their decoded value; everything else is recovered
//! from the source through the token's span. Lexical failures are tokens too
//! ([`TokenKind::Error`]) so the lexer never has to stop.
//!
//! # Examples
//!
//! ```
//! use sable_syntax::token::{Token, TokenKind};
//! use sable_syntax::span::Span;
//!
//! let source = "let count";
//! let token = Token::new(TokenKind::Ident("count".into()), Span::new(4, 9, 1, 5, 1, 10));
//! assert_eq!(token.lexeme(source), "count");
//! ```

use crate::error::LexerError;
use crate::span::{Span, Spanned};
use std::fmt;

/// Represents the kind of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ===== Literals =====
    /// Integer literal: `42`
    IntLiteral(i64),

    /// Floating-point literal: `3.14`
    FloatLiteral(f64),

    /// String literal, contents without the quotes
    StringLiteral(String),

    /// `true` or `false`
    BoolLiteral(bool),

    /// Identifier (variable or function name)
    Ident(String),

    // ===== Keywords =====
    /// `let`
    Let,

    /// `if`
    If,

    /// `then`
    Then,

    /// `else`
    Else,

    /// `end`
    End,

    /// `while`
    While,

    /// `do`
    Do,

    /// `for` (reserved)
    For,

    /// `function`
    Function,

    /// `return`
    Return,

    /// `int`
    IntType,

    /// `float`
    FloatType,

    /// `bool`
    BoolType,

    /// `string`
    StringType,

    /// `void`
    VoidType,

    // ===== Operators =====
    /// Addition: `+`
    Plus,

    /// Subtraction: `-`
    Minus,

    /// Multiplication: `*`
    Star,

    /// Division: `/`
    Slash,

    /// Modulo: `%`
    Percent,

    /// Assignment: `=`
    Eq,

    /// Equality comparison: `==`
    EqEq,

    /// Logical NOT: `!`
    Bang,

    /// Inequality comparison: `!=`
    BangEq,

    /// Less than: `<`
    Lt,

    /// Less than or equal: `<=`
    LtEq,

    /// Greater than: `>`
    Gt,

    /// Greater than or equal: `>=`
    GtEq,

    /// Logical AND: `&&`
    AmpAmp,

    /// Logical OR: `||`
    PipePipe,

    // ===== Delimiters =====
    /// Left parenthesis: `(`
    LParen,

    /// Right parenthesis: `)`
    RParen,

    /// Left brace: `{`
    LBrace,

    /// Right brace: `}`
    RBrace,

    /// Comma: `,`
    Comma,

    /// Colon: `:`
    Colon,

    /// Semicolon: `;`
    Semicolon,

    // ===== Special =====
    /// A lexical error in place of a token
    Error(LexerError),

    /// End of file
    EOF,
}

impl TokenKind {
    /// Returns `true` if this token is a keyword (boolean literals excluded).
    ///
    /// ```
    /// use sable_syntax::token::TokenKind;
    ///
    /// assert!(TokenKind::Function.is_keyword());
    /// assert!(!TokenKind::Ident("print".into()).is_keyword());
    /// ```
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Let
                | Self::If
                | Self::Then
                | Self::Else
                | Self::End
                | Self::While
                | Self::Do
                | Self::For
                | Self::Function
                | Self::Return
                | Self::IntType
                | Self::FloatType
                | Self::BoolType
                | Self::StringType
                | Self::VoidType
        )
    }

    /// Returns `true` if this token is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::IntLiteral(_)
                | Self::FloatLiteral(_)
                | Self::StringLiteral(_)
                | Self::BoolLiteral(_)
        )
    }

    /// Returns `true` if this token names a type in an annotation.
    #[must_use]
    pub const fn is_type_name(&self) -> bool {
        matches!(
            self,
            Self::IntType
                | Self::FloatType
                | Self::BoolType
                | Self::StringType
                | Self::VoidType
        )
    }

    /// Returns `true` if this token can begin a statement the parser
    /// resynchronizes on.
    #[must_use]
    pub const fn starts_statement(&self) -> bool {
        matches!(
            self,
            Self::Let | Self::If | Self::While | Self::Function | Self::Return
        )
    }

    /// Returns the precedence of binary operators, or `None` if not a binary
    /// operator.
    ///
    /// Higher values bind tighter. Assignment is handled separately by the
    /// parser since it is right-associative and only legal on a bare name.
    ///
    /// ```
    /// use sable_syntax::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::Star.precedence(), Some(6));
    /// assert_eq!(TokenKind::Plus.precedence(), Some(5));
    /// assert_eq!(TokenKind::PipePipe.precedence(), Some(1));
    /// assert_eq!(TokenKind::Eq.precedence(), None);
    /// ```
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        match self {
            Self::PipePipe => Some(1),
            Self::AmpAmp => Some(2),
            Self::EqEq | Self::BangEq => Some(3),
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => Some(4),
            Self::Plus | Self::Minus => Some(5),
            Self::Star | Self::Slash | Self::Percent => Some(6),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals
            Self::IntLiteral(value) => write!(f, "{value}"),
            Self::FloatLiteral(value) => write!(f, "{value:?}"),
            Self::StringLiteral(value) => write!(f, "\"{value}\""),
            Self::BoolLiteral(value) => write!(f, "{value}"),
            Self::Ident(name) => write!(f, "{name}"),

            // Keywords
            Self::Let => write!(f, "let"),
            Self::If => write!(f, "if"),
            Self::Then => write!(f, "then"),
            Self::Else => write!(f, "else"),
            Self::End => write!(f, "end"),
            Self::While => write!(f, "while"),
            Self::Do => write!(f, "do"),
            Self::For => write!(f, "for"),
            Self::Function => write!(f, "function"),
            Self::Return => write!(f, "return"),
            Self::IntType => write!(f, "int"),
            Self::FloatType => write!(f, "float"),
            Self::BoolType => write!(f, "bool"),
            Self::StringType => write!(f, "string"),
            Self::VoidType => write!(f, "void"),

            // Operators
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Eq => write!(f, "="),
            Self::EqEq => write!(f, "=="),
            Self::Bang => write!(f, "!"),
            Self::BangEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtEq => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtEq => write!(f, ">="),
            Self::AmpAmp => write!(f, "&&"),
            Self::PipePipe => write!(f, "||"),

            // Delimiters
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),

            // Special
            Self::Error(err) => write!(f, "{err}"),
            Self::EOF => write!(f, "end of input"),
        }
    }
}

/// A lexical token combining a token kind with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,

    /// The source location of the token
    pub span: Span,
}

impl Token {
    /// Creates a new token from a kind and span.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the exact source text of this token.
    #[must_use]
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        self.span.text(source)
    }

    /// Returns `true` for the end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EOF)
    }

    /// Returns the precedence of this token if it's a binary operator.
    #[must_use]
    pub const fn precedence(&self) -> Option<u8> {
        self.kind.precedence()
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
