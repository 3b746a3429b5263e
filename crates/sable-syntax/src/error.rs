//! Error types for the lexer and parser.
//!
//! Lexer errors are carried inside [`TokenKind::Error`](crate::token::TokenKind)
//! tokens; parser errors are recorded by the parser as it recovers. Both are
//! unified as [`SyntaxError`] on the parser's error list.

use crate::span::Span;
use std::fmt;

/// Errors that can occur during lexical analysis (tokenization).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    /// Unknown character encountered in source.
    ///
    /// ```text
    /// let x = @;
    ///         ^
    /// error: unknown character '@'
    /// ```
    UnknownChar {
        /// The unexpected character
        ch: char,

        /// Location in source
        span: Span,
    },

    /// String literal still open at end of input.
    UnterminatedString {
        /// Span from the opening quote to end of input
        start: Span,
    },

    /// Integer literal that does not fit in 64 bits.
    ///
    /// ```text
    /// let big = 99999999999999999999;
    ///           ^^^^^^^^^^^^^^^^^^^^
    /// error: invalid numeric literal '99999999999999999999'
    /// ```
    InvalidNumeric {
        /// The invalid literal text
        literal: String,

        /// Location in source
        span: Span,
    },
}

impl LexerError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownChar { span, .. } | Self::InvalidNumeric { span, .. } => *span,
            Self::UnterminatedString { start } => *start,
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChar { ch, .. } => write!(f, "unknown character '{ch}'"),
            Self::UnterminatedString { .. } => write!(f, "unterminated string literal"),
            Self::InvalidNumeric { literal, .. } => {
                write!(f, "invalid numeric literal '{literal}'")
            }
        }
    }
}

impl std::error::Error for LexerError {}

/// Errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Unexpected token encountered.
    ///
    /// ```text
    /// let = 42;
    ///     ^
    /// error: expected identifier, found '='
    /// ```
    UnexpectedToken {
        /// Descriptions of what would have been accepted
        expected: Vec<String>,

        /// The token actually found
        found: String,

        /// Location in source
        span: Span,
    },

    /// Expected an expression but found another token.
    ExpectedExpression {
        /// The token actually found
        found: String,

        /// Location in source
        span: Span,
    },

    /// Expected a type name (`int float bool string void`).
    ExpectedType {
        /// The token actually found
        found: String,

        /// Location in source
        span: Span,
    },

    /// Left-hand side of `=` is not a bare variable.
    InvalidAssignmentTarget {
        /// Location of the `=`
        span: Span,
    },

    /// Something other than a bare name is being called.
    InvalidCallTarget {
        /// Location of the callee
        span: Span,
    },

    /// An `if`/`while` body with no statements.
    EmptyBody {
        /// The construct missing a body (`if`, `else`, `while`)
        construct: &'static str,

        /// Location where a statement was expected
        span: Span,
    },
}

impl ParserError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::ExpectedExpression { span, .. }
            | Self::ExpectedType { span, .. }
            | Self::InvalidAssignmentTarget { span }
            | Self::InvalidCallTarget { span }
            | Self::EmptyBody { span, .. } => *span,
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => {
                write!(f, "expected ")?;
                if expected.len() == 1 {
                    write!(f, "{}", expected[0])?;
                } else {
                    write!(f, "one of: {}", expected.join(", "))?;
                }
                write!(f, ", found '{found}'")
            }
            Self::ExpectedExpression { found, .. } => {
                write!(f, "expected expression, found '{found}'")
            }
            Self::ExpectedType { found, .. } => {
                write!(f, "expected type, found '{found}'")
            }
            Self::InvalidAssignmentTarget { .. } => write!(f, "invalid assignment target"),
            Self::InvalidCallTarget { .. } => write!(f, "invalid call target"),
            Self::EmptyBody { construct, .. } => {
                write!(f, "expected at least one statement in '{construct}' body")
            }
        }
    }
}

impl std::error::Error for ParserError {}

/// Combined syntax error for the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Lexer error
    Lexer(LexerError),

    /// Parser error
    Parser(ParserError),
}

impl SyntaxError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lexer(err) => err.span(),
            Self::Parser(err) => err.span(),
        }
    }

    /// Returns `true` for errors that came from the lexer.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexer(_))
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer(err) => write!(f, "lexer error: {err}"),
            Self::Parser(err) => write!(f, "parser error: {err}"),
        }
    }
}

impl std::error::Error for SyntaxError {}

impl From<LexerError> for SyntaxError {
    fn from(err: LexerError) -> Self {
        Self::Lexer(err)
    }
}

impl From<ParserError> for SyntaxError {
    fn from(err: ParserError) -> Self {
        Self::Parser(err)
    }
}

/// Result type for lexer operations.
pub type LexerResult<T> = Result<T, LexerError>;

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;

/// Result type for syntax operations (lexer or parser).
pub type SyntaxResult<T> = Result<T, SyntaxError>;
