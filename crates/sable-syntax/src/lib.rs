//! Sable Syntax: Lexer, Parser, and Syntax Tree
//!
//! This crate provides the language frontend for Sable, including:
//! - Lexical analysis (pull-based tokenization)
//! - Parsing with panic-mode error recovery
//! - Syntax tree definitions and the [`Visitor`] traversal protocol
//! - Source location tracking
//! - Diagnostics shared by every later pass
//!
//! # Modules
//!
//! - [`span`] - Source location tracking
//! - [`token`] - Token types and definitions
//! - [`keywords`] - Reserved words
//! - [`lexer`] - Tokenization
//! - [`ast`] - Expression and statement nodes
//! - [`parser`] - Recursive descent parser
//! - [`error`] - Lexer and parser error types
//! - [`diagnostic`] - Diagnostics and the emitter
//! - [`pretty`] - Source pretty-printer
//!
//! # Examples
//!
//! ```
//! use sable_syntax::{Parser, Stmt};
//!
//! let mut parser = Parser::new("let greeting = \"hi\"; print(greeting);");
//! let program = parser.parse();
//!
//! assert!(!parser.has_errors());
//! assert!(matches!(program.statements[0], Stmt::Let { .. }));
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;

// Re-exports for convenience
pub use ast::{
    BinaryOp, Expr, FunctionDecl, Literal, Param, Program, Stmt, TypeName, UnaryOp, Visitor,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLevel, Emitter, Stage};
pub use error::{LexerError, ParserError, SyntaxError, SyntaxResult};
pub use lexer::Lexer;
pub use parser::Parser;
pub use pretty::PrettyPrinter;
pub use span::{Span, Spanned};
pub use token::{Token, TokenKind};
