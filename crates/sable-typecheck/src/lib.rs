//! Sable Type Checker: Scopes, Semantic Analysis and Static Types
//!
//! This crate provides the static passes that run between parsing and
//! execution:
//! - A chained scope table of declared symbols
//! - Semantic analysis (declaration before use, initialization, redeclaration,
//!   `return` placement, unused variables)
//! - Type inference and compatibility checking
//!
//! Both passes keep their own scope table and pre-declare the builtin
//! functions. Their global scopes persist between calls, so a REPL can feed
//! them one line at a time.
//!
//! # Examples
//!
//! ```
//! use sable_syntax::Parser;
//! use sable_typecheck::{SemanticAnalyzer, TypeChecker};
//!
//! let program = Parser::new("let s = \"a\"; let n = 1; print(s + n);").parse();
//!
//! let mut analyzer = SemanticAnalyzer::new();
//! analyzer.analyze(&program);
//! assert!(!analyzer.has_errors());
//!
//! let mut checker = TypeChecker::new();
//! checker.check(&program);
//! assert!(!checker.has_errors());
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod builtins;
pub mod check;
pub mod error;
pub mod scope;
pub mod types;

pub use analyzer::SemanticAnalyzer;
pub use check::TypeChecker;
pub use error::{SemanticError, SemanticWarning, TypeError};
pub use scope::{Scope, ScopeTable, Symbol, SymbolKind};
pub use types::{Signature, Ty};
