//! Syntax tree for the Sable language.
//!
//! The tree is owned by a [`Program`] and never mutated after parsing; later
//! passes borrow it read-only through the [`Visitor`](visit::Visitor) trait.
//!
//! # Modules
//!
//! - [`expr`] - Expression nodes (literals, operators, calls, assignment)
//! - [`stmt`] - Statement nodes (let, if, while, function, return, blocks)
//! - [`visit`] - The traversal protocol

pub mod expr;
pub mod stmt;
pub mod visit;

// Re-exports for convenience
pub use expr::{BinaryOp, Expr, Literal, UnaryOp};
pub use stmt::{FunctionDecl, Param, Program, Stmt, TypeName};
pub use visit::Visitor;
