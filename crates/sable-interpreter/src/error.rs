//! Runtime errors.
//!
//! A runtime failure never aborts execution: the interpreter records it
//! together with the location of the offending token, the failing
//! expression evaluates to `null`, and the program carries on.

use sable_syntax::{Diagnostic, DiagnosticKind, Span, Stage};
use thiserror::Error;

/// Errors raised while executing a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read, assignment or call of an unbound name.
    #[error("undefined variable '{name}'")]
    UndefinedVariable {
        /// The unbound name
        name: String,
    },

    /// Call of a value that is not a function.
    #[error("can only call functions")]
    NotCallable,

    /// Wrong number of arguments to a user function.
    #[error("expected {expected} arguments but got {found}")]
    ArityMismatch {
        /// Declared parameter count
        expected: usize,
        /// Arguments passed
        found: usize,
    },

    /// `/` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `%` with a zero divisor.
    #[error("modulo by zero")]
    ModuloByZero,

    /// Integer arithmetic left the `i64` range.
    #[error("integer overflow")]
    IntegerOverflow,

    /// Operand types the operator does not accept.
    #[error("invalid operands for {operation}")]
    InvalidOperands {
        /// Operation name (`addition`, `comparison`, ...)
        operation: &'static str,
    },

    /// Unary minus on a non-number.
    #[error("invalid operand for negation")]
    InvalidNegation,

    /// Too many nested calls.
    #[error("maximum call depth exceeded")]
    MaxCallDepth,

    /// A builtin rejected its arguments.
    #[error("{0}")]
    Native(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// A runtime error and the location it was raised at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct SpannedError {
    /// What went wrong
    pub error: RuntimeError,
    /// Location of the offending token
    pub span: Span,
}

impl From<&SpannedError> for Diagnostic {
    fn from(err: &SpannedError) -> Self {
        Diagnostic::error(
            DiagnosticKind::Runtime,
            Stage::Interpreter,
            err.error.to_string(),
            err.span,
        )
    }
}

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(RuntimeError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            RuntimeError::ArityMismatch {
                expected: 2,
                found: 1
            }
            .to_string(),
            "expected 2 arguments but got 1"
        );
        assert_eq!(
            RuntimeError::InvalidOperands {
                operation: "modulo"
            }
            .to_string(),
            "invalid operands for modulo"
        );
    }

    #[test]
    fn test_spanned_error_diagnostic() {
        let err = SpannedError {
            error: RuntimeError::NotCallable,
            span: Span::new(4, 5, 2, 1, 2, 2),
        };
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(
            diagnostic.to_string(),
            "[Runtime Error] (Interpreter) can only call functions at line 2:1"
        );
    }
}
