//! Semantic and type checking errors.
//!
//! This module defines the errors reported by the semantic analyzer and the
//! type checker, and their conversion to [`Diagnostic`]s.

use crate::types::display::arguments;
use crate::types::Ty;
use sable_syntax::ast::{BinaryOp, UnaryOp};
use sable_syntax::{Diagnostic, DiagnosticKind, Span, Stage};
use std::fmt;

/// Errors found by the semantic analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticError {
    /// A name declared twice in the same scope.
    Redeclaration {
        /// The duplicated name
        name: String,
        /// `true` if the second declaration is a function
        function: bool,
        /// Location of the second declaration
        span: Span,
    },

    /// Read of a name that is not declared.
    UndefinedVariable {
        /// Name of the undefined variable
        name: String,
        /// Source location
        span: Span,
    },

    /// Read of a variable declared without a value.
    UninitializedVariable {
        /// Name of the variable
        name: String,
        /// Source location
        span: Span,
    },

    /// Assignment to a name that is not declared.
    AssignToUndefined {
        /// Name of the target
        name: String,
        /// Source location
        span: Span,
    },

    /// Assignment to a function or builtin.
    AssignToConstant {
        /// Name of the target
        name: String,
        /// Source location
        span: Span,
    },

    /// Call of a name that is not declared.
    UndefinedFunction {
        /// Name of the callee
        name: String,
        /// Source location
        span: Span,
    },

    /// `return` at top level.
    ReturnOutsideFunction {
        /// Source location
        span: Span,
    },
}

impl SemanticError {
    /// Get the span of this error.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Redeclaration { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::UninitializedVariable { span, .. }
            | Self::AssignToUndefined { span, .. }
            | Self::AssignToConstant { span, .. }
            | Self::UndefinedFunction { span, .. }
            | Self::ReturnOutsideFunction { span } => *span,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redeclaration {
                name,
                function: true,
                ..
            } => write!(f, "function '{name}' is already declared in this scope"),
            Self::Redeclaration { name, .. } => {
                write!(f, "variable '{name}' is already declared in this scope")
            }
            Self::UndefinedVariable { name, .. } => write!(f, "undefined variable '{name}'"),
            Self::UninitializedVariable { name, .. } => {
                write!(f, "variable '{name}' used before initialization")
            }
            Self::AssignToUndefined { name, .. } => {
                write!(f, "cannot assign to undefined variable '{name}'")
            }
            Self::AssignToConstant { name, .. } => write!(f, "cannot assign to constant '{name}'"),
            Self::UndefinedFunction { name, .. } => write!(f, "undefined function '{name}'"),
            Self::ReturnOutsideFunction { .. } => write!(f, "return outside of function"),
        }
    }
}

impl std::error::Error for SemanticError {}

impl From<&SemanticError> for Diagnostic {
    fn from(error: &SemanticError) -> Self {
        Diagnostic::error(
            DiagnosticKind::Semantic,
            Stage::SemanticAnalyzer,
            error.to_string(),
            error.span(),
        )
    }
}

/// Warnings found by the semantic analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticWarning {
    /// A local variable that is never read.
    UnusedVariable {
        /// Name of the variable
        name: String,
        /// Location of the declaration
        span: Span,
    },
}

impl SemanticWarning {
    /// Get the span of this warning.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::UnusedVariable { span, .. } => *span,
        }
    }
}

impl fmt::Display for SemanticWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusedVariable { name, .. } => write!(f, "unused variable '{name}'"),
        }
    }
}

impl From<&SemanticWarning> for Diagnostic {
    fn from(warning: &SemanticWarning) -> Self {
        Diagnostic::warning(
            DiagnosticKind::Semantic,
            Stage::SemanticAnalyzer,
            warning.to_string(),
            warning.span(),
        )
    }
}

/// The operator named in an operand mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// A binary operator
    Binary(BinaryOp),
    /// A unary operator
    Unary(UnaryOp),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(op) => write!(f, "{op}"),
            Self::Unary(op) => write!(f, "{op}"),
        }
    }
}

/// Type checking errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Operator applied to operands of the wrong types.
    InvalidOperands {
        /// The operator
        op: Operator,
        /// Operand types (one for unary operators)
        operands: Vec<Ty>,
        /// Location of the operator token
        span: Span,
    },

    /// Assignment of an incompatible value.
    AssignMismatch {
        /// Name of the target
        name: String,
        /// Declared type of the target
        expected: Ty,
        /// Type of the assigned value
        found: Ty,
        /// Source location
        span: Span,
    },

    /// Call with the wrong number of arguments.
    ArityMismatch {
        /// Name of the callee
        name: String,
        /// Accepted argument counts, minimum first
        expected: (usize, usize),
        /// Supplied argument count
        found: usize,
        /// Source location
        span: Span,
    },

    /// Call with an argument of the wrong type.
    ArgumentMismatch {
        /// Name of the callee
        name: String,
        /// 1-based argument position
        index: usize,
        /// Parameter type
        expected: Ty,
        /// Argument type
        found: Ty,
        /// Location of the argument
        span: Span,
    },

    /// Return value incompatible with the declared return type.
    ReturnMismatch {
        /// Name of the enclosing function
        function: String,
        /// Declared return type
        expected: Ty,
        /// Type of the returned value (`void` when none)
        found: Ty,
        /// Source location
        span: Span,
    },

    /// Read of a name that is not declared.
    UndefinedVariable {
        /// Name of the variable
        name: String,
        /// Source location
        span: Span,
    },

    /// Call of a name that is not declared.
    UndefinedFunction {
        /// Name of the callee
        name: String,
        /// Source location
        span: Span,
    },

    /// Call of a name whose type is known and not a function.
    NotCallable {
        /// Name of the callee
        name: String,
        /// Its type
        ty: Ty,
        /// Source location
        span: Span,
    },
}

impl TypeError {
    /// Get the span of this error.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidOperands { span, .. }
            | Self::AssignMismatch { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::ArgumentMismatch { span, .. }
            | Self::ReturnMismatch { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::UndefinedFunction { span, .. }
            | Self::NotCallable { span, .. } => *span,
        }
    }

    /// Returns `true` for the `type mismatch: ...` family.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperands { .. }
                | Self::AssignMismatch { .. }
                | Self::ArgumentMismatch { .. }
                | Self::ReturnMismatch { .. }
        )
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperands { op, operands, .. } => {
                write!(f, "type mismatch: operator '{op}' cannot be applied to ")?;
                match operands.as_slice() {
                    [left, right] => write!(f, "'{left}' and '{right}'"),
                    [operand] => write!(f, "'{operand}'"),
                    _ => write!(f, "these operands"),
                }
            }

            Self::AssignMismatch {
                name,
                expected,
                found,
                ..
            } => write!(
                f,
                "type mismatch: cannot assign '{found}' to '{name}' of type '{expected}'"
            ),

            Self::ArityMismatch {
                name,
                expected: (min, max),
                found,
                ..
            } => {
                if min == max {
                    write!(f, "function '{name}' expects {}", arguments(*min))?;
                } else {
                    write!(f, "function '{name}' expects {min} to {max} arguments")?;
                }
                write!(f, " but got {found}")
            }

            Self::ArgumentMismatch {
                name,
                index,
                expected,
                found,
                ..
            } => write!(
                f,
                "type mismatch: argument {index} of '{name}' expects '{expected}' but got '{found}'"
            ),

            Self::ReturnMismatch {
                function,
                expected,
                found,
                ..
            } => write!(
                f,
                "type mismatch: function '{function}' returns '{expected}' but got '{found}'"
            ),

            Self::UndefinedVariable { name, .. } => write!(f, "undefined variable '{name}'"),
            Self::UndefinedFunction { name, .. } => write!(f, "undefined function '{name}'"),
            Self::NotCallable { name, .. } => write!(f, "'{name}' is not callable"),
        }
    }
}

impl std::error::Error for TypeError {}

impl From<&TypeError> for Diagnostic {
    fn from(error: &TypeError) -> Self {
        Diagnostic::error(
            DiagnosticKind::Semantic,
            Stage::TypeChecker,
            error.to_string(),
            error.span(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(0, 1, 1, 1, 1, 2)
    }

    #[test]
    fn test_semantic_error_display() {
        let err = SemanticError::UndefinedVariable {
            name: "x".to_string(),
            span: span(),
        };
        assert_eq!(format!("{}", err), "undefined variable 'x'");

        let err = SemanticError::Redeclaration {
            name: "f".to_string(),
            function: true,
            span: span(),
        };
        assert_eq!(err.to_string(), "function 'f' is already declared in this scope");
    }

    #[test]
    fn test_operand_mismatch_display() {
        let err = TypeError::InvalidOperands {
            op: Operator::Binary(BinaryOp::Add),
            operands: vec![Ty::Bool, Ty::Int],
            span: span(),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: operator '+' cannot be applied to 'bool' and 'int'"
        );
        assert!(err.is_mismatch());

        let err = TypeError::InvalidOperands {
            op: Operator::Unary(UnaryOp::Minus),
            operands: vec![Ty::String],
            span: span(),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: operator '-' cannot be applied to 'string'"
        );
    }

    #[test]
    fn test_arity_display() {
        let err = TypeError::ArityMismatch {
            name: "add".to_string(),
            expected: (2, 2),
            found: 3,
            span: span(),
        };
        assert_eq!(err.to_string(), "function 'add' expects 2 arguments but got 3");
        assert!(!err.is_mismatch());

        let err = TypeError::ArityMismatch {
            name: "input".to_string(),
            expected: (0, 1),
            found: 2,
            span: span(),
        };
        assert_eq!(err.to_string(), "function 'input' expects 0 to 1 arguments but got 2");
    }

    #[test]
    fn test_diagnostic_conversion() {
        let warning = SemanticWarning::UnusedVariable {
            name: "tmp".to_string(),
            span: span(),
        };
        let diagnostic = Diagnostic::from(&warning);
        assert!(!diagnostic.is_error());
        assert_eq!(diagnostic.stage, Stage::SemanticAnalyzer);

        let err = TypeError::NotCallable {
            name: "x".to_string(),
            ty: Ty::Int,
            span: span(),
        };
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.stage, Stage::TypeChecker);
        assert_eq!(diagnostic.message, "'x' is not callable");
    }
}
