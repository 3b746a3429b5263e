//! Expression nodes in the Sable syntax tree.
//!
//! All expressions preserve source location information via [`Span`] for
//! accurate error reporting. Binary and unary nodes additionally keep the
//! span of their operator token so type and runtime errors can point at it.

use crate::span::{Span, Spanned};
use std::fmt;

/// A literal value appearing in source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal: `42`
    Integer(i64),
    /// Floating-point literal: `3.14`
    Float(f64),
    /// Boolean literal: `true`, `false`
    Boolean(bool),
    /// String literal: `"hello"`
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "\"{value}\""),
        }
    }
}

/// An expression in the Sable language.
///
/// # Examples
///
/// ```
/// use sable_syntax::ast::expr::{Expr, Literal};
/// use sable_syntax::span::{Span, Spanned};
///
/// let span = Span::new(0, 2, 1, 1, 1, 3);
/// let expr = Expr::Literal { value: Literal::Integer(42), span };
/// assert_eq!(expr.span(), span);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal {
        /// The value
        value: Literal,
        /// Source location
        span: Span,
    },

    /// Variable reference: `x`
    Variable {
        /// Referenced name
        name: String,
        /// Source location
        span: Span,
    },

    /// Binary operation: `a + b`
    Binary {
        /// Left operand
        left: Box<Expr>,
        /// Operator
        op: BinaryOp,
        /// Location of the operator token
        op_span: Span,
        /// Right operand
        right: Box<Expr>,
        /// Source location
        span: Span,
    },

    /// Unary operation: `-x`, `!x`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Location of the operator token
        op_span: Span,
        /// The operand
        operand: Box<Expr>,
        /// Source location
        span: Span,
    },

    /// Function call: `f(a, b)`
    ///
    /// The callee is always a bare name.
    Call {
        /// Called name
        callee: String,
        /// Location of the callee name
        callee_span: Span,
        /// Argument expressions
        args: Vec<Expr>,
        /// Source location
        span: Span,
    },

    /// Assignment: `x = value`
    Assign {
        /// Assigned name
        name: String,
        /// Location of the target name
        name_span: Span,
        /// Value to assign
        value: Box<Expr>,
        /// Source location
        span: Span,
    },
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Variable { span, .. }
            | Self::Binary { span, .. }
            | Self::Unary { span, .. }
            | Self::Call { span, .. }
            | Self::Assign { span, .. } => *span,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical negation: `!`
    Negate,
    /// Arithmetic negation: `-`
    Minus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "!"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
    /// Modulo: `%`
    Mod,
    /// Equality: `==`
    Eq,
    /// Inequality: `!=`
    Neq,
    /// Less than: `<`
    Lt,
    /// Greater than: `>`
    Gt,
    /// Less than or equal: `<=`
    Lte,
    /// Greater than or equal: `>=`
    Gte,
    /// Logical AND: `&&`
    And,
    /// Logical OR: `||`
    Or,
}

impl BinaryOp {
    /// `+ - * / %`
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    /// `== != < > <= >=`
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Neq | Self::Lt | Self::Gt | Self::Lte | Self::Gte
        )
    }

    /// `&& ||`
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Mod => write!(f, "%"),
            Self::Eq => write!(f, "=="),
            Self::Neq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Lte => write!(f, "<="),
            Self::Gte => write!(f, ">="),
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_span() {
        let span = Span::new(0, 5, 1, 1, 1, 6);
        let expr = Expr::Call {
            callee: "f".into(),
            callee_span: Span::new(0, 1, 1, 1, 1, 2),
            args: Vec::new(),
            span,
        };
        assert_eq!(expr.span(), span);
    }

    #[test]
    fn test_unary_op_display() {
        assert_eq!(format!("{}", UnaryOp::Negate), "!");
        assert_eq!(format!("{}", UnaryOp::Minus), "-");
    }

    #[test]
    fn test_binary_op_display() {
        assert_eq!(format!("{}", BinaryOp::Add), "+");
        assert_eq!(format!("{}", BinaryOp::Lte), "<=");
        assert_eq!(format!("{}", BinaryOp::Or), "||");
    }

    #[test]
    fn test_binary_op_classes() {
        assert!(BinaryOp::Mod.is_arithmetic());
        assert!(BinaryOp::Neq.is_comparison());
        assert!(BinaryOp::And.is_logical());
        assert!(!BinaryOp::Eq.is_arithmetic());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Float(87.0).to_string(), "87.0");
        assert_eq!(Literal::String("hi".into()).to_string(), "\"hi\"");
    }
}
