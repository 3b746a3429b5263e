//! Statement nodes in the Sable syntax tree.

use crate::ast::expr::Expr;
use crate::span::{Span, Spanned};
use std::fmt;
use std::rc::Rc;

/// A type annotation on a parameter or function return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `void`
    Void,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Void => write!(f, "void"),
        }
    }
}

/// A function parameter: `name: type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: TypeName,
    /// Source location
    pub span: Span,
}

/// A function declaration: `function name(params) [: type] { body }`
///
/// Shared through `Rc` so runtime function values can keep their body alive
/// after the declaring program has been dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name
    pub name: String,
    /// Location of the name
    pub name_span: Span,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Declared return type, if annotated
    pub return_type: Option<TypeName>,
    /// Body statements
    pub body: Vec<Stmt>,
    /// Source location
    pub span: Span,
}

/// A statement in the Sable language.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Variable declaration: `let x = expr;` or `let x;`
    Let {
        /// Variable name
        name: String,
        /// Location of the name
        name_span: Span,
        /// Optional initializer
        init: Option<Expr>,
        /// Source location
        span: Span,
    },

    /// Expression statement: `expr;`
    Expr {
        /// The expression
        expr: Expr,
        /// Source location
        span: Span,
    },

    /// Block: `{ stmts }`
    Block {
        /// Statements in order
        stmts: Vec<Stmt>,
        /// Source location
        span: Span,
    },

    /// Conditional: `if (cond) then body [else body] end;`
    If {
        /// Condition
        condition: Expr,
        /// Then branch
        then_branch: Box<Stmt>,
        /// Optional else branch
        else_branch: Option<Box<Stmt>>,
        /// Source location
        span: Span,
    },

    /// Loop: `while (cond) do body end;`
    While {
        /// Loop condition
        condition: Expr,
        /// Loop body
        body: Box<Stmt>,
        /// Source location
        span: Span,
    },

    /// Function declaration
    Function(Rc<FunctionDecl>),

    /// Return statement: `return expr;` or `return;`
    Return {
        /// Optional return value
        value: Option<Expr>,
        /// Source location
        span: Span,
    },
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        match self {
            Self::Let { span, .. }
            | Self::Expr { span, .. }
            | Self::Block { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::Return { span, .. } => *span,
            Self::Function(decl) => decl.span,
        }
    }
}

/// A parsed program: top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements
    pub statements: Vec<Stmt>,
}

impl Program {
    /// Creates a program from its statements.
    #[must_use]
    pub const fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    /// Returns `true` if the program has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates over the top-level function declarations.
    pub fn functions(&self) -> impl Iterator<Item = &Rc<FunctionDecl>> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::Function(decl) => Some(decl),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::Literal;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end, 1, start + 1, 1, end + 1)
    }

    #[test]
    fn test_stmt_span() {
        let decl = FunctionDecl {
            name: "f".into(),
            name_span: span(9, 10),
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
            span: span(0, 15),
        };
        assert_eq!(Stmt::Function(Rc::new(decl)).span(), span(0, 15));

        let ret = Stmt::Return { value: None, span: span(2, 9) };
        assert_eq!(ret.span(), span(2, 9));
    }

    #[test]
    fn test_program_functions() {
        let decl = Rc::new(FunctionDecl {
            name: "main".into(),
            name_span: span(9, 13),
            params: Vec::new(),
            return_type: Some(TypeName::Void),
            body: Vec::new(),
            span: span(0, 20),
        });
        let program = Program::new(vec![
            Stmt::Expr {
                expr: Expr::Literal { value: Literal::Integer(1), span: span(0, 1) },
                span: span(0, 2),
            },
            Stmt::Function(Rc::clone(&decl)),
        ]);

        let names: Vec<_> = program.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["main"]);
        assert!(!program.is_empty());
    }

    #[test]
    fn test_type_name_display() {
        assert_eq!(TypeName::String.to_string(), "string");
        assert_eq!(TypeName::Void.to_string(), "void");
    }
}
