//! Traversal protocol over the syntax tree.
//!
//! Every pass (analyzer, type checker, interpreter, pretty-printer) implements
//! [`Visitor`] and matches exhaustively on the node variants, so adding a
//! variant breaks every pass until it is handled.

use crate::ast::expr::Expr;
use crate::ast::stmt::{Program, Stmt};

/// A pass over expressions and statements.
///
/// ```
/// use sable_syntax::ast::visit::Visitor;
/// use sable_syntax::ast::{Expr, Stmt};
/// use sable_syntax::Parser;
///
/// struct CountCalls(usize);
///
/// impl Visitor for CountCalls {
///     type ExprOutput = ();
///     type StmtOutput = ();
///
///     fn visit_expr(&mut self, expr: &Expr) {
///         if let Expr::Call { args, .. } = expr {
///             self.0 += 1;
///             for arg in args {
///                 arg.accept(self);
///             }
///         }
///     }
///
///     fn visit_stmt(&mut self, stmt: &Stmt) {
///         if let Stmt::Expr { expr, .. } = stmt {
///             expr.accept(self);
///         }
///     }
/// }
///
/// let program = Parser::new("print(f(1));").parse();
/// let mut counter = CountCalls(0);
/// counter.visit_program(&program);
/// assert_eq!(counter.0, 2);
/// ```
pub trait Visitor {
    /// Result of visiting an expression
    type ExprOutput;
    /// Result of visiting a statement
    type StmtOutput;

    /// Visits one expression.
    fn visit_expr(&mut self, expr: &Expr) -> Self::ExprOutput;

    /// Visits one statement.
    fn visit_stmt(&mut self, stmt: &Stmt) -> Self::StmtOutput;

    /// Visits every top-level statement in order.
    fn visit_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.visit_stmt(stmt);
        }
    }
}

impl Expr {
    /// Dispatches this expression to `visitor`.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::ExprOutput {
        visitor.visit_expr(self)
    }
}

impl Stmt {
    /// Dispatches this statement to `visitor`.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::StmtOutput {
        visitor.visit_stmt(self)
    }
}
