//! Statement type checking.
//!
//! This module implements type checking for statements:
//! - `let` bindings (the variable takes its initializer's type)
//! - Blocks and function bodies (each opens a scope)
//! - Control flow (conditions may be any type; truthiness is dynamic)
//! - Return statements against the declared return type

use crate::check::{ReturnContext, TypeChecker};
use crate::error::TypeError;
use crate::scope::{Symbol, SymbolKind};
use crate::types::Ty;
use sable_syntax::ast::{FunctionDecl, Stmt};
use sable_syntax::{Span, Spanned};

impl TypeChecker {
    /// Type checks a statement.
    pub(crate) fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let {
                name,
                name_span,
                init,
                ..
            } => {
                let ty = init
                    .as_ref()
                    .map_or(Ty::Unknown, |init| self.synth_expr(init));
                let level = self.scopes.level();
                self.scopes.define(
                    Symbol::new(name, SymbolKind::Variable, level, *name_span)
                        .with_type(ty)
                        .initialized(init.is_some()),
                );
            }

            Stmt::Expr { expr, .. } => {
                self.synth_expr(expr);
            }

            Stmt::Block { stmts, .. } => {
                self.scopes.push_scope();
                for stmt in stmts {
                    self.check_stmt(stmt);
                }
                self.scopes.pop_scope();
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.synth_expr(condition);
                self.check_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch);
                }
            }

            Stmt::While {
                condition, body, ..
            } => {
                self.synth_expr(condition);
                self.check_stmt(body);
            }

            Stmt::Function(decl) => self.check_function(decl),

            Stmt::Return { value, span } => {
                let found = value.as_ref().map(|value| (self.synth_expr(value), value.span()));
                self.check_return(found, *span);
            }
        }
    }

    fn check_function(&mut self, decl: &FunctionDecl) {
        // top-level functions were declared before the program was visited
        if !self.scopes.is_global() {
            self.declare_function(decl);
        }

        self.scopes.push_scope();
        let level = self.scopes.level();
        for param in &decl.params {
            self.scopes.define(
                Symbol::new(&param.name, SymbolKind::Parameter, level, param.span)
                    .with_type(Ty::from(param.ty)),
            );
        }

        self.returns.push(ReturnContext {
            name: decl.name.clone(),
            expected: decl.return_type.map(Ty::from),
        });
        for stmt in &decl.body {
            self.check_stmt(stmt);
        }
        self.returns.pop();
        self.scopes.pop_scope();
    }

    /// Compares a returned value (its type and location) with the enclosing
    /// function's annotation.
    fn check_return(&mut self, found: Option<(Ty, Span)>, span: Span) {
        let Some(context) = self.returns.last() else {
            return;
        };
        let Some(expected) = context.expected else {
            return;
        };

        let (found, span) = match found {
            Some((ty, value_span)) if expected == Ty::Void && ty != Ty::Void => (ty, value_span),
            Some((ty, _)) if ty.is_compatible(expected) => return,
            Some((ty, value_span)) => (ty, value_span),
            None if expected == Ty::Void => return,
            None => (Ty::Void, span),
        };

        let function = context.name.clone();
        self.error(TypeError::ReturnMismatch {
            function,
            expected,
            found,
            span,
        });
    }
}
