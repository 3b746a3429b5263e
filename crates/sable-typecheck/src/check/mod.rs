//! Static type checking.
//!
//! The [`TypeChecker`] infers a [`Ty`] for every expression and checks
//! operator operands, assignments, call arguments and return values.
//! `unknown` flows from untyped sources (unannotated returns, `let` without
//! an initializer) and from errors, and is compatible with everything, so
//! each mistake is reported once.
//!
//! - [`expr`] - expression typing and operator rules
//! - [`stmt`] - declarations, blocks, control flow and returns

pub mod expr;
pub mod stmt;

pub use expr::{check_binary_op, check_unary_op};

use crate::builtins;
use crate::error::TypeError;
use crate::scope::{ScopeTable, Symbol, SymbolKind};
use crate::types::{Signature, Ty};
use sable_log::debug;
use sable_syntax::ast::{Expr, FunctionDecl, Program, Stmt, Visitor};
use sable_syntax::{Diagnostic, Span};

/// The function whose body is being checked.
#[derive(Debug, Clone)]
struct ReturnContext {
    /// Function name, for messages
    name: String,
    /// Declared return type; `None` when not annotated
    expected: Option<Ty>,
}

/// Type checker with a persistent global scope.
///
/// # Examples
///
/// ```
/// use sable_syntax::Parser;
/// use sable_typecheck::TypeChecker;
///
/// let program = Parser::new("print(true + 1);").parse();
/// let mut checker = TypeChecker::new();
/// checker.check(&program);
///
/// assert_eq!(
///     checker.errors()[0].to_string(),
///     "type mismatch: operator '+' cannot be applied to 'bool' and 'int'"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypeChecker {
    /// Typed declarations
    scopes: ScopeTable,
    /// Enclosing function bodies, innermost last
    returns: Vec<ReturnContext>,
    /// Errors from the last `check` call
    errors: Vec<TypeError>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    /// Creates a checker whose global scope holds the builtin signatures.
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = ScopeTable::new();
        for (name, signature) in builtins::all() {
            scopes.define(
                Symbol::new(name, SymbolKind::Function, 0, Span::default())
                    .with_signature(signature),
            );
        }

        Self {
            scopes,
            returns: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Type checks `program`, replacing the errors of any previous call.
    pub fn check(&mut self, program: &Program) {
        self.errors.clear();
        self.returns.clear();

        for decl in program.functions() {
            self.declare_function(decl);
        }
        self.visit_program(program);

        debug!("type checking finished with {} errors", self.errors.len());
    }

    /// Errors from the last call to [`TypeChecker::check`].
    #[must_use]
    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    /// Checks if the last check found any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The errors as diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }

    /// Static type of the global `name`, if declared.
    #[must_use]
    pub fn global_type(&self, name: &str) -> Option<Ty> {
        self.scopes.global().get(name).map(|s| s.ty)
    }

    fn error(&mut self, error: TypeError) {
        self.errors.push(error);
    }

    /// Declares `decl` with its signature in the current scope.
    fn declare_function(&mut self, decl: &FunctionDecl) {
        let params = decl.params.iter().map(|p| Ty::from(p.ty)).collect();
        let ret = decl.return_type.map_or(Ty::Unknown, Ty::from);
        let level = self.scopes.level();
        self.scopes.define(
            Symbol::new(&decl.name, SymbolKind::Function, level, decl.name_span)
                .with_signature(Signature::fixed(params, ret)),
        );
    }
}

impl Visitor for TypeChecker {
    type ExprOutput = Ty;
    type StmtOutput = ();

    fn visit_expr(&mut self, expr: &Expr) -> Ty {
        self.synth_expr(expr)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.check_stmt(stmt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_syntax::Parser;

    #[test]
    fn test_checker_creation() {
        let checker = TypeChecker::new();
        assert_eq!(checker.global_type("print"), Some(Ty::Function));
        assert!(!checker.has_errors());
    }

    #[test]
    fn test_globals_persist_between_calls() {
        let mut checker = TypeChecker::new();
        checker.check(&Parser::new("let s = \"a\";").parse());
        assert_eq!(checker.global_type("s"), Some(Ty::String));

        checker.check(&Parser::new("s = 1;").parse());
        assert_eq!(
            checker.errors()[0].to_string(),
            "type mismatch: cannot assign 'int' to 's' of type 'string'"
        );

        checker.check(&Parser::new("s = \"b\";").parse());
        assert!(!checker.has_errors());
    }
}
