//! Declaration and use validation.
//!
//! The [`SemanticAnalyzer`] walks the whole tree once, checking that every
//! name is declared before use, initialized before it is read, and never
//! redeclared in the same scope. It never stops early: every problem in the
//! program is reported.
//!
//! The global scope survives between calls to [`SemanticAnalyzer::analyze`],
//! so a REPL can analyze one line at a time.

use crate::builtins;
use crate::error::{SemanticError, SemanticWarning};
use crate::scope::{Scope, ScopeTable, Symbol, SymbolKind};
use fxhash::FxHashSet;
use sable_log::{debug, trace};
use sable_syntax::ast::{Expr, FunctionDecl, Program, Stmt, Visitor};
use sable_syntax::{Diagnostic, Span};

/// Semantic analyzer with a persistent global scope.
///
/// # Examples
///
/// ```
/// use sable_syntax::Parser;
/// use sable_typecheck::SemanticAnalyzer;
///
/// let program = Parser::new("print(y);").parse();
/// let mut analyzer = SemanticAnalyzer::new();
/// analyzer.analyze(&program);
///
/// assert!(analyzer.has_errors());
/// assert_eq!(analyzer.errors()[0].to_string(), "undefined variable 'y'");
/// ```
#[derive(Debug, Clone)]
pub struct SemanticAnalyzer {
    /// Declared names
    scopes: ScopeTable,
    /// Number of enclosing function bodies
    function_depth: usize,
    /// Top-level functions declared ahead of the current program
    predeclared: FxHashSet<String>,
    /// Errors from the last `analyze` call
    errors: Vec<SemanticError>,
    /// Warnings from the last `analyze` call
    warnings: Vec<SemanticWarning>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    /// Creates an analyzer whose global scope holds the builtins.
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = ScopeTable::new();
        for name in builtins::BUILTIN_NAMES {
            let mut symbol = Symbol::new(name, SymbolKind::Function, 0, Span::default());
            symbol.used = true;
            scopes.insert(symbol);
        }

        Self {
            scopes,
            function_depth: 0,
            predeclared: FxHashSet::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Analyzes `program`, replacing the errors and warnings of any
    /// previous call.
    pub fn analyze(&mut self, program: &Program) {
        self.errors.clear();
        self.warnings.clear();
        self.function_depth = 0;

        self.predeclare_functions(program);
        self.visit_program(program);

        debug!(
            "semantic analysis finished with {} errors and {} warnings",
            self.errors.len(),
            self.warnings.len()
        );
    }

    /// Errors from the last call to [`SemanticAnalyzer::analyze`].
    #[must_use]
    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    /// Warnings from the last call to [`SemanticAnalyzer::analyze`].
    #[must_use]
    pub fn warnings(&self) -> &[SemanticWarning] {
        &self.warnings
    }

    /// Checks if the last analysis found any errors (warnings excluded).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors followed by warnings, as diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(Diagnostic::from)
            .chain(self.warnings.iter().map(Diagnostic::from))
            .collect()
    }

    /// The analyzer's scope table.
    #[must_use]
    pub fn scopes(&self) -> &ScopeTable {
        &self.scopes
    }

    fn error(&mut self, error: SemanticError) {
        trace!("semantic error: {}", error);
        self.errors.push(error);
    }

    /// Declares every top-level function before any statement is visited,
    /// so calls may precede declarations.
    ///
    /// A function redefined on a later REPL line replaces the old one; two
    /// declarations in the same program are an error.
    fn predeclare_functions(&mut self, program: &Program) {
        self.predeclared.clear();

        for decl in program.functions() {
            let symbol = Symbol::new(&decl.name, SymbolKind::Function, 0, decl.name_span);
            let replaceable = self
                .scopes
                .lookup_local(&decl.name)
                .is_some_and(|s| s.kind == SymbolKind::Function && !self.predeclared.contains(&decl.name));

            if self.scopes.insert(symbol.clone()) {
                self.predeclared.insert(decl.name.clone());
            } else if replaceable {
                self.scopes.define(symbol);
                self.predeclared.insert(decl.name.clone());
            } else {
                self.error(SemanticError::Redeclaration {
                    name: decl.name.clone(),
                    function: true,
                    span: decl.name_span,
                });
            }
        }
    }

    /// Enters a block scope.
    fn enter_scope(&mut self) {
        self.scopes.push_scope();
        trace!("entered scope {}", self.scopes.level());
    }

    /// Leaves the current scope, warning about variables never read.
    fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.pop_scope() {
            trace!("left scope {}", scope.level());
            self.warn_unused(&scope);
        }
    }

    fn warn_unused(&mut self, scope: &Scope) {
        for symbol in scope.unused_variables() {
            self.warnings.push(SemanticWarning::UnusedVariable {
                name: symbol.name.clone(),
                span: symbol.span,
            });
        }
    }

    fn declare(&mut self, symbol: Symbol) {
        let name = symbol.name.clone();
        let span = symbol.span;
        let function = symbol.kind == SymbolKind::Function;
        if !self.scopes.insert(symbol) {
            self.error(SemanticError::Redeclaration {
                name,
                function,
                span,
            });
        }
    }

    fn analyze_let(&mut self, name: &str, name_span: Span, init: Option<&Expr>) {
        let mut initialized = false;
        if let Some(init) = init {
            let errors_before = self.errors.len();
            self.visit_expr(init);
            initialized = self.errors.len() == errors_before;
        }

        let level = self.scopes.level();
        let symbol =
            Symbol::new(name, SymbolKind::Variable, level, name_span).initialized(initialized);
        self.declare(symbol);
    }

    fn analyze_function(&mut self, decl: &FunctionDecl) {
        let predeclared = self.scopes.is_global() && self.predeclared.contains(&decl.name);
        if !predeclared {
            let level = self.scopes.level();
            self.declare(Symbol::new(
                &decl.name,
                SymbolKind::Function,
                level,
                decl.name_span,
            ));
        }

        debug!("analyzing function '{}'", decl.name);
        self.function_depth += 1;
        self.enter_scope();

        let level = self.scopes.level();
        for param in &decl.params {
            self.declare(Symbol::new(
                &param.name,
                SymbolKind::Parameter,
                level,
                param.span,
            ));
        }
        for stmt in &decl.body {
            self.visit_stmt(stmt);
        }

        self.exit_scope();
        self.function_depth -= 1;
    }
}

impl Visitor for SemanticAnalyzer {
    type ExprOutput = ();
    type StmtOutput = ();

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}

            Expr::Variable { name, span } => match self.scopes.lookup_mut(name) {
                None => self.error(SemanticError::UndefinedVariable {
                    name: name.clone(),
                    span: *span,
                }),
                Some(symbol) => {
                    symbol.used = true;
                    if !symbol.initialized {
                        self.error(SemanticError::UninitializedVariable {
                            name: name.clone(),
                            span: *span,
                        });
                    }
                }
            },

            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }

            Expr::Unary { operand, .. } => self.visit_expr(operand),

            Expr::Call {
                callee,
                callee_span,
                args,
                ..
            } => {
                // Variables and parameters may hold functions; checked at runtime.
                match self.scopes.lookup_mut(callee) {
                    Some(symbol) => symbol.used = true,
                    None => self.error(SemanticError::UndefinedFunction {
                        name: callee.clone(),
                        span: *callee_span,
                    }),
                }
                for arg in args {
                    self.visit_expr(arg);
                }
            }

            Expr::Assign {
                name,
                name_span,
                value,
                ..
            } => {
                self.visit_expr(value);
                match self.scopes.lookup_mut(name) {
                    None => self.error(SemanticError::AssignToUndefined {
                        name: name.clone(),
                        span: *name_span,
                    }),
                    Some(symbol) if symbol.constant => {
                        self.error(SemanticError::AssignToConstant {
                            name: name.clone(),
                            span: *name_span,
                        });
                    }
                    Some(symbol) => symbol.initialized = true,
                }
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let {
                name,
                name_span,
                init,
                ..
            } => self.analyze_let(name, *name_span, init.as_ref()),

            Stmt::Expr { expr, .. } => self.visit_expr(expr),

            Stmt::Block { stmts, .. } => {
                self.enter_scope();
                for stmt in stmts {
                    self.visit_stmt(stmt);
                }
                self.exit_scope();
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition);
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch);
                }
            }

            Stmt::While {
                condition, body, ..
            } => {
                self.visit_expr(condition);
                self.visit_stmt(body);
            }

            Stmt::Function(decl) => self.analyze_function(decl),

            Stmt::Return { value, span } => {
                if self.function_depth == 0 {
                    self.error(SemanticError::ReturnOutsideFunction { span: *span });
                }
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_syntax::Parser;

    fn analyze(source: &str) -> SemanticAnalyzer {
        let mut parser = Parser::new(source);
        let program = parser.parse();
        assert!(!parser.has_errors(), "parse errors: {:?}", parser.errors());
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&program);
        analyzer
    }

    fn messages(source: &str) -> Vec<String> {
        analyze(source)
            .errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_valid_program() {
        let analyzer = analyze("let x = 10; let y = 20; let z = (x + y) * 3; print(z);");
        assert!(!analyzer.has_errors());
        assert!(analyzer.warnings().is_empty());
    }

    #[test]
    fn test_undefined_variable() {
        assert_eq!(messages("print(y);"), ["undefined variable 'y'"]);
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        assert_eq!(
            messages("let x = 1; let x = 2;"),
            ["variable 'x' is already declared in this scope"]
        );
    }

    #[test]
    fn test_shadowing_in_block_is_allowed() {
        let analyzer = analyze("let x = 1; { let x = 2; print(x); } print(x);");
        assert!(!analyzer.has_errors());
    }

    #[test]
    fn test_branch_bodies_are_scoped() {
        let expected = ["undefined variable 'y'"];
        assert_eq!(messages("if (true) then let y = 1; end; print(y);"), expected);
        assert_eq!(
            messages("if (true) then let y = 1; print(y); end; print(y);"),
            expected
        );
        assert_eq!(messages("while (false) do let y = 1; end; print(y);"), expected);
    }

    #[test]
    fn test_use_before_initialization() {
        assert_eq!(
            messages("let x; print(x);"),
            ["variable 'x' used before initialization"]
        );
        assert!(!analyze("let x; x = 3; print(x);").has_errors());
    }

    #[test]
    fn test_failed_initializer_leaves_uninitialized() {
        assert_eq!(
            messages("let y = nope; print(y);"),
            [
                "undefined variable 'nope'",
                "variable 'y' used before initialization"
            ]
        );
    }

    #[test]
    fn test_assignment_errors() {
        assert_eq!(
            messages("z = 1;"),
            ["cannot assign to undefined variable 'z'"]
        );
        assert_eq!(
            messages("function f() { return 1; } f = 2;"),
            ["cannot assign to constant 'f'"]
        );
        assert_eq!(messages("print = 2;"), ["cannot assign to constant 'print'"]);
    }

    #[test]
    fn test_forward_reference_to_function() {
        let analyzer = analyze("print(twice(2)); function twice(n: int): int { return n * 2; }");
        assert!(!analyzer.has_errors(), "{:?}", analyzer.errors());
    }

    #[test]
    fn test_undefined_function() {
        assert_eq!(messages("missing(1);"), ["undefined function 'missing'"]);
    }

    #[test]
    fn test_call_through_variable_is_accepted() {
        let source = "function make() { function inner() { return 1; } return inner; } \
                      let f = make(); print(f());";
        assert!(!analyze(source).has_errors());
    }

    #[test]
    fn test_return_outside_function() {
        assert_eq!(messages("return 1;"), ["return outside of function"]);
        assert!(!analyze("function f() { return; }").has_errors());
    }

    #[test]
    fn test_duplicate_parameters() {
        assert_eq!(
            messages("function f(a: int, a: int) { return a; }"),
            ["variable 'a' is already declared in this scope"]
        );
    }

    #[test]
    fn test_duplicate_top_level_function() {
        assert_eq!(
            messages("function f() { return; } function f() { return; }"),
            ["function 'f' is already declared in this scope"]
        );
    }

    #[test]
    fn test_unused_variable_warning() {
        let analyzer = analyze("function f() { let tmp = 1; let used = 2; return used; }");
        assert!(!analyzer.has_errors());
        let warnings: Vec<String> = analyzer.warnings().iter().map(ToString::to_string).collect();
        assert_eq!(warnings, ["unused variable 'tmp'"]);

        let diagnostics = analyzer.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_globals_are_never_reported_unused() {
        assert!(analyze("let x = 1;").warnings().is_empty());
    }

    #[test]
    fn test_errors_accumulate_over_whole_tree() {
        let errors = messages("print(a); { print(b); } function f() { print(c); }");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_global_scope_persists_between_calls() {
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&Parser::new("let x = 1; function f() { return x; }").parse());
        assert!(!analyzer.has_errors());

        analyzer.analyze(&Parser::new("print(x, f());").parse());
        assert!(!analyzer.has_errors(), "{:?}", analyzer.errors());

        // a later line may redefine a function
        analyzer.analyze(&Parser::new("function f() { return 2; }").parse());
        assert!(!analyzer.has_errors(), "{:?}", analyzer.errors());
    }
}
