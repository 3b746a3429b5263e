//! Tree-walking evaluation.
//!
//! The [`Interpreter`] walks the syntax tree directly. Statements produce an
//! [`ExecResult`] so a `return` can unwind through nested blocks and loops
//! up to the call that consumes it; expressions produce a [`Value`].
//!
//! Runtime failures are recorded with the location of the offending token
//! and the failing expression evaluates to `null`, so one bad expression
//! never stops the rest of the program.

use crate::environment::{EnvRef, Environment};
use crate::error::{RuntimeError, RuntimeResult, SpannedError};
use crate::io::Io;
use crate::native;
use crate::ops;
use crate::value::{Callable, UserFunction, Value};
use sable_log::{debug, trace};
use sable_syntax::ast::{Expr, Literal, Program, Stmt, Visitor};
use sable_syntax::{Diagnostic, Span};
use std::io::{BufRead, Write};
use std::rc::Rc;

/// Default limit on nested calls.
///
/// Deep recursion needs more native stack than a default thread has; the
/// `sable` binary runs programs on a thread sized for this limit.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    /// Control continues with the next statement
    Normal,
    /// A `return` is unwinding to the enclosing call
    Returning(Value),
}

/// Tree-walking interpreter with a persistent global environment.
///
/// # Examples
///
/// ```
/// use sable_interpreter::{Interpreter, SharedOutput};
/// use sable_syntax::Parser;
///
/// let output = SharedOutput::new();
/// let mut interpreter = Interpreter::new().with_io(output.clone(), std::io::empty());
///
/// let program = Parser::new("let x = 10; print(x / 4);").parse();
/// interpreter.interpret(&program);
///
/// assert!(!interpreter.has_errors());
/// assert_eq!(output.contents(), "2.5\n");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    /// Outermost environment, holding builtins and top-level definitions
    globals: EnvRef,
    /// Environment of the code currently running
    environment: EnvRef,
    /// Program output and input
    io: Io,
    /// Errors from the last `interpret` call
    errors: Vec<SpannedError>,
    /// Number of calls currently active
    call_depth: usize,
    max_call_depth: usize,
    /// Set when a call exceeds the depth limit; the rest of the current
    /// top-level statement is skipped
    aborting: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter on standard streams with the builtins defined.
    #[must_use]
    pub fn new() -> Self {
        let globals = Environment::new().into_ref();
        for builtin in &native::NATIVES {
            globals.borrow_mut().define(builtin.name, Value::native(builtin));
        }

        Self {
            environment: Rc::clone(&globals),
            globals,
            io: Io::stdio(),
            errors: Vec::new(),
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            aborting: false,
        }
    }

    /// Replaces the program's output and input streams.
    #[must_use]
    pub fn with_io(
        mut self,
        output: impl Write + 'static,
        input: impl BufRead + 'static,
    ) -> Self {
        self.io = Io::new(Box::new(output), Box::new(input));
        self
    }

    /// Sets the limit on nested calls.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Runs `program`, replacing the errors of any previous call.
    ///
    /// Top-level definitions stay in the global environment for later calls.
    pub fn interpret(&mut self, program: &Program) {
        self.errors.clear();
        self.call_depth = 0;
        self.environment = Rc::clone(&self.globals);

        for stmt in &program.statements {
            let result = self.visit_stmt(stmt);
            self.aborting = false;
            if let ExecResult::Returning(_) = result {
                break;
            }
        }

        if let Err(err) = self.io.flush() {
            self.report(RuntimeError::from(err), Span::default());
        }
        debug!("execution finished with {} errors", self.errors.len());
    }

    /// Evaluates a single expression in the current environment.
    pub fn evaluate(&mut self, expr: &Expr) -> Value {
        let value = self.visit_expr(expr);
        self.aborting = false;
        value
    }

    /// Errors from the last call to [`Interpreter::interpret`].
    #[must_use]
    pub fn errors(&self) -> &[SpannedError] {
        &self.errors
    }

    /// Checks if the last run raised any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The errors as diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(Diagnostic::from).collect()
    }

    /// Current value of the global `name`.
    #[must_use]
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }

    /// The program's streams. The REPL reads its lines through these so
    /// `input` and the prompt share one reader.
    pub fn io_mut(&mut self) -> &mut Io {
        &mut self.io
    }

    fn report(&mut self, error: RuntimeError, span: Span) {
        debug!("runtime error at {}:{}: {}", span.start_line, span.start_col, error);
        self.errors.push(SpannedError { error, span });
    }

    /// Runs `stmts` with `env` as the current environment, restoring the
    /// previous one afterwards.
    fn execute_block(&mut self, stmts: &[Stmt], env: EnvRef) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, env);
        let mut result = ExecResult::Normal;
        for stmt in stmts {
            result = self.visit_stmt(stmt);
            if self.aborting || matches!(result, ExecResult::Returning(_)) {
                break;
            }
        }
        self.environment = previous;
        result
    }

    fn call(&mut self, callee: &str, callee_span: Span, args: &[Expr]) -> Value {
        let found = self.environment.borrow().get(callee);
        let Some(value) = found else {
            self.report(
                RuntimeError::UndefinedVariable {
                    name: callee.to_string(),
                },
                callee_span,
            );
            return Value::Null;
        };

        let args: Vec<Value> = args.iter().map(|arg| self.visit_expr(arg)).collect();
        if self.aborting {
            return Value::Null;
        }

        let Value::Function(callable) = value else {
            self.report(RuntimeError::NotCallable, callee_span);
            return Value::Null;
        };
        if self.call_depth >= self.max_call_depth {
            self.report(RuntimeError::MaxCallDepth, callee_span);
            self.aborting = true;
            return Value::Null;
        }

        trace!("calling {} with {} arguments", callable.name(), args.len());
        self.call_depth += 1;
        let result = match &*callable {
            Callable::User(function) => self.call_user(function, args),
            Callable::Native(native) => native.call(&mut self.io, &args),
        };
        self.call_depth -= 1;

        result.unwrap_or_else(|error| {
            self.report(error, callee_span);
            Value::Null
        })
    }

    fn call_user(&mut self, function: &UserFunction, args: Vec<Value>) -> RuntimeResult<Value> {
        let params = &function.decl.params;
        if args.len() != params.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: params.len(),
                found: args.len(),
            });
        }

        let mut env = Environment::with_parent(Rc::clone(&function.closure));
        for (param, arg) in params.iter().zip(args) {
            env.define(param.name.as_str(), arg);
        }

        match self.execute_block(&function.decl.body, env.into_ref()) {
            ExecResult::Returning(value) => Ok(value),
            ExecResult::Normal => Ok(Value::Null),
        }
    }
}

impl Visitor for Interpreter {
    type ExprOutput = Value;
    type StmtOutput = ExecResult;

    fn visit_expr(&mut self, expr: &Expr) -> Value {
        if self.aborting {
            return Value::Null;
        }
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Integer(n) => Value::Integer(*n),
                Literal::Float(x) => Value::Float(*x),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::String(s) => Value::String(s.clone()),
            },

            Expr::Variable { name, span } => {
                let value = self.environment.borrow().get(name);
                value.unwrap_or_else(|| {
                    self.report(RuntimeError::UndefinedVariable { name: name.clone() }, *span);
                    Value::Null
                })
            }

            Expr::Binary {
                left,
                op,
                op_span,
                right,
                ..
            } => {
                let left = self.visit_expr(left);
                let right = self.visit_expr(right);
                if self.aborting {
                    return Value::Null;
                }
                ops::binary(*op, &left, &right).unwrap_or_else(|error| {
                    self.report(error, *op_span);
                    Value::Null
                })
            }

            Expr::Unary {
                op,
                op_span,
                operand,
                ..
            } => {
                let operand = self.visit_expr(operand);
                if self.aborting {
                    return Value::Null;
                }
                ops::unary(*op, &operand).unwrap_or_else(|error| {
                    self.report(error, *op_span);
                    Value::Null
                })
            }

            Expr::Call {
                callee,
                callee_span,
                args,
                ..
            } => self.call(callee, *callee_span, args),

            Expr::Assign {
                name,
                name_span,
                value,
                ..
            } => {
                let value = self.visit_expr(value);
                if self.aborting {
                    return Value::Null;
                }
                let assigned = self.environment.borrow_mut().assign(name, value.clone());
                if assigned {
                    value
                } else {
                    self.report(RuntimeError::UndefinedVariable { name: name.clone() }, *name_span);
                    Value::Null
                }
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        if self.aborting {
            return ExecResult::Normal;
        }
        match stmt {
            Stmt::Let { name, init, .. } => {
                let value = match init {
                    Some(init) => self.visit_expr(init),
                    None => Value::Null,
                };
                if self.aborting {
                    return ExecResult::Normal;
                }
                self.environment.borrow_mut().define(name.as_str(), value);
                ExecResult::Normal
            }

            Stmt::Expr { expr, .. } => {
                self.visit_expr(expr);
                ExecResult::Normal
            }

            Stmt::Block { stmts, .. } => {
                let env = Environment::with_parent(Rc::clone(&self.environment));
                self.execute_block(stmts, env.into_ref())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.visit_expr(condition).is_truthy() {
                    self.visit_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch)
                } else {
                    ExecResult::Normal
                }
            }

            Stmt::While {
                condition, body, ..
            } => {
                while self.visit_expr(condition).is_truthy() {
                    if let result @ ExecResult::Returning(_) = self.visit_stmt(body) {
                        return result;
                    }
                }
                ExecResult::Normal
            }

            Stmt::Function(decl) => {
                let function = Value::function(Rc::clone(decl), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(decl.name.as_str(), function);
                ExecResult::Normal
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.visit_expr(value),
                    None => Value::Null,
                };
                ExecResult::Returning(value)
            }
        }
    }
}
