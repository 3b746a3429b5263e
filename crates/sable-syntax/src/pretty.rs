//! Pretty-printer for the Sable syntax tree.
//!
//! Renders a [`Program`] back to canonical source. Used by `--dump-ast` and
//! for round-trip testing (parse → print → parse).

use crate::ast::expr::{Expr, Literal};
use crate::ast::stmt::{FunctionDecl, Program, Stmt};
use crate::ast::visit::Visitor;

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Indentation string (e.g., "    " or "\t")
    pub indent: String,
}

impl PrettyConfig {
    /// Indents with `width` spaces per level.
    #[must_use]
    pub fn with_indent_size(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self::with_indent_size(4)
    }
}

/// Pretty-printer for Sable programs.
///
/// ```
/// use sable_syntax::{Parser, PrettyPrinter};
///
/// let program = Parser::new("let  x=1+2 ;").parse();
/// let printed = PrettyPrinter::new().print_program(&program);
/// assert_eq!(printed, "let x = 1 + 2;\n");
/// ```
#[derive(Debug, Default)]
pub struct PrettyPrinter {
    /// Configuration
    config: PrettyConfig,
    /// Current indentation level
    indent_level: usize,
}

impl PrettyPrinter {
    /// Creates a new pretty-printer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PrettyConfig) -> Self {
        self.config = config;
        self
    }

    /// Renders a whole program, one top-level statement per line.
    pub fn print_program(&mut self, program: &Program) -> String {
        let mut out = String::new();
        for stmt in &program.statements {
            out.push_str(&self.visit_stmt(stmt));
            out.push('\n');
        }
        out
    }

    /// Returns the current indentation string.
    fn current_indent(&self) -> String {
        self.config.indent.repeat(self.indent_level)
    }

    /// Renders statements one level deeper, one per line.
    fn print_nested(&mut self, stmts: &[Stmt]) -> String {
        self.indent_level += 1;
        let lines: Vec<String> = stmts.iter().map(|stmt| self.visit_stmt(stmt)).collect();
        self.indent_level -= 1;
        lines.join("\n")
    }

    /// Renders an `if`/`while` body. The body block is written without
    /// braces since re-parsing groups the statements again.
    fn print_body(&mut self, body: &Stmt) -> String {
        match body {
            Stmt::Block { stmts, .. } => self.print_nested(stmts),
            other => self.print_nested(std::slice::from_ref(other)),
        }
    }

    /// Renders an operand, parenthesized when it would not re-parse with the
    /// same grouping.
    fn print_operand(&mut self, expr: &Expr) -> String {
        let text = self.visit_expr(expr);
        match expr {
            Expr::Binary { .. } | Expr::Assign { .. } => format!("({text})"),
            _ => text,
        }
    }

    fn print_function(&mut self, decl: &FunctionDecl) -> String {
        let indent = self.current_indent();
        let params = decl
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let return_type = decl
            .return_type
            .map(|ty| format!(": {ty}"))
            .unwrap_or_default();

        if decl.body.is_empty() {
            return format!("{indent}function {}({params}){return_type} {{}}", decl.name);
        }
        let body = self.print_nested(&decl.body);
        format!(
            "{indent}function {}({params}){return_type} {{\n{body}\n{indent}}}",
            decl.name
        )
    }
}

impl Visitor for PrettyPrinter {
    type ExprOutput = String;
    type StmtOutput = String;

    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Integer(v) => v.to_string(),
                Literal::Float(v) => format!("{v:?}"),
                Literal::Boolean(v) => v.to_string(),
                Literal::String(v) => format!("\"{v}\""),
            },

            Expr::Variable { name, .. } => name.clone(),

            Expr::Binary {
                left, op, right, ..
            } => {
                let left_str = self.print_operand(left);
                let right_str = self.print_operand(right);
                format!("{left_str} {op} {right_str}")
            }

            Expr::Unary { op, operand, .. } => {
                let operand_str = self.print_operand(operand);
                format!("{op}{operand_str}")
            }

            Expr::Call { callee, args, .. } => {
                let args_str = args
                    .iter()
                    .map(|arg| self.visit_expr(arg))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{callee}({args_str})")
            }

            Expr::Assign { name, value, .. } => {
                let value_str = self.visit_expr(value);
                format!("{name} = {value_str}")
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> String {
        let indent = self.current_indent();
        match stmt {
            Stmt::Let { name, init, .. } => match init {
                Some(init) => format!("{indent}let {name} = {};", self.visit_expr(init)),
                None => format!("{indent}let {name};"),
            },

            Stmt::Expr { expr, .. } => format!("{indent}{};", self.visit_expr(expr)),

            Stmt::Block { stmts, .. } => {
                if stmts.is_empty() {
                    return format!("{indent}{{}}");
                }
                let body = self.print_nested(stmts);
                format!("{indent}{{\n{body}\n{indent}}}")
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let cond = self.visit_expr(condition);
                let then_str = self.print_body(then_branch);
                let mut result = format!("{indent}if ({cond}) then\n{then_str}\n");
                if let Some(else_branch) = else_branch {
                    let else_str = self.print_body(else_branch);
                    result.push_str(&format!("{indent}else\n{else_str}\n"));
                }
                result.push_str(&format!("{indent}end;"));
                result
            }

            Stmt::While {
                condition, body, ..
            } => {
                let cond = self.visit_expr(condition);
                let body_str = self.print_body(body);
                format!("{indent}while ({cond}) do\n{body_str}\n{indent}end;")
            }

            Stmt::Function(decl) => self.print_function(decl),

            Stmt::Return { value, .. } => match value {
                Some(v) => format!("{indent}return {};", self.visit_expr(v)),
                None => format!("{indent}return;"),
            },
        }
    }
}
