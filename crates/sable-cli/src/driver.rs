//! The compilation pipeline.
//!
//! A [`Session`] runs source text through parsing, semantic analysis, type
//! checking and execution, stopping at the first stage that reports errors.
//! Its passes persist between runs so a REPL line can use what earlier lines
//! defined.

use crate::config::{self, Config};
use sable_interpreter::{Interpreter, Io};
use sable_log::{debug, info};
use sable_syntax::{Diagnostic, Emitter, Parser, PrettyPrinter, pretty::PrettyConfig};
use sable_typecheck::{SemanticAnalyzer, TypeChecker};
use std::fmt::{self, Write as _};
use std::io::{self, BufRead, Write};
use std::thread;

/// Native stack given to [`on_large_stack`] threads; enough for
/// [`sable_interpreter::interpreter::DEFAULT_MAX_CALL_DEPTH`] nested calls.
pub const STACK_SIZE: usize = 512 * 1024 * 1024;

/// Runs `f` on a fresh thread with a [`STACK_SIZE`] stack and waits for it.
///
/// The tree-walking interpreter recurses on the native stack, so sessions
/// that may run deeply recursive programs belong on such a thread. A panic
/// in `f` is resumed on the calling thread.
pub fn on_large_stack<T, F>(f: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let worker = thread::Builder::new()
        .name("sable-session".to_string())
        .stack_size(STACK_SIZE)
        .spawn(f)?;
    Ok(worker
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
}

/// Pipeline stage that stopped a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    /// Lexing or parsing
    Parser,
    /// Name resolution
    Semantic,
    /// Type checking
    Type,
    /// Execution
    Runtime,
}

impl fmt::Display for FailedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = match self {
            Self::Parser => "Parser errors:",
            Self::Semantic => "Semantic errors:",
            Self::Type => "Type errors:",
            Self::Runtime => "Runtime errors:",
        };
        f.write_str(header)
    }
}

/// Outcome of one [`Session::run`].
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Stage that reported errors, if any
    pub failed: Option<FailedStage>,
    /// Errors of the failed stage
    pub diagnostics: Vec<Diagnostic>,
    /// Warnings from semantic analysis
    pub warnings: Vec<Diagnostic>,
}

/// How much of a [`Report`] to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Errors shown per stage before the rest are summarized
    pub max_errors: usize,
    /// Whether warnings are shown
    pub show_warnings: bool,
}

impl Default for RenderOptions {
    /// Options from the process-wide configuration.
    fn default() -> Self {
        Self::from_config(&config::snapshot())
    }
}

impl RenderOptions {
    /// Reads `max_errors` and `warnings` from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_errors: usize::try_from(config.get_int("max_errors", 10)).unwrap_or(0),
            show_warnings: config.get_bool("warnings", true),
        }
    }
}

impl Report {
    /// Returns `true` if every stage succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }

    /// Renders the failed stage's header and errors, followed by warnings.
    ///
    /// Returns an empty string when there is nothing to show.
    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        if let Some(stage) = self.failed {
            let _ = writeln!(out, "{stage}");
            render_capped(&mut out, &self.diagnostics, options.max_errors);
        }
        if options.show_warnings && !self.warnings.is_empty() {
            let _ = writeln!(out, "Warnings:");
            render_capped(&mut out, &self.warnings, options.max_errors);
        }
        out
    }

    /// Draws each error of the failed stage under the source line it points
    /// at, up to `max_errors` of them.
    #[must_use]
    pub fn render_snippets(&self, source: &str, options: &RenderOptions, use_colors: bool) -> String {
        let emitter = Emitter::new(use_colors);
        self.diagnostics
            .iter()
            .take(options.max_errors)
            .map(|diagnostic| emitter.render(diagnostic, source))
            .collect()
    }
}

fn render_capped(out: &mut String, diagnostics: &[Diagnostic], max: usize) {
    for diagnostic in diagnostics.iter().take(max) {
        let _ = writeln!(out, "  {diagnostic}");
    }
    if diagnostics.len() > max {
        let _ = writeln!(out, "  ... and {} more", diagnostics.len() - max);
    }
}

/// Persistent pipeline state.
#[derive(Debug, Default)]
pub struct Session {
    analyzer: SemanticAnalyzer,
    checker: TypeChecker,
    interpreter: Interpreter,
}

impl Session {
    /// Creates a session on standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose programs write to `output` and read from
    /// `input`.
    #[must_use]
    pub fn with_io(output: impl Write + 'static, input: impl BufRead + 'static) -> Self {
        Self::with_interpreter(Interpreter::new().with_io(output, input))
    }

    /// Creates a session around a configured interpreter.
    #[must_use]
    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        Self {
            analyzer: SemanticAnalyzer::new(),
            checker: TypeChecker::new(),
            interpreter,
        }
    }

    /// The program's streams.
    pub fn io_mut(&mut self) -> &mut Io {
        self.interpreter.io_mut()
    }

    /// Runs `source` through every stage.
    ///
    /// If analysis or type checking fails, both static passes are restored
    /// to their state before the call, so a rejected REPL line leaves no
    /// declarations behind.
    pub fn run(&mut self, source: &str) -> Report {
        let mut parser = Parser::new(source);
        let program = parser.parse();
        if parser.has_errors() {
            debug!("parsing failed with {} errors", parser.errors().len());
            return Report {
                failed: Some(FailedStage::Parser),
                diagnostics: parser.diagnostics(),
                warnings: Vec::new(),
            };
        }
        info!("parsed {} statements", program.statements.len());

        let snapshot = (self.analyzer.clone(), self.checker.clone());

        self.analyzer.analyze(&program);
        let warnings: Vec<Diagnostic> = self
            .analyzer
            .warnings()
            .iter()
            .map(Diagnostic::from)
            .collect();
        if self.analyzer.has_errors() {
            let diagnostics = self.analyzer.errors().iter().map(Diagnostic::from).collect();
            (self.analyzer, self.checker) = snapshot;
            return Report {
                failed: Some(FailedStage::Semantic),
                diagnostics,
                warnings,
            };
        }

        self.checker.check(&program);
        if self.checker.has_errors() {
            let diagnostics = self.checker.diagnostics();
            (self.analyzer, self.checker) = snapshot;
            return Report {
                failed: Some(FailedStage::Type),
                diagnostics,
                warnings,
            };
        }

        self.interpreter.interpret(&program);
        let failed = self.interpreter.has_errors().then_some(FailedStage::Runtime);
        Report {
            failed,
            diagnostics: self.interpreter.diagnostics(),
            warnings,
        }
    }
}

/// Parses `source` and renders it back with `indent_size` spaces per level.
///
/// Returns the parse report on failure.
pub fn dump_ast(source: &str, indent_size: usize) -> Result<String, Report> {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    if parser.has_errors() {
        return Err(Report {
            failed: Some(FailedStage::Parser),
            diagnostics: parser.diagnostics(),
            warnings: Vec::new(),
        });
    }
    Ok(PrettyPrinter::new()
        .with_config(PrettyConfig::with_indent_size(indent_size))
        .print_program(&program))
}
