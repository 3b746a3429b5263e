//! Diagnostics and error reporting shared by every Sable pass.
//!
//! Each pass (parser, analyzer, type checker, interpreter) reports problems as
//! [`Diagnostic`] values tagged with the [`DiagnosticKind`] of failure and the
//! [`Stage`] that found it. The [`Emitter`] renders them with source
//! highlighting.

use crate::error::SyntaxError;
use crate::span::Span;
use std::fmt;
use std::fmt::Write as _;

/// A diagnostic message (error, warning, note, or help).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Diagnostic level
    pub level: DiagnosticLevel,
    /// What kind of failure this is
    pub kind: DiagnosticKind,
    /// The pass that reported it
    pub stage: Stage,
    /// Error code (e.g., "E0001")
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Source span
    pub span: Span,
    /// Optional suggestions
    pub suggestions: Vec<String>,
    /// Related notes
    pub notes: Vec<DiagnosticNote>,
}

impl Diagnostic {
    /// Creates an error-level diagnostic.
    #[must_use]
    pub fn error(kind: DiagnosticKind, stage: Stage, message: impl Into<String>, span: Span) -> Self {
        DiagnosticBuilder::new(DiagnosticLevel::Error, kind, stage, message.into(), span).build()
    }

    /// Creates a warning-level diagnostic.
    #[must_use]
    pub fn warning(kind: DiagnosticKind, stage: Stage, message: impl Into<String>, span: Span) -> Self {
        DiagnosticBuilder::new(DiagnosticLevel::Warning, kind, stage, message.into(), span).build()
    }

    /// Returns `true` if this diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        match error {
            SyntaxError::Lexer(err) => Self::error(
                DiagnosticKind::Lexical,
                Stage::Lexer,
                err.to_string(),
                err.span(),
            ),
            SyntaxError::Parser(err) => Self::error(
                DiagnosticKind::Syntax,
                Stage::Parser,
                err.to_string(),
                err.span(),
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    /// Renders `[Syntax Error] (Parser) message at line L:C`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.level {
            DiagnosticLevel::Error => "Error",
            DiagnosticLevel::Warning => "Warning",
            DiagnosticLevel::Note => "Note",
            DiagnosticLevel::Help => "Help",
        };
        write!(
            f,
            "[{} {severity}] ({}) {} at line {}",
            self.kind, self.stage, self.message, self.span
        )
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Error: the pipeline stops after this stage
    Error,
    /// Warning: suspicious code, execution continues
    Warning,
    /// Note: additional information
    Note,
    /// Help: suggestion for fixing the issue
    Help,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
            Self::Help => write!(f, "help"),
        }
    }
}

impl DiagnosticLevel {
    /// Returns the ANSI color code for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",   // Red
            Self::Warning => "\x1b[33m", // Yellow
            Self::Note => "\x1b[36m",    // Cyan
            Self::Help => "\x1b[32m",    // Green
        }
    }

    /// Returns the reset ANSI code.
    #[must_use]
    pub const fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Formats this level with colors if enabled.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}{}", self.color_code(), self, Self::reset_code())
        } else {
            format!("{self}")
        }
    }
}

/// The category of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed token
    Lexical,
    /// Malformed statement or expression
    Syntax,
    /// Name resolution or type error
    Semantic,
    /// Failure while executing
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "Lexical"),
            Self::Syntax => write!(f, "Syntax"),
            Self::Semantic => write!(f, "Semantic"),
            Self::Runtime => write!(f, "Runtime"),
        }
    }
}

/// The pipeline stage that reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Tokenization
    Lexer,
    /// Parsing
    Parser,
    /// Declaration/use validation
    SemanticAnalyzer,
    /// Static typing
    TypeChecker,
    /// Execution
    Interpreter,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer => write!(f, "Lexer"),
            Self::Parser => write!(f, "Parser"),
            Self::SemanticAnalyzer => write!(f, "Semantic Analyzer"),
            Self::TypeChecker => write!(f, "Type Checker"),
            Self::Interpreter => write!(f, "Interpreter"),
        }
    }
}

/// A note attached to a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticNote {
    /// Note message
    pub message: String,
    /// Source span
    pub span: Span,
}

/// Builder for creating diagnostics.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new(
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        stage: Stage,
        message: String,
        span: Span,
    ) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                kind,
                stage,
                code: None,
                message,
                span,
                suggestions: Vec::new(),
                notes: Vec::new(),
            },
        }
    }

    /// Adds an error code to the diagnostic.
    #[must_use]
    pub fn code(mut self, code: String) -> Self {
        self.diagnostic.code = Some(code);
        self
    }

    /// Adds a suggestion to the diagnostic.
    #[must_use]
    pub fn suggest(mut self, suggestion: String) -> Self {
        self.diagnostic.suggestions.push(suggestion);
        self
    }

    /// Adds a note to the diagnostic.
    #[must_use]
    pub fn note(mut self, message: String, span: Span) -> Self {
        self.diagnostic.notes.push(DiagnosticNote { message, span });
        self
    }

    /// Builds the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Counts the error-level diagnostics in a list.
#[must_use]
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Emitter for diagnostics.
///
/// Formats diagnostics with source highlighting.
pub struct Emitter {
    /// Use colors in output
    use_colors: bool,
}

impl Emitter {
    /// Creates a new diagnostic emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Renders a diagnostic with source highlighting.
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut out = String::new();
        let span = diagnostic.span;

        let level_str = diagnostic.level.format_colored(self.use_colors);
        let _ = writeln!(
            out,
            "{}:{}: {}: {}",
            span.start_line, span.start_col, level_str, diagnostic.message
        );

        if let Some(code) = &diagnostic.code {
            let _ = writeln!(out, "   [{code}]");
        }

        self.render_source_highlight(&mut out, diagnostic.level, span, source);

        for suggestion in &diagnostic.suggestions {
            let help_prefix = DiagnosticLevel::Help.format_colored(self.use_colors);
            let _ = writeln!(out, "   {help_prefix}: {suggestion}");
        }

        for note in &diagnostic.notes {
            let note_prefix = DiagnosticLevel::Note.format_colored(self.use_colors);
            let _ = writeln!(
                out,
                "   {} at {}:{}: {}",
                note_prefix, note.span.start_line, note.span.start_col, note.message
            );
        }

        out
    }

    /// Renders the source line(s) under a span with a `^^^` underline.
    fn render_source_highlight(&self, out: &mut String, level: DiagnosticLevel, span: Span, source: &str) {
        let lines: Vec<&str> = source.lines().collect();

        if lines.is_empty() || span.start_line == 0 {
            return;
        }

        let start_line = (span.start_line - 1).min(lines.len() - 1);
        let end_line = span.end_line.saturating_sub(1).clamp(start_line, lines.len() - 1);

        for (line_idx, line) in lines.iter().enumerate().take(end_line + 1).skip(start_line) {
            let _ = writeln!(out, "{:4} | {line}", line_idx + 1);

            let line_start = if line_idx == start_line { span.start_col } else { 1 };
            let line_end = if line_idx == end_line {
                span.end_col
            } else {
                line.chars().count() + 1
            };

            let indent = line_start.saturating_sub(1);
            let width = line_end.saturating_sub(line_start).max(1);
            let carets = "^".repeat(width);

            if self.use_colors {
                let _ = writeln!(
                    out,
                    "     | {}{}{carets}{}",
                    " ".repeat(indent),
                    level.color_code(),
                    DiagnosticLevel::reset_code()
                );
            } else {
                let _ = writeln!(out, "     | {}{carets}", " ".repeat(indent));
            }
        }
    }
}
