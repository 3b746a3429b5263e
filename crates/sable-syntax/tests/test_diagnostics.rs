//! Tests for diagnostic conversion and rendering of syntax errors.

use sable_syntax::diagnostic::error_count;
use sable_syntax::{Diagnostic, DiagnosticKind, Emitter, Parser, Stage};

fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
    let mut parser = Parser::new(source);
    parser.parse();
    parser.diagnostics()
}

#[test]
fn test_lexical_diagnostic() {
    let diagnostics = diagnostics_for("let x = 5 @ 3;");
    assert!(!diagnostics.is_empty());

    let first = &diagnostics[0];
    assert_eq!(first.kind, DiagnosticKind::Lexical);
    assert_eq!(first.stage, Stage::Lexer);
    assert_eq!(first.message, "unknown character '@'");
    assert_eq!(first.span.start_col, 11);
}

#[test]
fn test_syntax_diagnostic_display() {
    let diagnostics = diagnostics_for("print(1 +);");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].to_string(),
        "[Syntax Error] (Parser) expected expression, found ')' at line 1:10"
    );
}

#[test]
fn test_invalid_numeric_diagnostic() {
    let diagnostics = diagnostics_for("let big = 99999999999999999999;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Lexical);
    assert_eq!(
        diagnostics[0].message,
        "invalid numeric literal '99999999999999999999'"
    );
}

#[test]
fn test_all_parser_diagnostics_are_errors() {
    let diagnostics = diagnostics_for("let = 1; print(2 +); let ok = 3;");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(error_count(&diagnostics), 2);
}

#[test]
fn test_emitter_underlines_offending_token() {
    let source = "let a = 1;\nlet b = a +;";
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1);

    let rendered = Emitter::new(false).render(&diagnostics[0], source);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "2:12: error: expected expression, found ';'");
    assert_eq!(lines[1], "   2 | let b = a +;");
    assert_eq!(lines[2], "     |            ^");
}

#[test]
fn test_emitter_colors() {
    let source = "let = 1;";
    let diagnostics = diagnostics_for(source);
    let rendered = Emitter::new(true).render(&diagnostics[0], source);
    assert!(rendered.contains("\x1b[31merror\x1b[0m"));
}
