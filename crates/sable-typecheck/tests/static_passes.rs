//! Integration tests running the semantic analyzer and type checker over
//! parsed programs.

use sable_syntax::{DiagnosticKind, Parser, Program, Stage};
use sable_typecheck::{SemanticAnalyzer, TypeChecker};

/// Helper to parse source that is expected to be syntactically valid.
fn parse_source(source: &str) -> Program {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    assert!(!parser.has_errors(), "parse errors: {:?}", parser.errors());
    program
}

/// Runs both passes and returns (semantic messages, type messages).
fn run_passes(source: &str) -> (Vec<String>, Vec<String>) {
    let program = parse_source(source);

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program);
    let semantic = analyzer.errors().iter().map(ToString::to_string).collect();

    let mut checker = TypeChecker::new();
    checker.check(&program);
    let types = checker.errors().iter().map(ToString::to_string).collect();

    (semantic, types)
}

#[test]
fn test_reference_programs_are_clean() {
    let programs = [
        "let x = 10; let y = 20; let z = (x + y) * 3 - 15 / 5; print(z);",
        "let i = 1; while (i <= 3) do print(i); i = i + 1; end;",
        "let x = 1; { let x = 2; print(x); } print(x);",
        "let s = \"a\"; let n = 1; print(s + n);",
        r#"
        function makeCounter() {
            let count = 0;
            function next(): int {
                count = count + 1;
                return count;
            }
            return next;
        }
        let counter = makeCounter();
        counter();
        print(counter());
        "#,
        r#"
        function fib(n: int): int {
            if (n < 2) then
                return n;
            end;
            return fib(n - 1) + fib(n - 2);
        }
        print(fib(10));
        "#,
    ];

    for source in programs {
        let (semantic, types) = run_passes(source);
        assert!(semantic.is_empty(), "{source}: {semantic:?}");
        assert!(types.is_empty(), "{source}: {types:?}");
    }
}

#[test]
fn test_type_mismatch_reported_by_checker_only() {
    let (semantic, types) = run_passes("print(true + 1);");
    assert!(semantic.is_empty());
    assert_eq!(
        types,
        ["type mismatch: operator '+' cannot be applied to 'bool' and 'int'"]
    );
}

#[test]
fn test_builtin_conversions() {
    let (semantic, types) = run_passes(
        "let n = toInt(\"42\"); let f = toFloat(n); let s = toString(f); \
         print(length(s), substring(s, 0, 2), concat(s, n, true));",
    );
    assert!(semantic.is_empty());
    assert!(types.is_empty(), "{types:?}");

    let (_, types) = run_passes("substring(\"abc\", \"0\", 1);");
    assert_eq!(
        types,
        ["type mismatch: argument 2 of 'substring' expects 'int' but got 'string'"]
    );
}

#[test]
fn test_diagnostic_stages() {
    let program = parse_source("function f() { let unused = 1; return x; }");

    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program);
    let diagnostics = analyzer.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0].to_string(),
        "[Semantic Error] (Semantic Analyzer) undefined variable 'x' at line 1:39"
    );
    assert_eq!(
        diagnostics[1].to_string(),
        "[Semantic Warning] (Semantic Analyzer) unused variable 'unused' at line 1:20"
    );

    let mut checker = TypeChecker::new();
    checker.check(&parse_source("let b = !1;"));
    let diagnostics = checker.diagnostics();
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Semantic);
    assert_eq!(diagnostics[0].stage, Stage::TypeChecker);
}
