// Lexer performance benchmarks for Sable
//
// These benchmarks measure tokenization throughput on representative inputs.

use criterion::{black_box, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sable_syntax::Lexer;

/// Lexes a simple statement with basic tokens.
fn bench_simple_statement(c: &mut Criterion) {
    let source = "let x = 42 + 10 * 5;";

    c.bench_function("simple_statement", |b| {
        b.iter(|| Lexer::new(black_box(source)).tokenize())
    });
}

/// Lexes a function with several statements and a loop.
fn bench_function(c: &mut Criterion) {
    let source = r#"
        # sums the first n integers
        function sum(n: int): int {
            let total = 0;
            let i = 1;
            while (i <= n) do
                total = total + i;
                i = i + 1;
            end;
            return total;
        }
    "#;

    c.bench_function("function", |b| {
        b.iter(|| Lexer::new(black_box(source)).tokenize())
    });
}

/// Lexes a complex expression with many operators.
fn bench_complex_expression(c: &mut Criterion) {
    let source = "((a + b) * (c - d) / e) + (f * g - h / i) % j <= k && !l || m != n";

    c.bench_function("complex_expression", |b| {
        b.iter(|| Lexer::new(black_box(source)).tokenize())
    });
}

/// Benchmarks lexing different sizes of input to measure throughput.
fn bench_input_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_size");

    let base_line = "let x = 42 + 10 * 5; print(\"value\", x, 3.25);\n";

    for size in [1, 10, 100, 1000] {
        let source = base_line.repeat(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| Lexer::new(black_box(source)).tokenize())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_statement,
    bench_function,
    bench_complex_expression,
    bench_input_size
);
criterion_main!(benches);
