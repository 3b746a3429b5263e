//! Parser performance benchmarks for Sable.
//!
//! These benchmarks measure the throughput of parsing whole programs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sable_syntax::Parser;

/// Benchmark parsing expression statements
fn bench_expressions(c: &mut Criterion) {
    let source = r#"
1 + 2 * 3;
x + y * z;
(a + b) * (c + d);
f(a, b, g(c));
!done && -x < 4 || y == "s";
"#;

    let mut group = c.benchmark_group("parse/expressions");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("mixed", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(source));
            black_box(parser.parse())
        })
    });

    group.finish();
}

/// Benchmark parsing function declarations with control flow
fn bench_functions(c: &mut Criterion) {
    let source = r#"
function fib(n: int): int {
    if (n < 2) then
        return n;
    end;
    return fib(n - 1) + fib(n - 2);
}

function makeCounter() {
    let count = 0;
    function next(): int {
        count = count + 1;
        return count;
    }
    return next;
}
"#;

    let mut group = c.benchmark_group("parse/functions");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("functions", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(source));
            black_box(parser.parse())
        })
    });

    group.finish();
}

/// Benchmark parsing programs with errors (recovery path)
fn bench_recovery(c: &mut Criterion) {
    let source = "let = 1; print(2 +); let y = 3 let z = ; print(y);\n".repeat(20);

    c.bench_function("parse/recovery", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(&source));
            black_box(parser.parse())
        })
    });
}

/// Benchmark scaling with program size
fn bench_program_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/program_size");

    let block = "let i = 0;\nwhile (i < 10) do\n    print(i);\n    i = i + 1;\nend;\n";
    for size in [1, 10, 100] {
        let source = block.repeat(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let mut parser = Parser::new(black_box(source));
                black_box(parser.parse())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_expressions,
    bench_functions,
    bench_recovery,
    bench_program_size
);
criterion_main!(benches);
