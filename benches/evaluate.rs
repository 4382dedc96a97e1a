//! Benchmarks for compiled expression evaluation.
//!
//! Includes:
//! - Re-evaluating a compiled expression while its variable changes,
//!   against the same arithmetic written in Rust
//! - Parsing and compiling throughput

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use arithc::{Context, interpreter::symbols::core::SymbolTable};

const EXPRESSION: &str = "1 / (a + 1) + 2 / (a + 2) + 3 / (a + 3)";

fn native(a: f64) -> f64 {
    1.0 / (a + 1.0) + 2.0 / (a + 2.0) + 3.0 / (a + 3.0)
}

/// Benchmark evaluation of a compiled expression against native code.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let mut table = SymbolTable::with_builtins();
    table.add_variable("a", 0.0, false);
    let expr = Context::silent().compile(EXPRESSION, &table)
                                .expect("benchmark expression compiles");
    let a = table.find_variable("a").expect("variable was added");

    for steps in [1_000u32, 100_000] {
        group.bench_with_input(BenchmarkId::new("compiled", steps), &steps, |b, &steps| {
                 b.iter(|| {
                      let mut sum = 0.0;
                      for i in 0..steps {
                          a.set(f64::from(i));
                          sum += expr.evaluate();
                      }
                      black_box(sum)
                  });
             });

        group.bench_with_input(BenchmarkId::new("native", steps), &steps, |b, &steps| {
                 b.iter(|| {
                      let mut sum = 0.0;
                      for i in 0..steps {
                          sum += native(black_box(f64::from(i)));
                      }
                      black_box(sum)
                  });
             });
    }

    group.finish();
}

/// Benchmark parsing and compiling.
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    let mut table = SymbolTable::with_builtins();
    table.add_variable("a", 0.0, false);
    let context = Context::silent();

    for (name, src) in [("variable", EXPRESSION),
                        ("constant", "sqrt(pow(3, 2) + pow(4, 2)) * pi_2 - ncr(10, 3) % 7"),
                        ("calls", "max(min(a, 1), logn(2, a + 8)) + sin(a) ^ 2 + cos(a) ^ 2")]
    {
        group.bench_function(name, |b| {
                 b.iter(|| black_box(context.compile(black_box(src), &table).is_ok()))
             });
    }

    group.bench_function("build_ast", |b| {
             b.iter(|| black_box(context.build_ast(black_box(EXPRESSION)).is_ok()))
         });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_compile);
criterion_main!(benches);
