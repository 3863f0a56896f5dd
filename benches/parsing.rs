//! Parsing benchmarks
//!
//! Three workloads are benchmarked:
//! 1. Arithmetic - left-recursive sums and products
//! 2. CSV - repetition-heavy tabular data
//! 3. Diagnostics - failure reports with line/column estimation
//!
//! Run with: cargo bench --bench parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pegloom::{Grammar, GrammarBuilder, ReportOptions};

// ============================================================================
// Grammars
// ============================================================================

/// `sum = product : ("+" | "-") , product ; product = num : ("*" | "/") , num`
fn arithmetic() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.set_root("expr")
        .sequence("expr", &["sum", "END"])
        .choose("sum", &["sum-dlr", "product"])
        .sequence_dlr("sum-dlr", "product", &["add-op", "product"])
        .choose("product", &["product-dlr", "num"])
        .sequence_dlr("product-dlr", "num", &["mul-op", "num"])
        .choose("add-op", &["plus", "minus"])
        .choose("mul-op", &["times", "divide"])
        .str("plus", "+")
        .str("minus", "-")
        .str("times", "*")
        .str("divide", "/")
        .plus("num", "digit")
        .chr("digit", "0-9")
        .range("0-9", '0', '9');
    g.build().unwrap()
}

/// Comma separated fields, newline separated records
fn csv() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.set_root("file")
        .sequence("file", &["records", "END"])
        .plus("records", "record")
        .sequence("record", &["fields", "newline"])
        .sequence_dlr("fields", "field", &["comma", "field"])
        .star("field", "cell")
        .chr("cell", "text")
        .str("comma", ",")
        .str("newline", "\n")
        .range("all", '\0', char::MAX)
        .range("comma-char", ',', ',')
        .range("newline-char", '\n', '\n')
        .combine("separators", &["comma-char", "newline-char"])
        .exclude("text", "all", "separators");
    g.build().unwrap()
}

fn arithmetic_input(terms: usize) -> String {
    let mut s = String::from("1");
    for i in 0..terms {
        s.push(if i % 2 == 0 { '+' } else { '*' });
        s.push_str(&(i % 97).to_string());
    }
    s
}

fn csv_input(rows: usize) -> String {
    let mut s = String::new();
    for i in 0..rows {
        s.push_str(&format!("name{},{},city{}\n", i, i * 7, i % 13));
    }
    s
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_arithmetic(c: &mut Criterion) {
    let grammar = arithmetic();
    let parser = grammar.new_parser();
    let mut group = c.benchmark_group("arithmetic");

    for terms in [10, 100, 400] {
        let input = arithmetic_input(terms);
        group.throughput(Throughput::Elements(input.chars().count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(terms), &input, |b, input| {
            b.iter(|| parser.parse(black_box(input)).unwrap())
        });
    }
    group.finish();
}

fn bench_csv(c: &mut Criterion) {
    let grammar = csv();
    let parser = grammar.new_parser();
    let mut group = c.benchmark_group("csv");

    for rows in [10, 100, 1000] {
        let input = csv_input(rows);
        group.throughput(Throughput::Elements(input.chars().count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| parser.parse(black_box(input)).unwrap())
        });
    }
    group.finish();
}

fn bench_failure_report(c: &mut Criterion) {
    let grammar = csv();
    let parser = grammar.new_parser();
    let mut input = csv_input(500);
    // missing final newline
    input.push_str("broken,record");

    c.bench_function("failure_report", |b| {
        b.iter(|| {
            let output = parser.parse(black_box(&input)).unwrap();
            output.report(&ReportOptions::default())
        })
    });
}

criterion_group!(benches, bench_arithmetic, bench_csv, bench_failure_report);
criterion_main!(benches);
