//! Benchmark for the row parser across input sizes and delimiter shapes
//!
//! Run with: cargo bench --bench parse_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use splitcsv::pipeline::{parse, ParsingConfig};

/// Generate a blob of `n_rows` rows with `n_cols` fields, roughly 5% of rows
/// malformed so the rejection path is exercised too.
fn generate_blob(n_rows: usize, n_cols: usize, row_delim: &str, col_delim: &str, seed: u64) -> String {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let rows: Vec<String> = (0..n_rows)
        .map(|_| {
            let width = if rng.gen::<f64>() < 0.05 { n_cols + 1 } else { n_cols };
            (0..width)
                .map(|_| format!("{:.3}", rng.gen::<f64>() * 1000.0))
                .collect::<Vec<_>>()
                .join(col_delim)
        })
        .collect();

    rows.join(row_delim)
}

fn config(n_cols: usize, row_delim: &str, col_delim: &str) -> ParsingConfig {
    let names = (0..n_cols).map(|i| format!("col_{}", i)).collect();
    ParsingConfig::new("bench", row_delim, col_delim, names).expect("valid benchmark config")
}

/// Benchmark parse throughput for varying row counts
fn benchmark_row_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rows");

    for n_rows in [1_000, 10_000, 100_000] {
        let blob = generate_blob(n_rows, 8, "\n", ",", 42);
        let cfg = config(8, "\n", ",");
        group.throughput(Throughput::Bytes(blob.len() as u64));

        group.bench_with_input(BenchmarkId::new("newline_comma", n_rows), &blob, |b, blob| {
            b.iter(|| parse(black_box(blob), black_box(&cfg)));
        });
    }

    group.finish();
}

/// Benchmark single-character against multi-character delimiters
fn benchmark_delimiter_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_delimiters");

    let shapes = [("\n", ","), ("\n", "\t"), ("||", "::"), ("\r\n", " | ")];

    for (row_delim, col_delim) in shapes {
        let blob = generate_blob(10_000, 12, row_delim, col_delim, 7);
        let cfg = config(12, row_delim, col_delim);
        let label = format!("{:?}/{:?}", row_delim, col_delim);
        group.throughput(Throughput::Bytes(blob.len() as u64));

        group.bench_with_input(BenchmarkId::new("10000x12", label), &blob, |b, blob| {
            b.iter(|| parse(black_box(blob), black_box(&cfg)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_row_counts, benchmark_delimiter_shapes);
criterion_main!(benches);
