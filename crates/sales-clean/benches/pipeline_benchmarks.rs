//! Pipeline performance benchmarks.
//!
//! Measures loading and the cleaning transforms across different table sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sales_clean::{CleaningEngine, Parser, Transform};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Generate synthetic raw sales data with the specified number of rows.
///
/// Roughly one row in ten has a missing qty and one in seven a negative price.
fn generate_sales_data(rows: usize) -> String {
    let mut data = String::from(" ProdName ,Category,Price,Qty,Store Id\n");

    for row in 0..rows {
        let price = if row % 7 == 0 {
            format!("-{:.2}", row as f64 * 0.5)
        } else {
            format!("{:.2}", row as f64 * 1.5)
        };
        let qty = if row % 10 == 0 {
            String::new()
        } else {
            (row % 40).to_string()
        };
        data.push_str(&format!(
            "  Product_{:06} ,Category_{} ,{},{},S{}\n",
            row,
            row % 10,
            price,
            qty,
            row % 25
        ));
    }

    data
}

/// Benchmark loading files of various sizes.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_sales_data(*rows);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let parser = Parser::new();
                    black_box(parser.parse_file(temp.path()).unwrap())
                },
            )
        });
    }

    group.finish();
}

/// Benchmark the full transform chain on an in-memory table.
fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let engine = CleaningEngine::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_sales_data(*rows);
        let table = Parser::new()
            .parse_bytes(data.as_bytes(), Path::new("bench.csv"))
            .unwrap();

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter_with_setup(
                || table.clone(),
                |mut table| {
                    for transform in Transform::ORDER {
                        table = engine.apply(transform, table).unwrap().0;
                    }
                    black_box(table)
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_transforms);
criterion_main!(benches);
