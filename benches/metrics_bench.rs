//! Benchmarks for metric computation.

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dqdash::{Dataset, MetricsEngine, Record};
use serde_json::json;

const AGENCIES: [&str; 5] = ["NYPD", "DSNY", "HPD", "DOT", "DEP"];

fn create_dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            let mut record = Record::new();
            record.insert("unique_key".into(), json!(i.to_string()));
            record.insert("agency".into(), json!(AGENCIES[i % AGENCIES.len()]));
            record.insert("latitude".into(), json!(40.0 + (i % 100) as f64 / 100.0));
            if i % 7 != 0 {
                let day = 1 + i % 28;
                record.insert("created_date".into(), json!(format!("2024-02-{day:02}T12:00:00.000")));
            }
            record
        })
        .collect();
    Dataset::new(records)
}

fn bench_metrics(c: &mut Criterion) {
    let engine = MetricsEngine::new();
    let mut group = c.benchmark_group("metrics");

    for rows in [1_000usize, 10_000] {
        let dataset = create_dataset(rows);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("completeness", rows), &dataset, |b, ds| {
            b.iter(|| engine.completeness(black_box(ds), None));
        });
        group.bench_with_input(BenchmarkId::new("timeliness", rows), &dataset, |b, ds| {
            b.iter(|| engine.timeliness(black_box(ds), None));
        });
        group.bench_with_input(BenchmarkId::new("consistency", rows), &dataset, |b, ds| {
            b.iter(|| engine.consistency(black_box(ds), None));
        });
        group.bench_with_input(BenchmarkId::new("report", rows), &dataset, |b, ds| {
            b.iter(|| engine.generate_report(black_box(ds)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
