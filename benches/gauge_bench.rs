//! Benchmarks for single-gauge evaluation and whole-report evaluation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use riskgauge::{
    build_report, classify, evaluate_metric, gauge_positions, DisplaySettings, Logic,
    MetricRegistry, ReportOptions,
};
use serde_json::{Map, Value};
use std::hint::black_box;

fn payload(registry: &MetricRegistry, seed: f64) -> Map<String, Value> {
    registry
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let scale = spec.gauge.scale();
            let fraction = ((i as f64 + seed) * 0.37).fract();
            let value = scale.min + (scale.max - scale.min) * fraction;
            (spec.id.clone(), Value::from(value))
        })
        .collect()
}

fn bench_primitives(c: &mut Criterion) {
    c.bench_function("gauge_positions", |b| {
        b.iter(|| gauge_positions(black_box(1.7), 0.0, 3.0, black_box(2.0), 1.0))
    });

    c.bench_function("classify_three_zone", |b| {
        b.iter(|| classify(black_box(1.5), Logic::LowerIsBetter, black_box(2.0), 1.0))
    });
}

fn bench_evaluate_metric(c: &mut Criterion) {
    let registry = MetricRegistry::builtin();
    let settings = DisplaySettings::default();
    let mut group = c.benchmark_group("evaluate_metric");
    for id in ["currentRatio", "altmanZScore", "springateSScore", "vecthorIndex", "dscr"] {
        group.bench_with_input(BenchmarkId::from_parameter(id), id, |b, id| {
            b.iter(|| evaluate_metric(&registry, black_box(id), black_box(1.234), &settings))
        });
    }
    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let registry = MetricRegistry::builtin();
    let settings = DisplaySettings::default();
    let options = ReportOptions::default();
    let payloads: Vec<_> = (0..100).map(|seed| payload(&registry, seed as f64)).collect();

    c.bench_function("build_report_100_payloads", |b| {
        b.iter(|| {
            for payload in &payloads {
                black_box(build_report(&registry, payload, &settings, &options));
            }
        })
    });
}

criterion_group!(benches, bench_primitives, bench_evaluate_metric, bench_reports);
criterion_main!(benches);
