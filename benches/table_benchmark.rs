use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sizeclass::config_set::literal;
use sizeclass::{generate, validate, ClassTableConfig, ConfigKey, ConfigurationSet, Table};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for key in ConfigKey::ALL {
        let config = ClassTableConfig::builtin(key);
        group.bench_with_input(BenchmarkId::from_parameter(key), &config, |b, config| {
            b.iter(|| generate(black_box(config)));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for key in ConfigKey::ALL {
        let config = ClassTableConfig::builtin(key);
        let classes = literal::certified(key);
        group.bench_with_input(BenchmarkId::from_parameter(key), &config, |b, config| {
            b.iter(|| validate(black_box(classes), config));
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    group.bench_function("builtin", |b| {
        b.iter(|| ConfigurationSet::builtin().assemble());
    });
    group.bench_function("generated", |b| {
        b.iter(|| ConfigurationSet::generated().assemble());
    });

    group.finish();
}

fn bench_class_index(c: &mut Criterion) {
    let key: ConfigKey = "8k-align8".parse().unwrap();
    let table = Table::from(literal::certified(key));

    c.bench_function("class_index_sweep", |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for request in (1..=262_144).step_by(97) {
                sum += table.class_index(black_box(request)).unwrap_or(0);
            }
            sum
        });
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_validate,
    bench_assemble,
    bench_class_index
);
criterion_main!(benches);
