mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use streambed::prelude::define_subregions;

fn partition_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition/define_subregions");
    let iterations = 1_000usize;

    for &count in &[1u32, 16, 256, 4096] {
        group.throughput(common::elements_throughput(count as usize));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let subregions = define_subregions(65_536, count, iterations);
                black_box(subregions)
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = partition_benches
}
criterion_main!(benches);
