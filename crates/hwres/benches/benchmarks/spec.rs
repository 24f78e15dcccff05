use criterion::{BatchSize, BenchmarkId, Criterion};
use hwres::ResourceSpec;

use crate::utils::create_cpu_specs;

fn bench_fold_group(c: &mut Criterion) {
    for spec_count in [10, 1_000, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("fold sharing group", spec_count),
            &spec_count,
            |b, &spec_count| {
                b.iter_batched_ref(
                    || create_cpu_specs(spec_count),
                    |specs| {
                        specs
                            .iter()
                            .try_fold(ResourceSpec::zero(), |acc, spec| acc.merge(spec))
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_fold_group(c);
}
