use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use hwres::{ResourceAmount, ResourceProfile};

use crate::utils::create_profiles;

fn bench_sort_profiles(c: &mut Criterion) {
    for profile_count in [10, 1_000, 100_000] {
        c.bench_with_input(
            BenchmarkId::new("sort profiles", profile_count),
            &profile_count,
            |b, &profile_count| {
                b.iter_batched(
                    || create_profiles(profile_count),
                    |mut profiles| {
                        profiles.sort();
                        profiles
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_find_matching_profile(c: &mut Criterion) {
    let required = ResourceProfile::builder()
        .cpu_cores(ResourceAmount::new_units(12))
        .heap_memory_mb(1500)
        .build();
    for profile_count in [10, 1_000, 100_000] {
        let mut profiles = create_profiles(profile_count);
        profiles.sort();
        c.bench_with_input(
            BenchmarkId::new("find smallest matching profile", profile_count),
            &profiles,
            |b, profiles| {
                b.iter(|| {
                    profiles
                        .iter()
                        .find(|p| p.is_matching(black_box(&required)))
                        .cloned()
                });
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_sort_profiles(c);
    bench_find_matching_profile(c);
}
