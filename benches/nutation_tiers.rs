use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skyframe::nutation::{Nutation, NutationPrecision};

/// Uncached evaluation of each tier on random dates of the ephemeris window.
fn bench_tiers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x1A_2000);
    let samples = 1_000usize;

    for precision in [
        NutationPrecision::Full,
        NutationPrecision::Micro100,
        NutationPrecision::Milli1,
        NutationPrecision::Milli10,
    ] {
        let nutation = Nutation::new(precision);
        // Parse the table outside the timed section
        black_box(nutation.term_count());

        c.bench_function(&format!("nutation/compute/{precision:?}"), |b| {
            b.iter_batched(
                || {
                    (0..samples)
                        .map(|_| rng.random_range(30_000.0..80_000.0))
                        .collect::<Vec<f64>>()
                },
                |dates| {
                    for mjd in dates {
                        black_box(nutation.compute(black_box(mjd)));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
}

/// Repeated queries of the same instant go through the cache.
fn bench_cache_hits(c: &mut Criterion) {
    let nutation = Nutation::full();
    nutation.angles(60000.0);

    c.bench_function("nutation/angles/cache_hit", |b| {
        b.iter(|| black_box(nutation.angles(black_box(60000.001))))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_tiers, bench_cache_hits
);
criterion_main!(benches);
