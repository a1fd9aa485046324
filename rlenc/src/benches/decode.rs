use crate::generate;
use criterion::{criterion_group, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng as _};
use rlenc::{decode, encode, System};

fn bench_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for len in [1 << 10, 1 << 16, 1 << 20] {
        for mean_run in [1, 8, 256] {
            c.bench_function(
                &format!("{}/len={len} run={mean_run}", module_path!()),
                |b| {
                    b.iter_batched(
                        || encode(&generate(&mut rng, len, mean_run), &System).to_vec(),
                        |encoded| decode(&encoded, &System).unwrap().len(),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_decode
}
