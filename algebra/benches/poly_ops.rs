use criterion::{criterion_group, criterion_main, Criterion};
use num::bigint::RandBigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trisat_algebra::algebra::{mul, split};
use trisat_algebra::poly::SparsePoly;

fn rand_poly(rng: &mut StdRng, n: usize, terms: usize) -> SparsePoly {
    (0..terms).map(|_| rng.gen_biguint(n as u64)).collect()
}

fn bench_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 256;
    let p = rand_poly(&mut rng, n, 200);
    let q = rand_poly(&mut rng, n, 200);
    c.bench_function("mul 200x200 n=256", |b| b.iter(|| mul(&p, &q)));
}

fn bench_split(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(43);
    let n = 256;
    let p = rand_poly(&mut rng, n, 2000);
    c.bench_function("split 2000 n=256", |b| b.iter(|| split(&p, n / 2, n)));
}

criterion_group!(benches, bench_mul, bench_split);
criterion_main!(benches);
