use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use toy_curve::{CurveConfig, ExtPoint, ExtensionCurve, Fp2};

fn pedersen_curve() -> ExtensionCurve {
    CurveConfig::new(101)
        .with_coefficients(0, 3)
        .with_i_sqr(-2)
        .extension_curve()
        .unwrap()
}

fn generators() -> (ExtPoint, ExtPoint) {
    (
        ExtPoint::new(Fp2::real(1), Fp2::real(2)),
        ExtPoint::new(Fp2::real(12), Fp2::real(69)),
    )
}

fn bench_affine_double(c: &mut Criterion) {
    let curve = pedersen_curve();
    let (g, _) = generators();
    c.bench_function("affine_double", |bencher| {
        bencher.iter(|| black_box(curve.double(black_box(&g))))
    });
}

fn bench_projective_double(c: &mut Criterion) {
    let curve = pedersen_curve();
    let (g, _) = generators();
    c.bench_function("projective_double", |bencher| {
        bencher.iter(|| black_box(curve.projective_double(black_box(&g))))
    });
}

fn bench_affine_add(c: &mut Criterion) {
    let curve = pedersen_curve();
    let (g, h) = generators();
    c.bench_function("affine_add", |bencher| {
        bencher.iter(|| black_box(curve.add(black_box(&g), black_box(&h))))
    });
}

fn bench_projective_add(c: &mut Criterion) {
    let curve = pedersen_curve();
    let (g, h) = generators();
    c.bench_function("projective_add", |bencher| {
        bencher.iter(|| black_box(curve.projective_add(black_box(&g), black_box(&h))))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let curve = pedersen_curve();
    let (g, _) = generators();
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = rng.random_range(1..17);

    c.bench_function("scalar_mul", |bencher| {
        bencher.iter(|| black_box(curve.scalar_mul(black_box(scalar), black_box(&g))))
    });
}

fn bench_linear_combination(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_combination");
    let curve = pedersen_curve();
    let (g, h) = generators();

    for size in [2, 4, 8, 16].iter() {
        let mut rng = StdRng::seed_from_u64(12345);

        let points: Vec<ExtPoint> = (0..*size)
            .map(|i| {
                let base = if i % 2 == 0 { g } else { h };
                curve.scalar_mul(i as i64 + 1, &base).unwrap()
            })
            .collect();
        let scalars: Vec<i64> = (0..*size).map(|_| rng.random_range(0..17)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bencher, _| {
            bencher.iter(|| {
                black_box(curve.linear_combination(black_box(&points), black_box(&scalars)))
            })
        });
    }
    group.finish();
}

fn bench_enumerate_points(c: &mut Criterion) {
    let curve = CurveConfig::new(19)
        .with_coefficients(14, 3)
        .extension_curve()
        .unwrap();
    c.bench_function("enumerate_points_p19", |bencher| {
        bencher.iter(|| black_box(curve.points()))
    });
}

criterion_group!(
    benches,
    bench_affine_double,
    bench_projective_double,
    bench_affine_add,
    bench_projective_add,
    bench_scalar_mul,
    bench_linear_combination,
    bench_enumerate_points
);
criterion_main!(benches);
