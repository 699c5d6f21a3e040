use criterion::{black_box, criterion_group, criterion_main, Criterion};
use toy_curve::{CurveConfig, ExtPoint, Fp2, PairingCurve};

fn ext(x: (i64, i64), y: (i64, i64)) -> ExtPoint {
    ExtPoint::new(Fp2::new(x.0, x.1), Fp2::new(y.0, y.1))
}

fn weil_curve() -> PairingCurve {
    CurveConfig::new(59)
        .with_coefficients(1, 0)
        .with_rorder(5)
        .pairing_curve()
        .unwrap()
}

fn bench_miller(c: &mut Criterion) {
    let pc = weil_curve();
    let p = ext((25, 0), (30, 0));
    let q = ext((34, 0), (0, 30));
    c.bench_function("miller", |bencher| {
        bencher.iter(|| black_box(pc.miller(black_box(&p), black_box(&q))))
    });
}

fn bench_weil_pairing(c: &mut Criterion) {
    let pc = weil_curve();
    let p = ext((25, 0), (30, 0));
    let q = ext((34, 0), (0, 30));
    let r = ext((40, 0), (54, 0));
    let s = ext((48, 55), (28, 51));
    c.bench_function("weil_pairing", |bencher| {
        bencher.iter(|| {
            black_box(pc.weil_pairing(black_box(&p), black_box(&q), black_box(&r), black_box(&s)))
        })
    });
}

fn bench_tate_basic(c: &mut Criterion) {
    let pc = CurveConfig::new(19)
        .with_coefficients(14, 3)
        .with_rorder(5)
        .pairing_curve()
        .unwrap();
    let p = ext((17, 0), (9, 0));
    let q = ext((16, 0), (0, 16));
    let r = ext((18, 2), (14, 5));
    c.bench_function("tate_basic", |bencher| {
        bencher.iter(|| black_box(pc.tate_basic(black_box(&p), black_box(&q), black_box(&r))))
    });
}

criterion_group!(benches, bench_miller, bench_weil_pairing, bench_tate_basic);
criterion_main!(benches);
