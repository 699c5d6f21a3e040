use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use toy_curve::{CurveConfig, Fp2, Point};
use toy_pedersen::{Pedersen, PedersenParams, PedersenVss, shamir_recover};

fn scheme() -> Pedersen {
    let config = CurveConfig::new(101)
        .with_coefficients(0, 3)
        .with_rorder(17)
        .with_i_sqr(-2);
    let params = PedersenParams::new(
        Point::new(Fp2::real(1), Fp2::real(2)),
        Point::new(Fp2::real(12), Fp2::real(69)),
    );
    Pedersen::new(&config, params).expect("scheme")
}

fn bench_deal(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = scheme();

    c.bench_function("pedersen_vss_deal", |bencher| {
        bencher.iter(|| {
            let vss = PedersenVss::deal(&pedersen, &mut rng, black_box(13), 3, 6).expect("deal");
            black_box(vss);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = scheme();
    let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).expect("deal");

    c.bench_function("pedersen_vss_verify_all", |bencher| {
        bencher.iter(|| {
            pedersen.verify_all(black_box(&vss)).expect("verify");
        })
    });
}

fn bench_recover(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = scheme();
    let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).expect("deal");
    let shares = vss.plain_shares();

    c.bench_function("shamir_recover", |bencher| {
        bencher.iter(|| {
            let secret = shamir_recover(17, black_box(&shares[..3])).expect("recover");
            black_box(secret);
        })
    });
}

criterion_group!(benches, bench_deal, bench_verify, bench_recover);
criterion_main!(benches);
