use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use toy_curve::{CurveConfig, Fp2, Point};

/// `y² = x³ + 3` over `F_101[i]/(i² + 2)` with generators of order 17.
pub(crate) fn demo_scheme() -> Pedersen {
    let config = CurveConfig::new(101)
        .with_coefficients(0, 3)
        .with_rorder(17)
        .with_i_sqr(-2);
    let params = PedersenParams::new(
        Point::new(Fp2::real(1), Fp2::real(2)),
        Point::new(Fp2::real(12), Fp2::real(69)),
    );
    Pedersen::new(&config, params).expect("demo scheme")
}

#[test]
fn test_vss_three_of_six() {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = demo_scheme();
    let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).expect("deal");

    let first = vss.shares()[0];
    assert!(
        pedersen
            .verify_share(&first, vss.commitments())
            .expect("verify")
    );
    pedersen.verify_all(&vss).expect("verify all");

    let subset = share_subset(&mut rng, &vss.plain_shares(), vss.commitments().len())
        .expect("subset");
    let secret = shamir_recover(pedersen.order(), &subset).expect("recover");
    assert_eq!(secret, 13);
}

#[test]
fn test_mpc_six_parties() {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = demo_scheme();
    let ids = unique_evaluation_points(&mut rng, pedersen.order(), 6).expect("ids");

    let dealers = MpcDealer::setup_all(&pedersen, &mut rng, 3, &ids).expect("setup");
    let secret = mpc_secret(&pedersen, &dealers);

    let collected = collect_shares(&dealers).expect("collect");
    pedersen.verify_collected(&collected).expect("verify");
    let aggregates = pedersen.aggregate_all(&collected).expect("aggregate");

    let subset = share_subset(&mut rng, &extract_shares(&aggregates), 3).expect("subset");
    assert_eq!(
        shamir_recover(pedersen.order(), &subset).expect("recover"),
        secret
    );
}

#[test]
fn test_below_threshold_does_not_recover() {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = demo_scheme();

    // Interpolating two points of a quadratic misses f(0) by a₂·x₁·x₂, which
    // is never zero.
    let misses = (0..pedersen.order())
        .filter(|&secret| {
            let vss = PedersenVss::deal(&pedersen, &mut rng, secret, 3, 6).expect("deal");
            let pair = &vss.plain_shares()[..2];
            shamir_recover(pedersen.order(), pair).expect("recover") != secret
        })
        .count();
    assert_eq!(misses, pedersen.order() as usize);
}

#[test]
fn test_serialize_vss() {
    let mut rng = StdRng::seed_from_u64(42);
    let pedersen = demo_scheme();
    let vss = PedersenVss::deal(&pedersen, &mut rng, 5, 2, 3).expect("deal");

    let bytes = bincode::serialize(&vss).expect("serialize vss");
    let decoded: PedersenVss = bincode::deserialize(&bytes).expect("deserialize vss");
    assert_eq!(decoded, vss);
    pedersen.verify_all(&decoded).expect("verify decoded");

    let params = bincode::serialize(pedersen.params()).expect("serialize params");
    let params: PedersenParams = bincode::deserialize(&params).expect("deserialize params");
    assert_eq!(&params, pedersen.params());
}

#[test]
fn test_error_wraps_curve_error() {
    let err: PedersenError = toy_curve::Error::MissingField("rorder").into();
    assert_eq!(err.to_string(), "rorder required");
    assert_eq!(
        PedersenError::VerificationFailed(4).to_string(),
        "share of party 4 does not match the commitments"
    );
}
