use rand::SeedableRng;
use rand::rngs::StdRng;
use toy_curve::{CurveConfig, Fp2Field, Point};
use toy_pedersen::{
    MpcDealer, Pedersen, PedersenParams, PedersenVss, collect_shares, extract_shares, mpc_secret,
    shamir_recover, share_subset, unique_evaluation_points,
};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    let config = CurveConfig::new(101)
        .with_coefficients(0, 3)
        .with_rorder(17)
        .with_i_sqr(-2);
    let field = Fp2Field::new(101, -2).expect("field");
    let params = PedersenParams::from_base(&field, &Point::new(1, 2), &Point::new(12, 69));
    let pedersen = Pedersen::new(&config, params).expect("scheme");

    // Single dealer, 3-of-6.
    let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).expect("deal");
    let vss_bytes = bincode::serialize(&vss).expect("serialize vss");
    let vss: PedersenVss = bincode::deserialize(&vss_bytes).expect("deserialize vss");
    pedersen.verify_all(&vss).expect("verify vss");

    let subset = share_subset(&mut rng, &vss.plain_shares(), 3).expect("subset");
    let secret = shamir_recover(pedersen.order(), &subset).expect("recover");
    assert_eq!(secret, 13);

    // Every party deals, nobody learns the joint secret.
    let ids = unique_evaluation_points(&mut rng, pedersen.order(), 6).expect("ids");
    let dealers = MpcDealer::setup_all(&pedersen, &mut rng, 3, &ids).expect("setup");
    let joint = mpc_secret(&pedersen, &dealers);

    let collected = collect_shares(&dealers).expect("collect");
    pedersen.verify_collected(&collected).expect("verify collected");
    let aggregates = pedersen.aggregate_all(&collected).expect("aggregate");

    let agg_bytes = bincode::serialize(&aggregates).expect("serialize aggregates");
    let aggregates: Vec<_> = bincode::deserialize(&agg_bytes).expect("deserialize aggregates");

    let subset = share_subset(&mut rng, &extract_shares(&aggregates), 3).expect("subset");
    let recovered = shamir_recover(pedersen.order(), &subset).expect("recover");
    assert_eq!(recovered, joint);

    println!("vss secret {secret}, joint secret {recovered}");
}
