//! Shamir secret sharing and Pedersen verifiable secret sharing over the toy
//! curves of `toy_curve`.
//!
//! Secrets, shares and polynomial coefficients live modulo the prime order
//! `r` of a subgroup generated by two curve points `G` and `H`. On top of
//! plain Shamir sharing the crate provides:
//! - Pedersen commitments `s·G + t·H`
//! - A VSS dealer whose shares every party can check against public
//!   commitments
//! - A dealerless (MPC) variant where every party deals a random secret and
//!   the shares are summed
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use toy_curve::{CurveConfig, Fp2, Point};
//! use toy_pedersen::{Pedersen, PedersenParams, PedersenVss, shamir_recover, share_subset};
//!
//! let config = CurveConfig::new(101)
//!     .with_coefficients(0, 3)
//!     .with_rorder(17)
//!     .with_i_sqr(-2);
//! let params = PedersenParams::new(
//!     Point::new(Fp2::real(1), Fp2::real(2)),
//!     Point::new(Fp2::real(12), Fp2::real(69)),
//! );
//! let pedersen = Pedersen::new(&config, params).expect("valid scheme");
//!
//! // 3-of-6 sharing of the secret 13
//! let mut rng = StdRng::seed_from_u64(42);
//! let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).expect("deal");
//! pedersen.verify_all(&vss).expect("all shares verify");
//!
//! let subset = share_subset(&mut rng, &vss.plain_shares(), 3).expect("subset");
//! let secret = shamir_recover(pedersen.order(), &subset).expect("recover");
//! assert_eq!(secret, 13);
//! ```
//!
//! # Security Considerations
//!
//! The field sizes are tiny and the randomness is whatever generator the
//! caller supplies. This crate is for studying the schemes, not for
//! protecting anything.

mod commitment;
mod constants;
mod errors;
mod mpc;
mod polynomial;
mod shamir;
mod vss;

#[cfg(test)]
mod tests;

pub use commitment::{Pedersen, PedersenParams};
pub use constants::MIN_THRESHOLD;
pub use errors::PedersenError;
pub use mpc::{
    AggregateShare, CollectedShares, MpcDealer, ReceivedShare, collect_shares, extract_shares,
    mpc_secret,
};
pub use polynomial::Polynomial;
pub use shamir::{Share, shamir_recover, shamir_split, share_subset, unique_evaluation_points};
pub use vss::{BlindedShare, PedersenVss};
