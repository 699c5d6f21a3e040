//! Pedersen verifiable secret sharing.
//!
//! The dealer shares a secret with a polynomial `f` and a random blinding
//! polynomial `g` of the same degree, then publishes `Cⱼ = fⱼ·G + gⱼ·H` for
//! every coefficient pair. A party holding `(f(id), g(id))` checks
//!
//! ```text
//! f(id)·G + g(id)·H == Σ idʲ·Cⱼ
//! ```
//!
//! without learning anything about the secret beyond its own share.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use toy_curve::ExtPoint;
use toy_curve::modular::raise_power;

use crate::commitment::Pedersen;
use crate::errors::PedersenError;
use crate::polynomial::Polynomial;
use crate::shamir::{Share, check_party_ids, check_threshold, unique_evaluation_points};

/// A party's evaluation of both the secret and the blinding polynomial.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlindedShare {
    pub id: i64,
    pub secret: i64,
    pub blinding: i64,
}

impl BlindedShare {
    /// The plain Shamir share, dropping the blinding value.
    pub fn share(&self) -> Share {
        Share {
            id: self.id,
            value: self.secret,
        }
    }
}

/// Output of a VSS dealer: one blinded share per party and the public
/// coefficient commitments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenVss {
    threshold: usize,
    shares: Vec<BlindedShare>,
    commitments: Vec<ExtPoint>,
}

impl PedersenVss {
    /// Deals `secret` to `parties` parties with freshly drawn ids.
    pub fn deal<R: Rng + ?Sized>(
        pedersen: &Pedersen,
        rng: &mut R,
        secret: i64,
        threshold: usize,
        parties: usize,
    ) -> Result<Self, PedersenError> {
        check_threshold(threshold, parties)?;
        let ids = unique_evaluation_points(rng, pedersen.order(), parties)?;
        Self::setup(pedersen, rng, secret, threshold, &ids)
    }

    /// Deals `secret` to the given party ids.
    ///
    /// Ids must be distinct and lie in `1..r`.
    pub fn setup<R: Rng + ?Sized>(
        pedersen: &Pedersen,
        rng: &mut R,
        secret: i64,
        threshold: usize,
        party_ids: &[i64],
    ) -> Result<Self, PedersenError> {
        let n = pedersen.order();
        check_threshold(threshold, party_ids.len())?;
        check_party_ids(n, party_ids)?;

        let f = Polynomial::random(rng, n, secret, threshold - 1)?;
        let blinding = rng.random_range(0..n);
        let g = Polynomial::random(rng, n, blinding, threshold - 1)?;

        let commitments = f
            .coefficients()
            .iter()
            .zip(g.coefficients())
            .map(|(fj, gj)| pedersen.commit(*fj, *gj))
            .collect::<Result<Vec<_>, _>>()?;

        let shares = party_ids
            .iter()
            .map(|&id| {
                Ok(BlindedShare {
                    id,
                    secret: f.evaluate(id)?,
                    blinding: g.evaluate(id)?,
                })
            })
            .collect::<Result<Vec<_>, PedersenError>>()?;

        debug!(
            "dealt {}-of-{} Pedersen VSS with {} commitments",
            threshold,
            party_ids.len(),
            commitments.len()
        );
        for share in &shares {
            trace!(
                "party {}: ({}, {})",
                share.id, share.secret, share.blinding
            );
        }

        Ok(Self {
            threshold,
            shares,
            commitments,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn shares(&self) -> &[BlindedShare] {
        &self.shares
    }

    pub fn commitments(&self) -> &[ExtPoint] {
        &self.commitments
    }

    pub fn party_ids(&self) -> Vec<i64> {
        self.shares.iter().map(|s| s.id).collect()
    }

    /// The blinded share dealt to party `id`.
    pub fn share_of(&self, id: i64) -> Result<&BlindedShare, PedersenError> {
        self.shares
            .iter()
            .find(|s| s.id == id)
            .ok_or(PedersenError::UnknownParty(id))
    }

    /// Plain Shamir shares for recovery.
    pub fn plain_shares(&self) -> Vec<Share> {
        self.shares.iter().map(BlindedShare::share).collect()
    }
}

impl Pedersen {
    /// Checks one blinded share against the dealer's commitments.
    ///
    /// Returns `Ok(false)` on a mismatch; errors are reserved for arithmetic
    /// failures.
    pub fn verify_share(
        &self,
        share: &BlindedShare,
        commitments: &[ExtPoint],
    ) -> Result<bool, PedersenError> {
        let lhs = self.commit(share.secret, share.blinding)?;

        let powers = (0..commitments.len() as i64)
            .map(|j| raise_power(share.id, j, self.order()))
            .collect::<Result<Vec<_>, _>>()?;
        let rhs = self.curve().linear_combination(commitments, &powers)?;

        trace!("party {}: {} vs {}", share.id, lhs, rhs);
        Ok(lhs == rhs)
    }

    /// Verifies every share of `vss`, failing on the first mismatch.
    pub fn verify_all(&self, vss: &PedersenVss) -> Result<(), PedersenError> {
        for share in vss.shares() {
            if !self.verify_share(share, vss.commitments())? {
                return Err(PedersenError::VerificationFailed(share.id));
            }
        }
        debug!("verified {} shares", vss.shares().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shamir::{shamir_recover, share_subset};
    use crate::tests::demo_scheme;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_deal_verify_recover() {
        let mut rng = StdRng::seed_from_u64(42);
        let pedersen = demo_scheme();
        let vss = PedersenVss::deal(&pedersen, &mut rng, 13, 3, 6).unwrap();

        assert_eq!(vss.threshold(), 3);
        assert_eq!(vss.shares().len(), 6);
        assert_eq!(vss.commitments().len(), 3);

        let first = vss.shares()[0];
        assert!(pedersen.verify_share(&first, vss.commitments()).unwrap());
        pedersen.verify_all(&vss).unwrap();

        let subset = share_subset(&mut rng, &vss.plain_shares(), 3).unwrap();
        assert_eq!(shamir_recover(pedersen.order(), &subset).unwrap(), 13);
    }

    #[test]
    fn test_tampered_share_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        let pedersen = demo_scheme();
        let vss = PedersenVss::deal(&pedersen, &mut rng, 7, 2, 4).unwrap();

        let mut share = vss.shares()[1];
        share.secret = (share.secret + 1) % pedersen.order();
        assert!(!pedersen.verify_share(&share, vss.commitments()).unwrap());

        let mut share = vss.shares()[2];
        share.blinding = (share.blinding + 5) % pedersen.order();
        assert!(!pedersen.verify_share(&share, vss.commitments()).unwrap());

        let mut forged = vss.clone();
        forged.shares[3].secret = (forged.shares[3].secret + 3) % pedersen.order();
        assert_eq!(
            pedersen.verify_all(&forged),
            Err(PedersenError::VerificationFailed(forged.shares[3].id))
        );
    }

    #[test]
    fn test_setup_with_given_ids() {
        let mut rng = StdRng::seed_from_u64(42);
        let pedersen = demo_scheme();
        let ids = [1, 4, 9, 16];
        let vss = PedersenVss::setup(&pedersen, &mut rng, 11, 4, &ids).unwrap();

        assert_eq!(vss.party_ids(), ids.to_vec());
        assert_eq!(vss.share_of(9).unwrap().id, 9);
        assert_eq!(vss.share_of(2), Err(PedersenError::UnknownParty(2)));
        pedersen.verify_all(&vss).unwrap();
        assert_eq!(shamir_recover(17, &vss.plain_shares()).unwrap(), 11);
    }

    #[test]
    fn test_setup_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let pedersen = demo_scheme();
        assert_eq!(
            PedersenVss::setup(&pedersen, &mut rng, 1, 2, &[3, 3]),
            Err(PedersenError::DuplicateShare(3))
        );
        assert!(PedersenVss::setup(&pedersen, &mut rng, 1, 2, &[0, 3]).is_err());
        assert!(matches!(
            PedersenVss::deal(&pedersen, &mut rng, 1, 5, 4),
            Err(PedersenError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            PedersenVss::deal(&pedersen, &mut rng, 1, 3, 8),
            Err(PedersenError::TooManyShares { .. })
        ));
    }
}
