//! Dealerless secret generation from several Pedersen VSS instances.
//!
//! Every party acts as a dealer for its own random secret over the same set
//! of party ids. Each party then sums the shares it received, and the
//! commitments add up pointwise, so the aggregate shares belong to the sum of
//! all secrets without anyone having seen it.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use toy_curve::ExtPoint;

use crate::commitment::Pedersen;
use crate::errors::PedersenError;
use crate::shamir::Share;
use crate::vss::{BlindedShare, PedersenVss};

/// One party's contribution: its random secret and the VSS dealing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpcDealer {
    id: i64,
    secret: i64,
    vss: PedersenVss,
}

/// A share received from one dealer, with that dealer's commitments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedShare {
    pub dealer: i64,
    pub share: BlindedShare,
    pub commitments: Vec<ExtPoint>,
}

/// Everything a single party received from all dealers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedShares {
    pub party: i64,
    pub received: Vec<ReceivedShare>,
}

/// A party's summed share and the summed commitments that vouch for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateShare {
    pub share: BlindedShare,
    pub commitments: Vec<ExtPoint>,
}

impl MpcDealer {
    /// Party `id` draws a random secret and deals it to `party_ids`.
    pub fn setup<R: Rng + ?Sized>(
        pedersen: &Pedersen,
        rng: &mut R,
        id: i64,
        threshold: usize,
        party_ids: &[i64],
    ) -> Result<Self, PedersenError> {
        let secret = rng.random_range(0..pedersen.order());
        let vss = PedersenVss::setup(pedersen, rng, secret, threshold, party_ids)?;
        Ok(Self { id, secret, vss })
    }

    /// Runs [`MpcDealer::setup`] once for every party id.
    pub fn setup_all<R: Rng + ?Sized>(
        pedersen: &Pedersen,
        rng: &mut R,
        threshold: usize,
        party_ids: &[i64],
    ) -> Result<Vec<Self>, PedersenError> {
        party_ids
            .iter()
            .map(|&id| Self::setup(pedersen, rng, id, threshold, party_ids))
            .collect()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    pub fn vss(&self) -> &PedersenVss {
        &self.vss
    }
}

/// The joint secret: the sum of every dealer's secret modulo `r`.
///
/// Only a test or simulation can compute this; real parties never see the
/// individual secrets.
pub fn mpc_secret(pedersen: &Pedersen, dealers: &[MpcDealer]) -> i64 {
    let n = pedersen.order();
    let secret = dealers.iter().fold(0, |acc, d| (acc + d.secret) % n);
    debug!("MPC secret {secret} from {} dealers", dealers.len());
    secret
}

/// Regroups the dealers' output by receiving party.
///
/// Every dealer must have dealt to the same party ids as the first one.
pub fn collect_shares(dealers: &[MpcDealer]) -> Result<Vec<CollectedShares>, PedersenError> {
    let first = dealers.first().ok_or(PedersenError::EmptyShares)?;

    first
        .vss
        .party_ids()
        .into_iter()
        .map(|party| {
            let received = dealers
                .iter()
                .map(|dealer| {
                    Ok(ReceivedShare {
                        dealer: dealer.id,
                        share: *dealer.vss.share_of(party)?,
                        commitments: dealer.vss.commitments().to_vec(),
                    })
                })
                .collect::<Result<Vec<_>, PedersenError>>()?;
            Ok(CollectedShares { party, received })
        })
        .collect()
}

/// Extracts the plain Shamir shares from aggregated output.
pub fn extract_shares(aggregates: &[AggregateShare]) -> Vec<Share> {
    aggregates.iter().map(|a| a.share.share()).collect()
}

impl Pedersen {
    /// Verifies every received share of every party against its dealer's
    /// commitments.
    pub fn verify_collected(&self, collected: &[CollectedShares]) -> Result<(), PedersenError> {
        for party in collected {
            for received in &party.received {
                if !self.verify_share(&received.share, &received.commitments)? {
                    return Err(PedersenError::VerificationFailed(received.share.id));
                }
            }
        }
        debug!("verified shares collected by {} parties", collected.len());
        Ok(())
    }

    /// Sums one party's received shares and commitments, then checks the
    /// sum against the summed commitments.
    pub fn aggregate(&self, collected: &CollectedShares) -> Result<AggregateShare, PedersenError> {
        let n = self.order();
        let curve = self.curve();
        let width = collected
            .received
            .first()
            .map(|r| r.commitments.len())
            .ok_or(PedersenError::EmptyShares)?;

        let mut share = BlindedShare {
            id: collected.party,
            secret: 0,
            blinding: 0,
        };
        let mut commitments = vec![ExtPoint::Infinity; width];

        for received in &collected.received {
            if received.share.id != collected.party {
                return Err(PedersenError::UnknownParty(received.share.id));
            }
            if received.commitments.len() != width {
                return Err(toy_curve::Error::InvalidArgument(format!(
                    "dealer {} published {} commitments, expected {width}",
                    received.dealer,
                    received.commitments.len()
                ))
                .into());
            }

            share.secret = (share.secret + received.share.secret) % n;
            share.blinding = (share.blinding + received.share.blinding) % n;
            for (sum, c) in commitments.iter_mut().zip(&received.commitments) {
                *sum = curve.add(sum, c)?;
            }
        }

        if !self.verify_share(&share, &commitments)? {
            return Err(PedersenError::VerificationFailed(collected.party));
        }
        debug!(
            "party {} aggregate share ({}, {})",
            share.id, share.secret, share.blinding
        );

        Ok(AggregateShare { share, commitments })
    }

    /// Runs [`Pedersen::aggregate`] for every party.
    pub fn aggregate_all(
        &self,
        collected: &[CollectedShares],
    ) -> Result<Vec<AggregateShare>, PedersenError> {
        collected.iter().map(|c| self.aggregate(c)).collect()
    }
}
