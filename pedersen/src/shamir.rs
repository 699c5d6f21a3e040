//! Shamir's threshold secret sharing over `Z/nZ`.

use std::collections::HashSet;

use log::{debug, trace};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use toy_curve::modular::{mod_inverse, multiply_mod, posmod};

use crate::constants::{MIN_PARTY_ID, MIN_THRESHOLD};
use crate::errors::PedersenError;
use crate::polynomial::Polynomial;

/// One evaluation `(id, f(id))` of the sharing polynomial.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    pub id: i64,
    pub value: i64,
}

/// Draws `count` distinct evaluation points from `1..modulus`.
///
/// The count must satisfy `2·count < modulus − 1` so that rejection sampling
/// stays cheap and the points leave room for the secret at zero.
pub fn unique_evaluation_points<R: Rng + ?Sized>(
    rng: &mut R,
    modulus: i64,
    count: usize,
) -> Result<Vec<i64>, PedersenError> {
    if 2 * count as i64 >= modulus - 1 {
        return Err(PedersenError::TooManyShares { count, modulus });
    }

    let mut used = HashSet::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let x = rng.random_range(MIN_PARTY_ID..modulus);
        if used.insert(x) {
            points.push(x);
        }
    }
    Ok(points)
}

pub(crate) fn check_threshold(threshold: usize, parties: usize) -> Result<(), PedersenError> {
    if threshold < MIN_THRESHOLD || threshold > parties {
        return Err(PedersenError::InvalidThreshold { threshold, parties });
    }
    Ok(())
}

/// Checks that every id is a distinct non-zero residue modulo `modulus`.
pub(crate) fn check_party_ids(modulus: i64, ids: &[i64]) -> Result<(), PedersenError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !(MIN_PARTY_ID..modulus).contains(id) {
            return Err(toy_curve::Error::InvalidArgument(format!(
                "party id {id} outside 1..{modulus}"
            ))
            .into());
        }
        if !seen.insert(*id) {
            return Err(PedersenError::DuplicateShare(*id));
        }
    }
    Ok(())
}

/// Splits `secret` into `parties` shares, any `threshold` of which recover it.
///
/// The sharing polynomial has degree `threshold − 1` and is evaluated at
/// fresh random points.
pub fn shamir_split<R: Rng + ?Sized>(
    rng: &mut R,
    modulus: i64,
    secret: i64,
    threshold: usize,
    parties: usize,
) -> Result<Vec<Share>, PedersenError> {
    check_threshold(threshold, parties)?;

    let poly = Polynomial::random(rng, modulus, secret, threshold - 1)?;
    let shares = unique_evaluation_points(rng, modulus, parties)?
        .into_iter()
        .map(|id| {
            Ok(Share {
                id,
                value: poly.evaluate(id)?,
            })
        })
        .collect::<Result<Vec<_>, PedersenError>>()?;

    debug!("split secret into {parties} shares, threshold {threshold}");
    for share in &shares {
        trace!("share ({}, {})", share.id, share.value);
    }

    Ok(shares)
}

/// Picks `size` shares at random, without repetition.
///
/// Asking for every share returns them all in their original order.
pub fn share_subset<R: Rng + ?Sized, T: Clone>(
    rng: &mut R,
    shares: &[T],
    size: usize,
) -> Result<Vec<T>, PedersenError> {
    if size < 1 || size > shares.len() {
        return Err(PedersenError::InvalidSubsetSize {
            size,
            available: shares.len(),
        });
    }
    if size == shares.len() {
        return Ok(shares.to_vec());
    }

    Ok(shares.choose_multiple(rng, size).cloned().collect())
}

/// Recovers `f(0)` from shares by Lagrange interpolation.
///
/// Supplying fewer shares than the threshold yields an unrelated value; the
/// caller is responsible for providing enough of them.
pub fn shamir_recover(modulus: i64, shares: &[Share]) -> Result<i64, PedersenError> {
    if shares.is_empty() {
        return Err(PedersenError::EmptyShares);
    }

    let xs = shares
        .iter()
        .map(|s| posmod(s.id, modulus))
        .collect::<Result<Vec<_>, _>>()?;
    let mut seen = HashSet::with_capacity(xs.len());
    for (x, share) in xs.iter().zip(shares) {
        if !seen.insert(*x) {
            return Err(PedersenError::DuplicateShare(share.id));
        }
    }

    let mut secret = 0;
    for (j, share) in shares.iter().enumerate() {
        // l_j(0) = Π x_m / (x_m − x_j) over m ≠ j
        let mut top = 1;
        let mut bot = 1;
        for (m, x) in xs.iter().enumerate() {
            if m == j {
                continue;
            }
            top = multiply_mod(top, *x, modulus)?;
            bot = multiply_mod(bot, posmod(x - xs[j], modulus)?, modulus)?;
        }
        let basis = multiply_mod(top, mod_inverse(modulus, bot)?, modulus)?;
        let value = posmod(share.value, modulus)?;
        secret = (secret + multiply_mod(value, basis, modulus)?) % modulus;
    }

    debug!("recovered Shamir secret {secret}");
    Ok(secret)
}
