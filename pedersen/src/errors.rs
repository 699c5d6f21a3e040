//! Error types for the Pedersen secret-sharing scheme.

use thiserror::Error;

/// Errors that can occur while dealing, verifying or recovering shares.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PedersenError {
    /// Curve, field or modular arithmetic failed underneath the scheme.
    #[error(transparent)]
    Curve(#[from] toy_curve::Error),

    /// The threshold is below the minimum or above the number of parties.
    ///
    /// A single share reveals the secret, so at least two are always needed.
    #[error("threshold {threshold} is invalid for {parties} parties")]
    InvalidThreshold { threshold: usize, parties: usize },

    /// Too many evaluation points were requested for the modulus.
    ///
    /// Share count must stay well below the field size so distinct random
    /// evaluation points can be drawn.
    #[error("{count} shares is too many for modulus {modulus}")]
    TooManyShares { count: usize, modulus: i64 },

    /// A share subset was asked for with a size of zero or larger than the
    /// available shares.
    #[error("cannot pick {size} of {available} shares")]
    InvalidSubsetSize { size: usize, available: usize },

    /// Two shares carry the same evaluation point.
    #[error("duplicate share for party {0}")]
    DuplicateShare(i64),

    /// Recovery was attempted with no shares.
    #[error("no shares to recover from")]
    EmptyShares,

    /// The Pedersen generators are not points of the requested order.
    #[error("invalid Pedersen generators: {0}")]
    InvalidParams(String),

    /// A blinded share does not match the published commitments.
    #[error("share of party {0} does not match the commitments")]
    VerificationFailed(i64),

    /// No share was dealt to the named party.
    #[error("party {0} has no share")]
    UnknownParty(i64),
}
