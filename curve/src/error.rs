//! Error types shared by every arithmetic layer of the crate.

use thiserror::Error;

/// Broad classification of an [`Error`].
///
/// Test harnesses use the kind to separate expected degenerate outcomes
/// (a chord whose slope has no inverse, a point pair that leaves no valid
/// divisor support) from genuine misconfiguration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required curve-descriptor field is missing.
    Configuration,
    /// Division by an element with no inverse.
    Arithmetic,
    /// An operation was invoked on inputs that violate its precondition.
    Domain,
    /// An internal invariant failed, usually because the field is not prime
    /// or a point is not actually on the curve.
    Consistency,
}

/// Errors raised by modular, field, curve and pairing arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The curve descriptor lacks a field required by the operation.
    #[error("{0} required")]
    MissingField(&'static str),

    /// An argument is outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `value` has no multiplicative inverse modulo `modulus`.
    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: i64, modulus: i64 },

    /// The norm of an extension-field divisor kept an imaginary component.
    #[error("unexpected complex component in divisor")]
    UnexpectedComplexDivisor,

    /// A mathematical precondition of the operation does not hold.
    #[error("{0}")]
    Domain(String),

    /// A computed value contradicts an invariant of the group.
    #[error("{0}")]
    Consistency(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_) => ErrorKind::Configuration,
            Error::NotInvertible { .. } | Error::UnexpectedComplexDivisor => ErrorKind::Arithmetic,
            Error::InvalidArgument(_) | Error::Domain(_) => ErrorKind::Domain,
            Error::Consistency(_) => ErrorKind::Consistency,
        }
    }

    /// True when the error is an expected "not computed" outcome for a
    /// specific input rather than a fault of the configuration.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.kind(), ErrorKind::Arithmetic | ErrorKind::Domain)
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Error::Domain(msg.into())
    }

    pub(crate) fn consistency(msg: impl Into<String>) -> Self {
        Error::Consistency(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
