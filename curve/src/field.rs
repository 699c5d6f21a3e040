//! Runtime-modulus finite fields.
//!
//! A field value is a small handle carrying its modulus (and for the
//! quadratic extension, the non-residue); elements are plain `Copy` values
//! that are always kept canonical by the handle that produced them.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::modular::{mod_inverse, mul_mod, square_and_multiply};

/// Arithmetic over a finite field whose parameters are only known at
/// runtime.
///
/// Every method takes canonical elements and returns canonical elements.
pub trait FiniteField: Clone + Debug {
    type Elem: Copy + Eq + Hash + Debug + Display;

    /// The prime `p` the field is built over.
    fn characteristic(&self) -> i64;

    fn zero(&self) -> Self::Elem;
    fn one(&self) -> Self::Elem;

    /// Embed an integer, reducing it modulo the characteristic.
    fn from_int(&self, value: i64) -> Self::Elem;

    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
    fn neg(&self, a: &Self::Elem) -> Self::Elem;
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `a / b`. Fails when `b` has no inverse.
    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Result<Self::Elem>;

    /// Every element of the field in a fixed order.
    fn elements(&self) -> Vec<Self::Elem>;

    #[inline]
    fn square(&self, a: &Self::Elem) -> Self::Elem {
        self.mul(a, a)
    }

    #[inline]
    fn is_zero(&self, a: &Self::Elem) -> bool {
        *a == self.zero()
    }

    #[inline]
    fn inverse(&self, a: &Self::Elem) -> Result<Self::Elem> {
        self.div(&self.one(), a)
    }

    /// `base^exponent` by square-and-multiply; the identity is `one()`.
    fn pow(&self, base: &Self::Elem, exponent: i64) -> Result<Self::Elem> {
        square_and_multiply(self.one(), *base, exponent, |x, y| Ok(self.mul(x, y)))
    }
}

/// The prime field `Z/pZ`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimeField {
    modulus: i64,
}

impl PrimeField {
    pub fn new(modulus: i64) -> Result<Self> {
        if modulus <= 0 {
            return Err(Error::invalid(format!(
                "field modulus must be positive, got {modulus}"
            )));
        }
        Ok(PrimeField { modulus })
    }

    #[inline]
    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    /// Inverse of a canonical element. Zero is reported as not invertible.
    pub(crate) fn invert(&self, value: i64) -> Result<i64> {
        if value == 0 {
            return Err(Error::NotInvertible {
                value,
                modulus: self.modulus,
            });
        }
        mod_inverse(self.modulus, value)
    }
}

impl FiniteField for PrimeField {
    type Elem = i64;

    #[inline]
    fn characteristic(&self) -> i64 {
        self.modulus
    }

    #[inline]
    fn zero(&self) -> i64 {
        0
    }

    #[inline]
    fn one(&self) -> i64 {
        1 % self.modulus
    }

    #[inline]
    fn from_int(&self, value: i64) -> i64 {
        value.rem_euclid(self.modulus)
    }

    #[inline]
    fn add(&self, a: &i64, b: &i64) -> i64 {
        (a + b).rem_euclid(self.modulus)
    }

    #[inline]
    fn sub(&self, a: &i64, b: &i64) -> i64 {
        (a - b).rem_euclid(self.modulus)
    }

    #[inline]
    fn neg(&self, a: &i64) -> i64 {
        (-a).rem_euclid(self.modulus)
    }

    #[inline]
    fn mul(&self, a: &i64, b: &i64) -> i64 {
        mul_mod(*a, *b, self.modulus)
    }

    fn div(&self, a: &i64, b: &i64) -> Result<i64> {
        let inv = self.invert(*b)?;
        Ok(mul_mod(*a, inv, self.modulus))
    }

    fn elements(&self) -> Vec<i64> {
        (0..self.modulus).collect()
    }
}
