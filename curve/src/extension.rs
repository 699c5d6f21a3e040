//! Quadratic extension `F_p[i] / (i² − iSQR)`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::affine::Point;
use crate::error::{Error, Result};
use crate::field::{FiniteField, PrimeField};

/// Non-residue used when a descriptor does not name one.
pub const DEFAULT_I_SQR: i64 = -1;

/// Element `re + im·i` of the extension field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fp2 {
    pub re: i64,
    pub im: i64,
}

impl Fp2 {
    #[inline]
    pub const fn new(re: i64, im: i64) -> Self {
        Fp2 { re, im }
    }

    /// An element of the base field viewed inside the extension.
    #[inline]
    pub const fn real(re: i64) -> Self {
        Fp2 { re, im: 0 }
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        self.im == 0
    }
}

impl fmt::Display for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.re, self.im) {
            (re, 0) => write!(f, "{re}"),
            (0, im) => write!(f, "{im}i"),
            (re, im) => write!(f, "({re} + {im}i)"),
        }
    }
}

/// The field `F_p²` with `i² = i_sqr`.
///
/// `i_sqr` should be a quadratic non-residue modulo `p`; when it is not, the
/// ring has zero divisors and some divisions fail with
/// [`Error::NotInvertible`]. Harnesses count those as "not computed".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fp2Field {
    base: PrimeField,
    i_sqr: i64,
}

impl Fp2Field {
    pub fn new(modulus: i64, i_sqr: i64) -> Result<Self> {
        let base = PrimeField::new(modulus)?;
        Ok(Fp2Field {
            base,
            i_sqr: i_sqr.rem_euclid(modulus),
        })
    }

    #[inline]
    pub fn modulus(&self) -> i64 {
        self.base.modulus()
    }

    /// `i²`, canonicalised into `[0, p)`.
    #[inline]
    pub fn i_sqr(&self) -> i64 {
        self.i_sqr
    }

    /// The prime field the extension is built over.
    #[inline]
    pub fn base(&self) -> &PrimeField {
        &self.base
    }

    /// Build a canonical element from arbitrary integers.
    #[inline]
    pub fn element(&self, re: i64, im: i64) -> Fp2 {
        let p = self.modulus();
        Fp2::new(re.rem_euclid(p), im.rem_euclid(p))
    }

    /// Product without the final reduction, for chaining several products
    /// before reducing once.
    pub fn mul_raw(&self, a: &Fp2, b: &Fp2) -> (i128, i128) {
        let (ar, ai) = (a.re as i128, a.im as i128);
        let (br, bi) = (b.re as i128, b.im as i128);
        (ar * br + self.i_sqr as i128 * ai * bi, ar * bi + ai * br)
    }

    #[inline]
    pub fn conjugate(&self, a: &Fp2) -> Fp2 {
        Fp2::new(a.re, self.base.neg(&a.im))
    }

    /// `a · ā`, which lies in the base field. An imaginary residue is
    /// reported as [`Error::UnexpectedComplexDivisor`].
    pub fn norm(&self, a: &Fp2) -> Result<i64> {
        let product = self.mul(a, &self.conjugate(a));
        if !product.is_real() {
            return Err(Error::UnexpectedComplexDivisor);
        }
        Ok(product.re)
    }

    /// Embed a point of the base-field curve.
    pub fn lift(&self, point: &Point<i64>) -> Point<Fp2> {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::new(self.element(*x, 0), self.element(*y, 0)),
        }
    }

    #[inline]
    fn reduce_wide(&self, value: i128) -> i64 {
        value.rem_euclid(self.modulus() as i128) as i64
    }
}

impl FiniteField for Fp2Field {
    type Elem = Fp2;

    #[inline]
    fn characteristic(&self) -> i64 {
        self.modulus()
    }

    #[inline]
    fn zero(&self) -> Fp2 {
        Fp2::new(0, 0)
    }

    #[inline]
    fn one(&self) -> Fp2 {
        Fp2::real(self.base.one())
    }

    #[inline]
    fn from_int(&self, value: i64) -> Fp2 {
        Fp2::real(self.base.from_int(value))
    }

    #[inline]
    fn add(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        Fp2::new(self.base.add(&a.re, &b.re), self.base.add(&a.im, &b.im))
    }

    #[inline]
    fn sub(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        Fp2::new(self.base.sub(&a.re, &b.re), self.base.sub(&a.im, &b.im))
    }

    #[inline]
    fn neg(&self, a: &Fp2) -> Fp2 {
        Fp2::new(self.base.neg(&a.re), self.base.neg(&a.im))
    }

    #[inline]
    fn mul(&self, a: &Fp2, b: &Fp2) -> Fp2 {
        let (re, im) = self.mul_raw(a, b);
        Fp2::new(self.reduce_wide(re), self.reduce_wide(im))
    }

    /// Multiply numerator and denominator by the conjugate of `b`, then scale
    /// by the base-field inverse of the real denominator.
    fn div(&self, a: &Fp2, b: &Fp2) -> Result<Fp2> {
        let conj = self.conjugate(b);
        let numerator = self.mul(a, &conj);
        let denominator = self.norm(b)?;
        let inv = self.base.invert(denominator)?;
        Ok(self.mul(&numerator, &Fp2::real(inv)))
    }

    /// Elements ordered by real part, then imaginary part.
    fn elements(&self) -> Vec<Fp2> {
        let p = self.modulus();
        (0..p)
            .flat_map(|re| (0..p).map(move |im| Fp2::new(re, im)))
            .collect()
    }
}
