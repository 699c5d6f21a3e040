//! Affine group law for short Weierstrass curves y² = x³ + A·x + B over any
//! `FiniteField`. The same code serves the base-field curve (coordinates in
//! F_p) and the extension-field curve (coordinates in F_p²).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::FiniteField;
use crate::modular::square_and_multiply;

/// Affine point on the elliptic curve.
/// Either the point at infinity (identity element) or a coordinate pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point<E> {
    Infinity,
    Affine { x: E, y: E },
}

impl<E> Point<E> {
    /// Create a new affine point.
    #[inline]
    pub fn new(x: E, y: E) -> Self {
        Point::Affine { x, y }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    #[inline]
    pub fn x(&self) -> Option<&E> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    #[inline]
    pub fn y(&self) -> Option<&E> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }
}

impl<E: fmt::Display> fmt::Display for Point<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "O"),
            Point::Affine { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

impl<F: FiniteField> Curve<F> {
    /// `x³ + A·x + B`.
    pub(crate) fn rhs(&self, x: &F::Elem) -> F::Elem {
        let f = self.field();
        let x3 = f.mul(&f.square(x), x);
        let ax = f.mul(self.a(), x);
        f.add(&f.add(&x3, &ax), self.b())
    }

    /// Check if a point is on the curve: y² = x³ + A·x + B.
    pub fn is_on_curve(&self, point: &Point<F::Elem>) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine { x, y } => self.field().square(y) == self.rhs(x),
        }
    }

    /// Negate a point: −(x, y) = (x, −y).
    pub fn negate(&self, point: &Point<F::Elem>) -> Point<F::Elem> {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::new(*x, self.field().neg(y)),
        }
    }

    /// Point doubling: 2*P.
    pub fn double(&self, point: &Point<F::Elem>) -> Result<Point<F::Elem>> {
        let (x, y) = match point {
            Point::Infinity => return Ok(Point::Infinity),
            Point::Affine { x, y } => (x, y),
        };

        let f = self.field();

        // If y = 0, then 2P = O
        if f.is_zero(y) {
            return Ok(Point::Infinity);
        }

        // λ = (3x² + a) / (2y)
        let numerator = f.add(&f.mul(&f.from_int(3), &f.square(x)), self.a());
        let denominator = f.mul(&f.from_int(2), y);
        let lambda = f.div(&numerator, &denominator)?;

        // x_r = λ² − 2x
        let x_r = f.sub(&f.sub(&f.square(&lambda), x), x);

        // y_r = λ(x − x_r) − y
        let y_r = f.sub(&f.mul(&lambda, &f.sub(x, &x_r)), y);

        Ok(Point::new(x_r, y_r))
    }

    /// Chord addition that refuses to double. `P == Q` is a domain error.
    pub fn add_distinct(
        &self,
        p: &Point<F::Elem>,
        q: &Point<F::Elem>,
    ) -> Result<Point<F::Elem>> {
        let ((x1, y1), (x2, y2)) = match (p, q) {
            (Point::Infinity, _) => return Ok(*q),
            (_, Point::Infinity) => return Ok(*p),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };

        if p == q {
            return Err(Error::domain(format!(
                "cannot add {p} to itself without doubling"
            )));
        }

        // Vertical chord: the points are inverses.
        if x1 == x2 {
            return Ok(Point::Infinity);
        }

        let f = self.field();

        // λ = (y2 − y1) / (x2 − x1)
        let lambda = f.div(&f.sub(y2, y1), &f.sub(x2, x1))?;

        // x_r = λ² − x1 − x2
        let x_r = f.sub(&f.sub(&f.square(&lambda), x1), x2);

        // y_r = λ(x1 − x_r) − y1
        let y_r = f.sub(&f.mul(&lambda, &f.sub(x1, &x_r)), y1);

        Ok(Point::new(x_r, y_r))
    }

    /// Full group law: dispatches to [`Curve::double`] for equal points.
    pub fn add(&self, p: &Point<F::Elem>, q: &Point<F::Elem>) -> Result<Point<F::Elem>> {
        if p == q {
            return self.double(p);
        }
        self.add_distinct(p, q)
    }

    /// `P − Q`.
    pub fn sub(&self, p: &Point<F::Elem>, q: &Point<F::Elem>) -> Result<Point<F::Elem>> {
        self.add(p, &self.negate(q))
    }

    /// Scalar multiplication `k·P` by square-and-multiply over [`Curve::add`].
    pub fn scalar_mul(&self, k: i64, point: &Point<F::Elem>) -> Result<Point<F::Elem>> {
        square_and_multiply(Point::Infinity, *point, k, |a, b| self.add(a, b))
    }
}
