//! Projective (X:Y:Z) arithmetic, kept as an independent implementation of
//! the group law so that the affine formulas can be cross-checked against it.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::affine::Point;
use crate::curve::{CheckReport, Curve};
use crate::error::{Error, Result};
use crate::field::FiniteField;
use crate::group::contains;

/// Projective point on the elliptic curve.
/// Represents a point in projective coordinates (X:Y:Z) where (x,y) = (X/Z, Y/Z).
/// The point at infinity is represented as (0:1:0).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projective<E> {
    pub x: E,
    pub y: E,
    pub z: E,
}

impl<E> Projective<E> {
    /// Create a new projective point.
    pub fn new(x: E, y: E, z: E) -> Self {
        Projective { x, y, z }
    }
}

impl<F: FiniteField> Curve<F> {
    /// The point at infinity (identity element): (0:1:0)
    pub fn projective_infinity(&self) -> Projective<F::Elem> {
        let f = self.field();
        Projective::new(f.zero(), f.one(), f.zero())
    }

    /// Convert from affine coordinates.
    pub fn to_projective(&self, point: &Point<F::Elem>) -> Projective<F::Elem> {
        match point {
            Point::Infinity => self.projective_infinity(),
            Point::Affine { x, y } => Projective::new(*x, *y, self.field().one()),
        }
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self, point: &Projective<F::Elem>) -> Result<Point<F::Elem>> {
        if self.field().is_zero(&point.z) {
            return Ok(Point::Infinity);
        }
        self.normalize(point)
    }

    /// Divide out Z without special-casing Z = 0.
    fn normalize(&self, point: &Projective<F::Elem>) -> Result<Point<F::Elem>> {
        let f = self.field();
        let x = f.div(&point.x, &point.z)?;
        let y = f.div(&point.y, &point.z)?;
        Ok(Point::new(x, y))
    }

    /// Check if a point is on the curve: Y²·Z = X³ + a·X·Z² + b·Z³.
    pub fn is_on_curve_projective(&self, point: &Projective<F::Elem>) -> bool {
        let f = self.field();
        if f.is_zero(&point.z) {
            return true;
        }

        let z2 = f.square(&point.z);
        let lhs = f.mul(&f.square(&point.y), &point.z);
        let x3 = f.mul(&f.square(&point.x), &point.x);
        let axz2 = f.mul(&f.mul(self.a(), &point.x), &z2);
        let bz3 = f.mul(&f.mul(self.b(), &z2), &point.z);
        lhs == f.add(&f.add(&x3, &axz2), &bz3)
    }

    /// Projective doubling formulas. A point with Y = 0 doubles to (0:1:0).
    pub fn projective_double_xyz(&self, p: &Projective<F::Elem>) -> Projective<F::Elem> {
        let f = self.field();
        if f.is_zero(&p.y) {
            return self.projective_infinity();
        }

        let c = |v: i64| f.from_int(v);

        // W = a·Z² + 3·X²
        let w = f.add(&f.mul(self.a(), &f.square(&p.z)), &f.mul(&c(3), &f.square(&p.x)));
        let s = f.mul(&p.y, &p.z);
        let b = f.mul(&f.mul(&p.x, &p.y), &s);
        // H = W² − 8·B
        let h = f.sub(&f.square(&w), &f.mul(&c(8), &b));
        let s2 = f.square(&s);

        let x = f.mul(&f.mul(&c(2), &h), &s);
        let y = f.sub(
            &f.mul(&w, &f.sub(&f.mul(&c(4), &b), &h)),
            &f.mul(&f.mul(&c(8), &f.square(&p.y)), &s2),
        );
        let z = f.mul(&f.mul(&c(8), &s), &s2);

        Projective::new(x, y, z)
    }

    /// Projective addition formulas. Falls back to doubling when the inputs
    /// represent the same point and to (0:1:0) when they are inverses.
    pub fn projective_add_xyz(
        &self,
        p: &Projective<F::Elem>,
        q: &Projective<F::Elem>,
    ) -> Projective<F::Elem> {
        let f = self.field();

        let u1 = f.mul(&q.y, &p.z);
        let u2 = f.mul(&p.y, &q.z);
        let v1 = f.mul(&q.x, &p.z);
        let v2 = f.mul(&p.x, &q.z);

        if v1 == v2 {
            if u1 != u2 {
                return self.projective_infinity();
            }
            return self.projective_double_xyz(p);
        }

        let u = f.sub(&u1, &u2);
        let v = f.sub(&v1, &v2);
        let v_sqr = f.square(&v);
        let v_cub = f.mul(&v_sqr, &v);
        let w = f.mul(&p.z, &q.z);
        // A = U²·W − V³ − 2·V²·V2
        let a = f.sub(
            &f.mul(&f.square(&u), &w),
            &f.add(&v_cub, &f.mul(&f.mul(&f.from_int(2), &v_sqr), &v2)),
        );

        let x = f.mul(&v, &a);
        let y = f.sub(
            &f.mul(&u, &f.sub(&f.mul(&v_sqr, &v2), &a)),
            &f.mul(&v_cub, &u2),
        );
        let z = f.mul(&v_cub, &w);

        Projective::new(x, y, z)
    }

    /// `2P` computed through projective coordinates.
    pub fn projective_double(&self, point: &Point<F::Elem>) -> Result<Point<F::Elem>> {
        match point {
            Point::Infinity => Ok(Point::Infinity),
            Point::Affine { y, .. } if self.field().is_zero(y) => Ok(Point::Infinity),
            _ => {
                let xyz = self.projective_double_xyz(&self.to_projective(point));
                self.normalize(&xyz)
            }
        }
    }

    /// `P + Q` computed through projective coordinates.
    pub fn projective_add(
        &self,
        p: &Point<F::Elem>,
        q: &Point<F::Elem>,
    ) -> Result<Point<F::Elem>> {
        let (px, py, qx) = match (p, q) {
            (Point::Infinity, _) => return Ok(*q),
            (_, Point::Infinity) => return Ok(*p),
            (Point::Affine { x: px, y: py }, Point::Affine { x: qx, .. }) => (px, py, qx),
        };

        if p != q && px == qx {
            return Ok(Point::Infinity);
        }
        if p == q && self.field().is_zero(py) {
            return Ok(Point::Infinity);
        }

        let xyz = if p == q {
            self.projective_double_xyz(&self.to_projective(p))
        } else {
            self.projective_add_xyz(&self.to_projective(p), &self.to_projective(q))
        };
        trace!("{p} + {q} -> ({}, {}, {})", xyz.x, xyz.y, xyz.z);
        self.normalize(&xyz)
    }

    /// Add every unordered pair of curve points with both backends.
    ///
    /// The backends must fail together (counted as not computed) or agree on
    /// a point of the curve; anything else is a consistency error.
    pub fn projective_add_cross_check(&self) -> Result<CheckReport> {
        let points = self.points();
        let mut report = CheckReport::default();

        for (i, p) in points.iter().enumerate() {
            for q in &points[i..] {
                let projective = self.projective_add(p, q);
                let affine = self.add(p, q);
                tally(&points, projective, affine, &mut report)
                    .map_err(|err| Error::consistency(format!("{p} + {q}: {err}")))?;
            }
        }

        debug!(
            "projective addition: confirmed {}, not computed {}",
            report.confirmed, report.not_computed
        );
        Ok(report)
    }

    /// Double every curve point with both backends. Same rules as
    /// [`Curve::projective_add_cross_check`].
    pub fn projective_double_cross_check(&self) -> Result<CheckReport> {
        let points = self.points();
        let mut report = CheckReport::default();

        for p in &points {
            let projective = self.projective_double(p);
            let affine = self.double(p);
            tally(&points, projective, affine, &mut report)
                .map_err(|err| Error::consistency(format!("2*{p}: {err}")))?;
        }

        debug!(
            "projective doubling: confirmed {}, not computed {}",
            report.confirmed, report.not_computed
        );
        Ok(report)
    }
}

fn tally<E: Copy + PartialEq + core::fmt::Display>(
    points: &[Point<E>],
    projective: Result<Point<E>>,
    affine: Result<Point<E>>,
    report: &mut CheckReport,
) -> core::result::Result<(), String> {
    match (projective, affine) {
        (Err(_), Err(_)) => {
            report.not_computed += 1;
            Ok(())
        }
        (Err(err), Ok(_)) => Err(format!("projective backend failed: {err}")),
        (Ok(_), Err(err)) => Err(format!("affine backend failed: {err}")),
        (Ok(pp), Ok(xy)) if pp != xy => Err(format!("mismatch: projective {pp}, affine {xy}")),
        (Ok(pp), Ok(_)) if !contains(points, &pp) => Err(format!("{pp} is not on the curve")),
        (Ok(_), Ok(_)) => {
            report.confirmed += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseCurve, ExtensionCurve, Fp2Field, PrimeField};

    fn e11() -> BaseCurve {
        Curve::new(PrimeField::new(11).unwrap(), 4, 3)
    }

    fn e11_ext() -> ExtensionCurve {
        Curve::new(Fp2Field::new(11, -1).unwrap(), 4, 3)
    }

    #[test]
    fn test_infinity() {
        let curve = e11();
        let inf = curve.projective_infinity();
        assert_eq!(inf, Projective::new(0, 1, 0));
        assert!(curve.is_on_curve_projective(&inf));
        assert_eq!(curve.to_affine(&inf), Ok(Point::Infinity));
        assert_eq!(curve.to_projective(&Point::Infinity), inf);
    }

    #[test]
    fn test_affine_round_trip() {
        let curve = e11();
        let p = Point::new(3, 8);
        let xyz = curve.to_projective(&p);
        assert!(curve.is_on_curve_projective(&xyz));
        assert_eq!(curve.to_affine(&xyz), Ok(p));

        // Any non-zero scaling represents the same point.
        let scaled = Projective::new(3 * 5 % 11, 8 * 5 % 11, 5);
        assert!(curve.is_on_curve_projective(&scaled));
        assert_eq!(curve.to_affine(&scaled), Ok(p));
    }

    #[test]
    fn test_projective_double_matches_affine() {
        let curve = e11();
        let g = Point::new(0, 5);
        assert_eq!(curve.projective_double(&g), curve.double(&g));
        assert_eq!(curve.projective_double(&g), Ok(Point::new(5, 4)));
        assert_eq!(curve.projective_double(&Point::new(7, 0)), Ok(Point::Infinity));

        let xyz = curve.projective_double_xyz(&curve.to_projective(&g));
        assert!(curve.is_on_curve_projective(&xyz));
    }

    #[test]
    fn test_projective_add_matches_affine() {
        let curve = e11();
        let p = Point::new(0, 5);
        let q = Point::new(5, 4);
        assert_eq!(curve.projective_add(&p, &q), Ok(Point::new(10, 8)));
        assert_eq!(curve.projective_add(&p, &p), curve.double(&p));
        assert_eq!(curve.projective_add(&p, &Point::new(0, 6)), Ok(Point::Infinity));
        assert_eq!(curve.projective_add(&Point::Infinity, &q), Ok(q));
    }

    #[test]
    fn test_projective_add_xyz_handles_equal_inputs() {
        let curve = e11();
        let p = curve.to_projective(&Point::new(0, 5));
        assert_eq!(
            curve.projective_add_xyz(&p, &p),
            curve.projective_double_xyz(&p)
        );
        let neg = curve.to_projective(&Point::new(0, 6));
        assert_eq!(curve.projective_add_xyz(&p, &neg), curve.projective_infinity());
    }

    #[test]
    fn test_add_cross_check_base() {
        let report = e11().projective_add_cross_check().unwrap();
        assert_eq!(report, CheckReport { confirmed: 105, not_computed: 0 });
    }

    #[test]
    fn test_add_cross_check_extension() {
        let report = e11_ext().projective_add_cross_check().unwrap();
        assert_eq!(report, CheckReport { confirmed: 9870, not_computed: 0 });
    }

    #[test]
    fn test_add_cross_check_with_zero_divisors() {
        // -1 is a square mod 13, so some chords have no slope in either
        // backend.
        let curve = Curve::new(Fp2Field::new(13, -1).unwrap(), 4, 3);
        assert_eq!(curve.point_count(), 226);
        let report = curve.projective_add_cross_check().unwrap();
        assert_eq!(report, CheckReport { confirmed: 19939, not_computed: 5712 });
    }

    #[test]
    fn test_double_cross_check() {
        let report = e11_ext().projective_double_cross_check().unwrap();
        assert_eq!(report, CheckReport { confirmed: 140, not_computed: 0 });

        let report = e11().projective_double_cross_check().unwrap();
        assert_eq!(report.confirmed, 14);
    }
}
