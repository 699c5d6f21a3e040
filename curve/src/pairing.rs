//! Divisor lines, Miller's algorithm, and the Weil and Tate pairings.
//!
//! All functions evaluate rational functions on `E(F_q²)` at a query point
//! `Q`. A line through points of the curve is represented by its gradient
//! and intercept (or, when vertical, by its abscissa), and the Miller loop
//! carries the accumulated value together with the multiple of `P` it has
//! reached so far.
//!
//! Evaluations that hit a non-invertible denominator fail with an
//! arithmetic error; callers that sweep many inputs treat those as "not
//! computed" (see [`crate::Error::is_degenerate`]).

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::affine::Point;
use crate::curve::{CheckReport, Curve, ExtPoint};
use crate::error::{Error, Result};
use crate::extension::Fp2;
use crate::field::FiniteField;
use crate::modular::square_and_multiply_ex;
use crate::torsion::PairingCurve;

/// A line `y = m·x + c`, or the vertical line `x = x₀`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineFunction<E> {
    Sloped { gradient: E, intercept: E },
    Vertical { x: E },
}

impl<E: Copy + Eq> LineFunction<E> {
    /// Value of the line's equation at `point`: `y − m·x − c` for a sloped
    /// line and `x − x₀` for a vertical one.
    pub fn evaluate<F>(&self, field: &F, point: &Point<E>) -> Result<E>
    where
        F: FiniteField<Elem = E>,
    {
        let (x, y) = match point {
            Point::Infinity => {
                return Err(Error::domain("cannot evaluate a line at the point at infinity"))
            }
            Point::Affine { x, y } => (x, y),
        };

        Ok(match self {
            LineFunction::Sloped {
                gradient,
                intercept,
            } => field.sub(&field.sub(y, &field.mul(gradient, x)), intercept),
            LineFunction::Vertical { x: x0 } => field.sub(x, x0),
        })
    }
}

impl<F: FiniteField> Curve<F> {
    /// The line through two distinct points.
    pub fn chord(
        &self,
        p: &Point<F::Elem>,
        q: &Point<F::Elem>,
    ) -> Result<LineFunction<F::Elem>> {
        let ((xp, yp), (xq, yq)) = match (p, q) {
            (Point::Affine { x: xp, y: yp }, Point::Affine { x: xq, y: yq }) => {
                ((xp, yp), (xq, yq))
            }
            _ => return Err(Error::domain("chord needs two affine points")),
        };

        let f = self.field();
        let dx = f.sub(xq, xp);
        let gradient = f.div(&f.sub(yq, yp), &dx)?;
        let intercept = f.div(&f.sub(&f.mul(yp, xq), &f.mul(yq, xp)), &dx)?;
        Ok(LineFunction::Sloped {
            gradient,
            intercept,
        })
    }

    /// The tangent line at `p`.
    pub fn tangent(&self, p: &Point<F::Elem>) -> Result<LineFunction<F::Elem>> {
        let (x, y) = match p {
            Point::Affine { x, y } => (x, y),
            Point::Infinity => return Err(Error::domain("no tangent at the point at infinity")),
        };

        let f = self.field();
        let two_y = f.mul(&f.from_int(2), y);
        let x2 = f.square(x);
        // m = (3x² + A) / 2y
        let gradient = f.div(&f.add(&f.mul(&f.from_int(3), &x2), self.a()), &two_y)?;
        // c = (A·x + 2B − x³) / 2y
        let numerator = f.sub(
            &f.add(&f.mul(self.a(), x), &f.mul(&f.from_int(2), self.b())),
            &f.mul(&x2, x),
        );
        let intercept = f.div(&numerator, &two_y)?;
        Ok(LineFunction::Sloped {
            gradient,
            intercept,
        })
    }

    /// The vertical line through `p`.
    pub fn vertical(&self, p: &Point<F::Elem>) -> Result<LineFunction<F::Elem>> {
        match p {
            Point::Affine { x, .. } => Ok(LineFunction::Vertical { x: *x }),
            Point::Infinity => Err(Error::domain("no vertical line through the point at infinity")),
        }
    }
}

/// One step of the naive product: the line used, the point whose vertical
/// divides it out, and the multiple of `P` reached afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MillerStep<E> {
    pub line: LineFunction<E>,
    pub vertical_at: Point<E>,
    pub next: Point<E>,
}

/// Running state of Miller's loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MillerState<E> {
    /// Accumulated function value at the query point.
    pub value: E,
    /// The multiple of `P` reached so far.
    pub multiple: Point<E>,
}

impl PairingCurve {
    fn ensure_pairing_order(&self) -> Result<()> {
        if self.order() < 3 {
            return Err(Error::domain(format!(
                "pairing order must be at least 3, got {}",
                self.order()
            )));
        }
        Ok(())
    }

    /// The `r − 2` lines of the naive evaluation of `f_{r,P}`: the tangent at
    /// `P`, followed by the chords through `iP` and `P` for `i = 2..r−2`.
    pub fn frp_params(&self, p: &ExtPoint) -> Result<Vec<MillerStep<Fp2>>> {
        self.ensure_pairing_order()?;
        let curve = self.curve();

        let mut steps = Vec::with_capacity((self.order() - 2) as usize);
        let mut next = *p;
        for count in 1..self.order() - 1 {
            let previous = next;
            let line = if count == 1 {
                curve.tangent(p)?
            } else {
                curve.chord(&next, p)?
            };
            next = curve.add(&next, p)?;
            steps.push(MillerStep {
                line,
                vertical_at: previous,
                next,
            });
        }
        Ok(steps)
    }

    /// Evaluate the naive product at `q`: every line, divided by the
    /// verticals of all steps but the first.
    pub fn naive_frp(&self, q: &ExtPoint, steps: &[MillerStep<Fp2>]) -> Result<Fp2> {
        let f = self.field();
        let curve = self.curve();

        let (first, rest) = steps
            .split_first()
            .ok_or_else(|| Error::domain("naive evaluation needs at least one step"))?;

        let mut quotient = first.line.evaluate(f, q)?;
        let mut divisor = f.one();
        for step in rest {
            quotient = f.mul(&quotient, &step.line.evaluate(f, q)?);
            let vertical = curve.vertical(&step.vertical_at)?;
            divisor = f.mul(&divisor, &vertical.evaluate(f, q)?);
        }

        if rest.is_empty() {
            return Ok(quotient);
        }
        f.div(&quotient, &divisor)
    }

    /// `f_{r,P}(Q)` by Miller's algorithm over the bits of `r − 2`.
    ///
    /// Orders below 4 have too few bits for the doubling structure and use
    /// [`PairingCurve::naive_frp`] instead.
    pub fn miller(&self, p: &ExtPoint, q: &ExtPoint) -> Result<Fp2> {
        self.ensure_pairing_order()?;
        if self.order() < 4 {
            return self.naive_frp(q, &self.frp_params(p)?);
        }

        let f = self.field();
        let curve = self.curve();

        let square = |state: &MillerState<Fp2>, _: &MillerState<Fp2>| -> Result<MillerState<Fp2>> {
            let tangent = curve.tangent(&state.multiple)?;
            let doubled = curve.double(&state.multiple)?;
            let value = f.mul(&f.square(&state.value), &tangent.evaluate(f, q)?);
            let value = f.div(&value, &curve.vertical(&doubled)?.evaluate(f, q)?)?;
            trace!("square: {} -> {doubled}, f = {value}", state.multiple);
            Ok(MillerState {
                value,
                multiple: doubled,
            })
        };

        let multiply = |state: &MillerState<Fp2>, _: &MillerState<Fp2>| -> Result<MillerState<Fp2>> {
            let chord = curve.chord(p, &state.multiple)?;
            let sum = curve.add(p, &state.multiple)?;
            let value = f.mul(&state.value, &chord.evaluate(f, q)?);
            let value = f.div(&value, &curve.vertical(&sum)?.evaluate(f, q)?)?;
            trace!("multiply: {} -> {sum}, f = {value}", state.multiple);
            Ok(MillerState {
                value,
                multiple: sum,
            })
        };

        let start = MillerState {
            value: f.one(),
            multiple: *p,
        };
        let state = square_and_multiply_ex(start, start, self.order() - 2, square, multiply)?;

        // The loop stops at (r−2)P; close with the chord through P, no vertical.
        let closing = curve.chord(p, &state.multiple)?.evaluate(f, q)?;
        Ok(f.mul(&state.value, &closing))
    }

    /// `f_{r,P}(Q) · V(Q)^r / L(Q)^r`, where `V` is the vertical through
    /// `vertical_at` and `L` is `line`.
    pub fn weil_divisor_value(
        &self,
        p: &ExtPoint,
        q: &ExtPoint,
        vertical_at: &ExtPoint,
        line: &LineFunction<Fp2>,
    ) -> Result<Fp2> {
        let f = self.field();
        let r = self.order();

        let frp = self.miller(p, q)?;
        let vertical = f.pow(&self.curve().vertical(vertical_at)?.evaluate(f, q)?, r)?;
        let line = f.pow(&line.evaluate(f, q)?, r)?;
        f.div(&f.mul(&frp, &vertical), &line)
    }

    /// Weil pairing `e_r(P, Q)` with auxiliary points `R` and `S` moving the
    /// divisors off each other's support.
    pub fn weil_pairing(
        &self,
        p: &ExtPoint,
        q: &ExtPoint,
        r: &ExtPoint,
        s: &ExtPoint,
    ) -> Result<Fp2> {
        let f = self.field();
        let curve = self.curve();

        let qs = curve.add(q, s)?;
        let pr = curve.add(p, r)?;
        let line_pr = curve.chord(p, r)?;
        let line_qs = curve.chord(q, s)?;

        let f_qs = self.weil_divisor_value(p, &qs, &pr, &line_pr)?;
        let f_s = self.weil_divisor_value(p, s, &pr, &line_pr)?;
        let g_pr = self.weil_divisor_value(q, &pr, &qs, &line_qs)?;
        let g_r = self.weil_divisor_value(q, r, &qs, &line_qs)?;

        let value = f.div(&f.mul(&f_qs, &g_r), &f.mul(&g_pr, &f_s))?;
        debug!("e({p}, {q}) = {value}");
        Ok(value)
    }

    /// `f_{r,P}(Q + R) / f_{r,P}(R)`, defined only up to r-th powers.
    pub fn tate_basic(&self, p: &ExtPoint, q: &ExtPoint, r: &ExtPoint) -> Result<Fp2> {
        let qr = self.curve().add(q, r)?;
        self.field().div(&self.miller(p, &qr)?, &self.miller(p, r)?)
    }

    /// Reduced Tate pairing: the basic value raised to `(q² − 1) / r`.
    pub fn tate_pairing(&self, p: &ExtPoint, q: &ExtPoint, r: &ExtPoint) -> Result<Fp2> {
        self.require_divides_base()?;
        self.require_divides_extension()?;

        let q2_minus_one = self.modulus() * self.modulus() - 1;
        if q2_minus_one % self.order() != 0 {
            return Err(Error::domain(format!(
                "r = {} does not divide q² − 1 = {q2_minus_one}",
                self.order()
            )));
        }

        let basic = self.tate_basic(p, q, r)?;
        let value = self.field().pow(&basic, q2_minus_one / self.order())?;
        debug!("t({p}, {q}) = {value}");
        Ok(value)
    }

    /// Check `e^r = 1` and `e(2P, Q) = e(P, 2Q) = e(P, Q)²` for every pair of
    /// non-identity points in G1 × G2.
    ///
    /// Pairs where some evaluation is degenerate are counted as not
    /// computed; a failed identity is a consistency error.
    pub fn bilinearity_check(&self, r: &ExtPoint, s: &ExtPoint) -> Result<CheckReport> {
        let k = self.embedding_degree()?;
        if k != 2 {
            return Err(Error::domain(format!(
                "bilinearity check needs embedding degree 2, got {k}"
            )));
        }

        let torsion = self.torsion()?;
        let g1 = self.curve().trace_map(k, &torsion)?;
        let g2 = self.curve().anti_trace_map(k, &torsion)?;

        let mut report = CheckReport::default();
        for p in g1.iter().filter(|p| !p.is_infinity()) {
            for q in g2.iter().filter(|q| !q.is_infinity()) {
                match self.check_bilinear_pair(p, q, r, s) {
                    Ok(()) => report.confirmed += 1,
                    Err(err) if err.is_degenerate() => {
                        trace!("e({p}, {q}) not computed: {err}");
                        report.not_computed += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        debug!(
            "bilinearity: confirmed {}, not computed {}",
            report.confirmed, report.not_computed
        );
        Ok(report)
    }

    fn check_bilinear_pair(
        &self,
        p: &ExtPoint,
        q: &ExtPoint,
        r: &ExtPoint,
        s: &ExtPoint,
    ) -> Result<()> {
        let f = self.field();
        let curve = self.curve();

        let e = self.weil_pairing(p, q, r, s)?;
        if f.pow(&e, self.order())? != f.one() {
            return Err(Error::consistency(format!(
                "e({p}, {q}) = {e} is not an r-th root of unity"
            )));
        }

        let e_2p = self.weil_pairing(&curve.double(p)?, q, r, s)?;
        let e_2q = self.weil_pairing(p, &curve.double(q)?, r, s)?;
        let e_sqr = f.square(&e);
        if e_2p != e_2q || e_2p != e_sqr {
            return Err(Error::consistency(format!(
                "e(2P, Q) = {e_2p}, e(P, 2Q) = {e_2q}, e(P, Q)² = {e_sqr} for P = {p}, Q = {q}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn ext(x: (i64, i64), y: (i64, i64)) -> ExtPoint {
        Point::new(Fp2::new(x.0, x.1), Fp2::new(y.0, y.1))
    }

    fn weil_curve() -> PairingCurve {
        PairingCurve::new(59, 1, 0, 5, -1).unwrap()
    }

    fn weil_points() -> [ExtPoint; 4] {
        [
            ext((25, 0), (30, 0)),
            ext((34, 0), (0, 30)),
            ext((40, 0), (54, 0)),
            ext((48, 55), (28, 51)),
        ]
    }

    #[test]
    fn test_line_evaluation() {
        let pc = weil_curve();
        let f = pc.field();
        let line = LineFunction::Sloped {
            gradient: Fp2::real(2),
            intercept: Fp2::real(3),
        };
        // 10 − 2·4 − 3 = −1
        assert_eq!(line.evaluate(f, &ext((4, 0), (10, 0))), Ok(Fp2::real(58)));

        let vertical = LineFunction::Vertical { x: Fp2::real(5) };
        assert_eq!(vertical.evaluate(f, &ext((4, 1), (0, 0))), Ok(Fp2::new(58, 1)));
        assert!(vertical.evaluate(f, &Point::Infinity).is_err());
    }

    #[test]
    fn test_lines_vanish_on_their_points() {
        let pc = weil_curve();
        let (f, curve) = (pc.field(), pc.curve());
        let [p, q, r, _] = weil_points();

        let chord = curve.chord(&p, &r).unwrap();
        assert_eq!(chord.evaluate(f, &p), Ok(f.zero()));
        assert_eq!(chord.evaluate(f, &r), Ok(f.zero()));
        // The third intersection is −(P + R).
        let third = curve.negate(&curve.add(&p, &r).unwrap());
        assert_eq!(chord.evaluate(f, &third), Ok(f.zero()));

        let tangent = curve.tangent(&q).unwrap();
        assert_eq!(tangent.evaluate(f, &q), Ok(f.zero()));
        let third = curve.negate(&curve.double(&q).unwrap());
        assert_eq!(tangent.evaluate(f, &third), Ok(f.zero()));

        let vertical = curve.vertical(&p).unwrap();
        assert_eq!(vertical.evaluate(f, &curve.negate(&p)), Ok(f.zero()));
    }

    #[test]
    fn test_degenerate_lines() {
        let pc = weil_curve();
        let curve = pc.curve();
        let [p, ..] = weil_points();

        let err = curve.chord(&p, &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
        assert!(curve.chord(&p, &Point::Infinity).is_err());
        assert!(curve.tangent(&Point::Infinity).is_err());
        assert!(curve.vertical(&Point::Infinity).is_err());

        // (0, 0) is 2-torsion: its tangent is vertical.
        assert!(curve.tangent(&ext((0, 0), (0, 0))).unwrap_err().is_degenerate());
    }

    #[test]
    fn test_frp_params() {
        let pc = weil_curve();
        let curve = pc.curve();
        let [p, ..] = weil_points();

        let steps = pc.frp_params(&p).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].line, curve.tangent(&p).unwrap());
        assert_eq!(steps[0].vertical_at, p);
        assert_eq!(steps[0].next, curve.double(&p).unwrap());
        assert_eq!(steps[2].next, curve.scalar_mul(4, &p).unwrap());
        assert_eq!(steps[2].vertical_at, curve.scalar_mul(3, &p).unwrap());
    }

    #[test]
    fn test_miller() {
        let pc = weil_curve();
        let [p, q, ..] = weil_points();
        assert_eq!(pc.miller(&p, &q), Ok(Fp2::new(43, 52)));
    }

    #[test]
    fn test_weil_pairing() {
        let pc = weil_curve();
        let f = pc.field();
        let [p, q, r, s] = weil_points();

        let e = pc.weil_pairing(&p, &q, &r, &s).unwrap();
        assert_eq!(e, Fp2::new(46, 56));
        assert_eq!(f.pow(&e, 5), Ok(f.one()));
    }

    #[test]
    fn test_weil_pairing_bilinear() {
        let pc = weil_curve();
        let (f, curve) = (pc.field(), pc.curve());
        let [p, q, r, s] = weil_points();

        let e = pc.weil_pairing(&p, &q, &r, &s).unwrap();
        let p2 = curve.double(&p).unwrap();
        let q2 = curve.double(&q).unwrap();
        assert_eq!(pc.weil_pairing(&p2, &q, &r, &s), Ok(Fp2::new(42, 19)));
        assert_eq!(pc.weil_pairing(&p, &q2, &r, &s), Ok(Fp2::new(42, 19)));
        assert_eq!(f.square(&e), Fp2::new(42, 19));
    }

    #[test]
    fn test_weil_pairing_alternates() {
        let pc = weil_curve();
        let f = pc.field();
        let [p, q, r, s] = weil_points();

        let e = pc.weil_pairing(&p, &q, &r, &s).unwrap();
        let swapped = pc.weil_pairing(&q, &p, &s, &r).unwrap();
        assert_eq!(swapped, Fp2::new(46, 3));
        assert_eq!(f.mul(&e, &swapped), f.one());
    }

    #[test]
    fn test_tate_pairing() {
        let pc = PairingCurve::new(19, 14, 3, 5, -1).unwrap();
        let p = ext((17, 0), (9, 0));
        let q = ext((16, 0), (0, 16));
        let r = ext((18, 2), (14, 5));

        assert_eq!(pc.tate_basic(&p, &q, &r), Ok(Fp2::new(10, 13)));
        assert_eq!(pc.tate_pairing(&p, &q, &r), Ok(Fp2::new(2, 15)));
    }

    #[test]
    fn test_tate_pairing_small_order() {
        // r = 3 takes the naive path.
        let pc = PairingCurve::new(5, 0, -3, 3, -2).unwrap();
        let p = ext((3, 0), (2, 0));
        let q = ext((1, 1), (2, 4));
        let r = ext((0, 2), (2, 1));

        assert_eq!(pc.base().point_count(), 6);
        assert_eq!(pc.curve().point_count(), 36);
        assert_eq!(pc.torsion().unwrap().len(), 9);
        assert_eq!(pc.tate_basic(&p, &q, &r), Ok(Fp2::new(4, 4)));
        assert_eq!(pc.tate_pairing(&p, &q, &r), Ok(Fp2::new(2, 1)));
    }

    #[test]
    fn test_tate_pairing_rejects_bad_order() {
        // 4 is not prime.
        let pc = PairingCurve::new(59, 1, 0, 4, -1).unwrap();
        let [p, q, r, _] = weil_points();
        assert_eq!(
            pc.tate_pairing(&p, &q, &r).unwrap_err().kind(),
            ErrorKind::Domain
        );
    }

    #[test]
    fn test_pairing_order_too_small() {
        let pc = PairingCurve::new(59, 1, 0, 2, -1).unwrap();
        let [p, q, ..] = weil_points();
        assert!(pc.frp_params(&p).is_err());
        assert!(pc.miller(&p, &q).is_err());
        assert!(pc.naive_frp(&q, &[]).is_err());
    }

    #[test]
    fn test_bilinearity_check() {
        let pc = weil_curve();
        let [_, _, r, s] = weil_points();
        let report = pc.bilinearity_check(&r, &s).unwrap();
        assert_eq!(report, CheckReport { confirmed: 16, not_computed: 0 });
    }

    #[test]
    fn test_bilinearity_check_needs_degree_two() {
        // 11 = 1 mod 5, so the embedding degree is 1.
        let pc = PairingCurve::new(11, 1, 0, 5, -1).unwrap();
        let [_, _, r, s] = weil_points();
        assert!(pc.bilinearity_check(&r, &s).is_err());
    }
}
