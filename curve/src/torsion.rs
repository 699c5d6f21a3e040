//! Frobenius endomorphism, trace maps and the torsion structure a pairing
//! needs: embedding degree, order-divisibility checks and E[r] generation.

use std::collections::HashSet;

use log::debug;

use crate::affine::Point;
use crate::curve::{BaseCurve, BasePoint, Curve, ExtPoint, ExtensionCurve};
use crate::error::{Error, Result};
use crate::extension::Fp2Field;
use crate::field::{FiniteField, PrimeField};
use crate::modular::{is_prime, raise_power};

/// Largest extension degree searched by [`embedding_degree`].
pub const MAX_EMBEDDING_DEGREE: u32 = 10;

/// Smallest `k` in `[1, 10]` with `q^k ≡ 1 (mod r)`.
///
/// Both `q` and `r` must be prime.
pub fn embedding_degree(q: i64, r: i64) -> Result<u32> {
    if !is_prime(q) || !is_prime(r) {
        return Err(Error::domain(format!(
            "embedding degree needs prime q and r, got q = {q}, r = {r}"
        )));
    }

    for k in 1..=MAX_EMBEDDING_DEGREE {
        if raise_power(q, k as i64, r)? == 1 {
            debug!("embedding degree of q = {q}, r = {r} is {k}");
            return Ok(k);
        }
    }
    Err(Error::domain(format!(
        "no embedding degree k <= {MAX_EMBEDDING_DEGREE} for q = {q}, r = {r}"
    )))
}

fn dedup_images(images: Vec<ExtPoint>) -> Vec<ExtPoint> {
    let mut seen = HashSet::new();
    images.into_iter().filter(|p| seen.insert(*p)).collect()
}

impl ExtensionCurve {
    /// `π^k(P)`: both coordinates raised to the `p`-th power, `k` times.
    pub fn frobenius(&self, k: u32, point: &ExtPoint) -> Result<ExtPoint> {
        let (mut x, mut y) = match point {
            Point::Infinity => return Ok(Point::Infinity),
            Point::Affine { x, y } => (*x, *y),
        };

        let f = self.field();
        let p = f.characteristic();
        for _ in 0..k {
            x = f.pow(&x, p)?;
            y = f.pow(&y, p)?;
        }
        Ok(Point::new(x, y))
    }

    /// `Tr(P) = P + π(P) + ... + π^(k−1)(P)`.
    pub fn trace(&self, k: u32, point: &ExtPoint) -> Result<ExtPoint> {
        if k == 0 {
            return Err(Error::invalid("trace needs k >= 1"));
        }

        let mut image = *point;
        let mut sum = *point;
        for _ in 1..k {
            image = self.frobenius(1, &image)?;
            sum = self.add(&sum, &image)?;
        }
        Ok(sum)
    }

    /// `[k]P − Tr(P)`, which lands in the trace-zero subgroup.
    pub fn anti_trace(&self, k: u32, point: &ExtPoint) -> Result<ExtPoint> {
        let multiple = self.scalar_mul(k as i64, point)?;
        let trace = self.trace(k, point)?;
        self.sub(&multiple, &trace)
    }

    /// Image of `points` under the trace, without repetitions.
    pub fn trace_map(&self, k: u32, points: &[ExtPoint]) -> Result<Vec<ExtPoint>> {
        let images = points
            .iter()
            .map(|p| self.trace(k, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(dedup_images(images))
    }

    /// Image of `points` under the anti-trace, without repetitions.
    pub fn anti_trace_map(&self, k: u32, points: &[ExtPoint]) -> Result<Vec<ExtPoint>> {
        let images = points
            .iter()
            .map(|p| self.anti_trace(k, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(dedup_images(images))
    }
}

/// A curve together with the prime order `r` of the pairing groups.
///
/// Holds the curve over both `F_q` and `F_q²`; they share `q`, `A` and `B`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairingCurve {
    base: BaseCurve,
    curve: ExtensionCurve,
    r: i64,
}

impl PairingCurve {
    pub fn new(modulus: i64, a: i64, b: i64, r: i64, i_sqr: i64) -> Result<Self> {
        if r <= 0 {
            return Err(Error::invalid(format!("rorder must be positive, got {r}")));
        }
        Ok(PairingCurve {
            base: Curve::new(PrimeField::new(modulus)?, a, b),
            curve: Curve::new(Fp2Field::new(modulus, i_sqr)?, a, b),
            r,
        })
    }

    /// The curve over `F_q`.
    #[inline]
    pub fn base(&self) -> &BaseCurve {
        &self.base
    }

    /// The curve over `F_q²`, where the pairing is evaluated.
    #[inline]
    pub fn curve(&self) -> &ExtensionCurve {
        &self.curve
    }

    #[inline]
    pub fn field(&self) -> &Fp2Field {
        self.curve.field()
    }

    #[inline]
    pub fn order(&self) -> i64 {
        self.r
    }

    #[inline]
    pub fn modulus(&self) -> i64 {
        self.field().modulus()
    }

    pub fn embedding_degree(&self) -> Result<u32> {
        embedding_degree(self.modulus(), self.r)
    }

    /// `E(F_q²)[r]`.
    pub fn torsion(&self) -> Result<Vec<ExtPoint>> {
        self.curve.torsion(self.r)
    }

    /// G1: the trace image of the r-torsion.
    pub fn g1(&self) -> Result<Vec<ExtPoint>> {
        let k = self.embedding_degree()?;
        self.curve.trace_map(k, &self.torsion()?)
    }

    /// G2: the anti-trace image of the r-torsion.
    pub fn g2(&self) -> Result<Vec<ExtPoint>> {
        let k = self.embedding_degree()?;
        self.curve.anti_trace_map(k, &self.torsion()?)
    }

    /// `{ i·P + j·Q : 0 <= i, j < r }` for two independent points of order
    /// `r`, which is all of `E[r]`.
    pub fn torsion_by_generators(&self, p: &ExtPoint, q: &ExtPoint) -> Result<Vec<ExtPoint>> {
        if p.is_infinity() || q.is_infinity() {
            return Err(Error::domain("torsion generators must not be the point at infinity"));
        }

        let set: HashSet<_> = self.curve.points().into_iter().collect();
        let cycle_p = self.curve.cycle_in(p, &set)?;
        let cycle_q = self.curve.cycle_in(q, &set)?;
        for (point, cycle) in [(p, &cycle_p), (q, &cycle_q)] {
            if cycle.len() as i64 != self.r {
                return Err(Error::domain(format!(
                    "{point} has order {}, expected {}",
                    cycle.len(),
                    self.r
                )));
            }
        }
        if cycle_p.contains(q) {
            return Err(Error::domain(format!("{p} and {q} generate the same subgroup")));
        }

        let mut torsion = Vec::with_capacity((self.r * self.r) as usize);
        for i in 0..self.r {
            for j in 0..self.r {
                torsion.push(self.curve.linear_combination(&[*p, *q], &[i, j])?);
            }
        }
        Ok(torsion)
    }

    /// `r` is prime, `r | #E(F_q)` and `r² ∤ #E(F_q)`.
    pub fn order_divides_base(&self) -> bool {
        let count = self.base.point_count() as i64;
        let r = self.r;
        is_prime(r) && count % r == 0 && count % (r * r) != 0
    }

    /// `r` is prime, the embedding degree is at least 2, `r² | #E(F_q²)` and
    /// `r⁴ ∤ #E(F_q²)`.
    pub fn order_divides_extension(&self) -> bool {
        let r = self.r;
        if !is_prime(r) || !matches!(self.embedding_degree(), Ok(k) if k >= 2) {
            return false;
        }
        let count = self.curve.point_count() as i64;
        count % (r * r) == 0 && count % (r * r * r * r) != 0
    }

    pub(crate) fn require_divides_base(&self) -> Result<()> {
        if !self.order_divides_base() {
            return Err(Error::domain(format!(
                "r = {} must be prime and divide #E(F_q) exactly once",
                self.r
            )));
        }
        Ok(())
    }

    pub(crate) fn require_divides_extension(&self) -> Result<()> {
        if !self.order_divides_extension() {
            return Err(Error::domain(format!(
                "r = {} must divide #E(F_q²) exactly twice",
                self.r
            )));
        }
        Ok(())
    }

    /// `rE(F_q) = { [r]P : P ∈ E(F_q) }`.
    ///
    /// Requires [`PairingCurve::order_divides_base`].
    pub fn base_coset(&self) -> Result<Vec<BasePoint>> {
        self.require_divides_base()?;
        coset(&self.base, self.r)
    }

    /// `rE(F_q²) = { [r]P : P ∈ E(F_q²) }`.
    ///
    /// Requires both [`PairingCurve::order_divides_base`] and
    /// [`PairingCurve::order_divides_extension`].
    pub fn extension_coset(&self) -> Result<Vec<ExtPoint>> {
        self.require_divides_base()?;
        self.require_divides_extension()?;
        coset(&self.curve, self.r)
    }
}

fn coset<F: FiniteField>(curve: &Curve<F>, r: i64) -> Result<Vec<Point<F::Elem>>> {
    let mut seen = HashSet::new();
    let mut coset = Vec::new();
    for point in curve.points() {
        let multiple = curve.scalar_mul(r, &point)?;
        if seen.insert(multiple) {
            coset.push(multiple);
        }
    }
    Ok(coset)
}
