//! Curve handle, brute-force point enumeration and the subgroup structure
//! derived from it (cycles, torsion, Cartesian products).

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::affine::Point;
use crate::error::{Error, Result};
use crate::extension::{Fp2, Fp2Field};
use crate::field::{FiniteField, PrimeField};
use crate::group::{contains, unique_cycle_filter};

/// Short Weierstrass curve `y² = x³ + A·x + B` over the field `F`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve<F: FiniteField> {
    field: F,
    a: F::Elem,
    b: F::Elem,
}

/// Curve over the prime field.
pub type BaseCurve = Curve<PrimeField>;
/// Curve over the quadratic extension.
pub type ExtensionCurve = Curve<Fp2Field>;
pub type BasePoint = Point<i64>;
pub type ExtPoint = Point<Fp2>;

/// Tally produced by the exhaustive self-checks.
///
/// `not_computed` counts inputs whose evaluation hit a degenerate case
/// (a non-invertible denominator, an unsupported divisor) on every backend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub confirmed: usize,
    pub not_computed: usize,
}

impl<F: FiniteField> Curve<F> {
    /// Build a curve from integer coefficients, reduced into the field.
    pub fn new(field: F, a: i64, b: i64) -> Self {
        let a = field.from_int(a);
        let b = field.from_int(b);
        Curve { field, a, b }
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn a(&self) -> &F::Elem {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &F::Elem {
        &self.b
    }

    /// Every point of the curve, Infinity first.
    ///
    /// Affine points follow the field's element order in `x`, and for each
    /// `x` the roots `y` in the same order. Square roots come from a table of
    /// every field square, so the cost is one pass over the field for the
    /// table and one for the abscissas.
    pub fn points(&self) -> Vec<Point<F::Elem>> {
        let elements = self.field.elements();

        let mut roots: HashMap<F::Elem, Vec<F::Elem>> = HashMap::new();
        for y in &elements {
            roots.entry(self.field.square(y)).or_default().push(*y);
        }

        let mut points = vec![Point::Infinity];
        for x in &elements {
            if let Some(ys) = roots.get(&self.rhs(x)) {
                points.extend(ys.iter().map(|y| Point::new(*x, *y)));
            }
        }

        debug!("enumerated {} points", points.len());
        points
    }

    /// `#E`, including the point at infinity.
    pub fn point_count(&self) -> usize {
        self.points().len()
    }

    /// The cyclic subgroup generated by `point`: `[P, 2P, ..., O]`.
    ///
    /// The length of the cycle is the order of `point`.
    pub fn cycle(&self, point: &Point<F::Elem>) -> Result<Vec<Point<F::Elem>>> {
        let points = self.points();
        let set: HashSet<_> = points.iter().copied().collect();
        self.cycle_in(point, &set)
    }

    /// [`Curve::cycle`] against an already enumerated point set.
    pub(crate) fn cycle_in(
        &self,
        point: &Point<F::Elem>,
        set: &HashSet<Point<F::Elem>>,
    ) -> Result<Vec<Point<F::Elem>>> {
        if !set.contains(point) {
            return Err(Error::consistency(format!("{point} is not on the curve")));
        }
        if point.is_infinity() {
            return Ok(vec![Point::Infinity]);
        }

        let mut cycle = vec![*point];
        let mut current = *point;
        while !current.is_infinity() {
            current = self.add(&current, point)?;
            if !set.contains(&current) {
                return Err(Error::consistency(format!(
                    "multiple {current} of {point} left the group"
                )));
            }
            cycle.push(current);
            if cycle.len() > set.len() {
                return Err(Error::domain(format!(
                    "order of {point} exceeds the group size {}",
                    set.len()
                )));
            }
        }

        trace!("{point} has order {}", cycle.len());
        Ok(cycle)
    }

    /// Cycles of every non-infinity point in `points`, in order.
    pub fn cycles_of(&self, points: &[Point<F::Elem>]) -> Result<Vec<Vec<Point<F::Elem>>>> {
        let set: HashSet<_> = self.points().into_iter().collect();
        points
            .iter()
            .filter(|p| !p.is_infinity())
            .map(|p| self.cycle_in(p, &set))
            .collect()
    }

    /// Cycles of every affine point of the curve.
    pub fn all_cycles(&self) -> Result<Vec<Vec<Point<F::Elem>>>> {
        let points = self.points();
        self.cycles_of(&points)
    }

    /// The distinct cyclic subgroups, each represented by the cycle of the
    /// first point (in enumeration order) that generates it.
    pub fn unique_cycles(&self) -> Result<Vec<Vec<Point<F::Elem>>>> {
        let cycles = unique_cycle_filter(self.all_cycles()?);
        debug!(
            "unique cycle orders: {:?}",
            cycles.iter().map(Vec::len).collect::<Vec<_>>()
        );
        Ok(cycles)
    }

    /// The r-torsion `E[r] = { P : r·P = O }`.
    ///
    /// Fails with a domain error when `r` does not divide `#E`.
    pub fn torsion(&self, r: i64) -> Result<Vec<Point<F::Elem>>> {
        if r <= 0 {
            return Err(Error::invalid(format!("torsion order must be positive, got {r}")));
        }

        let points = self.points();
        if points.len() as i64 % r != 0 {
            return Err(Error::domain(format!(
                "r = {r} is not a factor of #E = {}",
                points.len()
            )));
        }

        let mut torsion = Vec::new();
        for point in points {
            if self.scalar_mul(r, &point)?.is_infinity() {
                torsion.push(point);
            }
        }
        debug!("E[{r}] has {} points", torsion.len());
        Ok(torsion)
    }

    /// Distinct cyclic subgroups inside `E[r]`.
    pub fn torsion_unique_cycles(&self, r: i64) -> Result<Vec<Vec<Point<F::Elem>>>> {
        let torsion = self.torsion(r)?;
        Ok(unique_cycle_filter(self.cycles_of(&torsion)?))
    }

    /// `{ p + q : p ∈ first, q ∈ second }`, without repetitions, in the order
    /// the sums are first produced.
    pub fn cartesian_product(
        &self,
        first: &[Point<F::Elem>],
        second: &[Point<F::Elem>],
    ) -> Result<Vec<Point<F::Elem>>> {
        let mut seen = HashSet::new();
        let mut product = Vec::new();
        for p in first {
            for q in second {
                let sum = self.add(p, q)?;
                if seen.insert(sum) {
                    product.push(sum);
                }
            }
        }
        Ok(product)
    }

    /// Cartesian product of the `n`-th and `m`-th unique cycles.
    pub fn cycle_product(&self, n: usize, m: usize) -> Result<Vec<Point<F::Elem>>> {
        let cycles = self.unique_cycles()?;
        let lookup = |idx: usize| {
            cycles.get(idx).ok_or_else(|| {
                Error::domain(format!(
                    "cycle index {idx} out of range, only {} unique cycles",
                    cycles.len()
                ))
            })
        };
        self.cartesian_product(lookup(n)?, lookup(m)?)
    }

    /// Add every unordered pair of curve points and confirm the sum stays on
    /// the curve.
    ///
    /// Degenerate sums are tallied as not computed; a sum outside the point
    /// set is a consistency error.
    pub fn closure_check(&self) -> Result<CheckReport> {
        let points = self.points();
        let mut report = CheckReport::default();

        for (i, p) in points.iter().enumerate() {
            for q in &points[i..] {
                match self.add(p, q) {
                    Ok(sum) if contains(&points, &sum) => report.confirmed += 1,
                    Ok(sum) => {
                        return Err(Error::consistency(format!(
                            "{p} + {q} = {sum} is not on the curve"
                        )))
                    }
                    Err(err) if err.is_degenerate() => {
                        trace!("{p} + {q} not computed: {err}");
                        report.not_computed += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        debug!(
            "closure: confirmed {}, not computed {}",
            report.confirmed, report.not_computed
        );
        Ok(report)
    }
}
