//! Random field elements and curve points.

use rand::Rng;

use crate::affine::Point;
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::extension::{Fp2, Fp2Field};
use crate::field::{FiniteField, PrimeField};

/// Helper trait for sampling random field elements.
pub trait RandomField: FiniteField {
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Elem;
}

impl RandomField for PrimeField {
    #[inline]
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(0..self.modulus())
    }
}

impl RandomField for Fp2Field {
    #[inline]
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp2 {
        let p = self.modulus();
        Fp2::new(rng.random_range(0..p), rng.random_range(0..p))
    }
}

impl<F: RandomField> Curve<F> {
    /// Sample `x` until `x³ + A·x + B` is a square, then pick one of its
    /// roots as `y`.
    ///
    /// Gives up after a number of draws proportional to the field size, which
    /// only happens on curves with (almost) no affine points.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point<F::Elem>> {
        let field = self.field();
        let elements = field.elements();
        let attempts = 4 * elements.len();

        for _ in 0..attempts {
            let x = field.random(rng);
            let rhs = self.rhs(&x);
            let roots: Vec<_> = elements
                .iter()
                .filter(|y| field.square(y) == rhs)
                .copied()
                .collect();
            if !roots.is_empty() {
                let y = roots[rng.random_range(0..roots.len())];
                return Ok(Point::new(x, y));
            }
        }

        Err(Error::domain(format!(
            "no curve point found after {attempts} random abscissas"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, proptest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_elements_are_canonical() {
        let mut rng = StdRng::seed_from_u64(42);
        let f = PrimeField::new(11).unwrap();
        let g = Fp2Field::new(11, -1).unwrap();
        for _ in 0..100 {
            let a = f.random(&mut rng);
            assert!((0..11).contains(&a));
            let b = g.random(&mut rng);
            assert!((0..11).contains(&b.re) && (0..11).contains(&b.im));
        }
    }

    #[test]
    fn test_random_point_on_curve() {
        let mut rng = StdRng::seed_from_u64(42);
        let base = Curve::new(PrimeField::new(11).unwrap(), 4, 3);
        let ext = Curve::new(Fp2Field::new(19, -1).unwrap(), 14, 3);
        for _ in 0..20 {
            let p = base.random_point(&mut rng).unwrap();
            assert!(base.is_on_curve(&p));
            let q = ext.random_point(&mut rng).unwrap();
            assert!(ext.is_on_curve(&q));
        }
    }

    proptest! {
        #[test]
        fn random_point_sums_stay_on_curve(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let base = Curve::new(PrimeField::new(11).unwrap(), 4, 3);
            let ext = Curve::new(Fp2Field::new(19, -1).unwrap(), 14, 3);

            let (p, q) = (base.random_point(&mut rng).unwrap(), base.random_point(&mut rng).unwrap());
            prop_assert!(base.is_on_curve(&base.add(&p, &q).unwrap()));
            prop_assert!(base.is_on_curve(&base.double(&p).unwrap()));

            let (p, q) = (ext.random_point(&mut rng).unwrap(), ext.random_point(&mut rng).unwrap());
            prop_assert!(ext.is_on_curve(&ext.add(&p, &q).unwrap()));
            prop_assert!(ext.is_on_curve(&ext.sub(&p, &q).unwrap()));
        }
    }
}
