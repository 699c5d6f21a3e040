//! Multi-scalar multiplication.

use crate::affine::Point;
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::FiniteField;

impl<F: FiniteField> Curve<F> {
    /// Compute `Σ kᵢ·Pᵢ` with one shared doubling chain.
    ///
    /// Scalars are scanned from their top bit down; every round doubles the
    /// accumulator once and adds each point whose scalar has that bit set.
    pub fn linear_combination(
        &self,
        points: &[Point<F::Elem>],
        scalars: &[i64],
    ) -> Result<Point<F::Elem>> {
        if points.len() != scalars.len() {
            return Err(Error::invalid(format!(
                "{} points but {} scalars",
                points.len(),
                scalars.len()
            )));
        }
        if let Some(k) = scalars.iter().find(|k| **k < 0) {
            return Err(Error::invalid(format!("negative scalar {k}")));
        }

        let bits = scalars
            .iter()
            .map(|k| 64 - k.leading_zeros())
            .max()
            .unwrap_or(0);

        let mut result = Point::Infinity;
        for bit in (0..bits).rev() {
            result = self.double(&result)?;
            for (point, scalar) in points.iter().zip(scalars) {
                if (*scalar >> bit) & 1 == 1 {
                    result = self.add(&result, point)?;
                }
            }
        }

        Ok(result)
    }
}
