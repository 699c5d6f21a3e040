//! Polynomials over `Z/nZ` used to hide a secret in their constant term.

use rand::Rng;
use serde::{Deserialize, Serialize};
use toy_curve::modular::{multiply_mod, posmod};

use crate::errors::PedersenError;

/// A polynomial with coefficients stored lowest degree first, reduced
/// modulo `modulus`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial {
    modulus: i64,
    coefficients: Vec<i64>,
}

impl Polynomial {
    /// Builds a polynomial from explicit coefficients, lowest degree first.
    pub fn new(modulus: i64, coefficients: &[i64]) -> Result<Self, PedersenError> {
        check_modulus(modulus)?;
        let coefficients = coefficients
            .iter()
            .map(|c| posmod(*c, modulus))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            modulus,
            coefficients,
        })
    }

    /// Samples a polynomial of the given degree whose constant term is
    /// `constant mod modulus`.
    ///
    /// Every higher coefficient is drawn from `1..modulus`, so the degree is
    /// exact.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        modulus: i64,
        constant: i64,
        degree: usize,
    ) -> Result<Self, PedersenError> {
        check_modulus(modulus)?;

        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(posmod(constant, modulus)?);
        for _ in 0..degree {
            coefficients.push(rng.random_range(1..modulus));
        }

        Ok(Self {
            modulus,
            coefficients,
        })
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    pub fn constant(&self) -> i64 {
        self.coefficients.first().copied().unwrap_or(0)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` with Horner's rule.
    pub fn evaluate(&self, x: i64) -> Result<i64, PedersenError> {
        let n = self.modulus;
        let x = posmod(x, n)?;
        self.coefficients
            .iter()
            .rev()
            .try_fold(0, |acc, c| Ok((multiply_mod(acc, x, n)? + c) % n))
    }
}

fn check_modulus(modulus: i64) -> Result<(), PedersenError> {
    if modulus < 2 {
        return Err(toy_curve::Error::InvalidArgument(format!(
            "polynomial modulus must be at least 2, got {modulus}"
        ))
        .into());
    }
    Ok(())
}
