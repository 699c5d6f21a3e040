//! Pedersen commitments `s·G + t·H` on the extension curve.

use log::debug;
use serde::{Deserialize, Serialize};
use toy_curve::modular::{is_prime, posmod};
use toy_curve::{BasePoint, CurveConfig, ExtPoint, ExtensionCurve, Fp2Field, Requirement};

use crate::errors::PedersenError;

/// The two generators of a Pedersen commitment.
///
/// Nobody may know `log_G(H)`; otherwise commitments stop being binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenParams {
    pub g: ExtPoint,
    pub h: ExtPoint,
}

impl PedersenParams {
    pub fn new(g: ExtPoint, h: ExtPoint) -> Self {
        Self { g, h }
    }

    /// Generators given as base-field points, lifted into `field`.
    pub fn from_base(field: &Fp2Field, g: &BasePoint, h: &BasePoint) -> Self {
        Self {
            g: field.lift(g),
            h: field.lift(h),
        }
    }
}

/// A curve together with a prime subgroup order `r` and generators of that
/// subgroup.
///
/// Scalars and shares live modulo `r`. Construction checks that both
/// generators are distinct curve points of order exactly `r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pedersen {
    curve: ExtensionCurve,
    order: i64,
    params: PedersenParams,
}

impl Pedersen {
    /// Builds the scheme from a descriptor carrying `fieldN`, `coeffA`,
    /// `coeffB` and `rorder`.
    pub fn new(config: &CurveConfig, params: PedersenParams) -> Result<Self, PedersenError> {
        let order = config.unpack(Requirement::NABR)?.rorder;
        let curve = config.extension_curve()?;

        if !is_prime(order) {
            return Err(PedersenError::InvalidParams(format!(
                "subgroup order {order} is not prime"
            )));
        }
        if params.g == params.h {
            return Err(PedersenError::InvalidParams(
                "G and H must be distinct".to_string(),
            ));
        }
        for (name, point) in [("G", &params.g), ("H", &params.h)] {
            if point.is_infinity() || !curve.is_on_curve(point) {
                return Err(PedersenError::InvalidParams(format!(
                    "{name} = {point} is not an affine curve point"
                )));
            }
            if !curve.scalar_mul(order, point)?.is_infinity() {
                return Err(PedersenError::InvalidParams(format!(
                    "{name} = {point} does not have order {order}"
                )));
            }
        }

        debug!(
            "Pedersen scheme over E({}): G = {}, H = {}, r = {order}",
            curve.field().modulus(),
            params.g,
            params.h
        );

        Ok(Self {
            curve,
            order,
            params,
        })
    }

    pub fn curve(&self) -> &ExtensionCurve {
        &self.curve
    }

    /// Subgroup order `r`, the modulus of every scalar and share.
    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn params(&self) -> &PedersenParams {
        &self.params
    }

    /// Commits to `s` with blinding factor `t`: `s·G + t·H`.
    pub fn commit(&self, s: i64, t: i64) -> Result<ExtPoint, PedersenError> {
        let scalars = [posmod(s, self.order)?, posmod(t, self.order)?];
        let points = [self.params.g, self.params.h];
        Ok(self.curve.linear_combination(&points, &scalars)?)
    }
}
