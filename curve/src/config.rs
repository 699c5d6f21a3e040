//! Curve descriptors as accepted from callers, and the typed handles built
//! from them.
//!
//! A descriptor may leave out fields that only some operations need. Each
//! builder names the [`Requirement`] it depends on and fails with
//! [`Error::MissingField`] before any arithmetic runs.

use serde::{Deserialize, Serialize};

use crate::curve::{BaseCurve, Curve, ExtensionCurve};
use crate::error::{Error, Result};
use crate::extension::{Fp2Field, DEFAULT_I_SQR};
use crate::field::PrimeField;
use crate::torsion::PairingCurve;

/// Which descriptor fields an operation requires. Levels are cumulative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    /// `fieldN`
    N,
    /// `fieldN`, `coeffA`
    NA,
    /// `fieldN`, `coeffA`, `coeffB`
    NAB,
    /// `fieldN`, `coeffA`, `coeffB`, `rorder`
    NABR,
}

fn default_i_sqr() -> i64 {
    DEFAULT_I_SQR
}

/// `{fieldN, coeffA?, coeffB?, rorder?, iSQR?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveConfig {
    pub field_n: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeff_a: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeff_b: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rorder: Option<i64>,
    #[serde(rename = "iSQR", default = "default_i_sqr")]
    pub i_sqr: i64,
}

/// A descriptor after validation. Fields the requested level does not
/// cover default to zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    pub field_n: i64,
    pub coeff_a: i64,
    pub coeff_b: i64,
    pub rorder: i64,
    pub i_sqr: i64,
}

impl CurveConfig {
    pub fn new(field_n: i64) -> Self {
        CurveConfig {
            field_n,
            coeff_a: None,
            coeff_b: None,
            rorder: None,
            i_sqr: DEFAULT_I_SQR,
        }
    }

    pub fn with_coefficients(mut self, a: i64, b: i64) -> Self {
        self.coeff_a = Some(a);
        self.coeff_b = Some(b);
        self
    }

    pub fn with_rorder(mut self, rorder: i64) -> Self {
        self.rorder = Some(rorder);
        self
    }

    pub fn with_i_sqr(mut self, i_sqr: i64) -> Self {
        self.i_sqr = i_sqr;
        self
    }

    /// Validate the fields demanded by `req` and return them.
    pub fn unpack(&self, req: Requirement) -> Result<CurveParams> {
        if self.field_n <= 0 {
            return Err(Error::invalid(format!(
                "fieldN must be positive, got {}",
                self.field_n
            )));
        }

        let require = |level: Requirement, value: Option<i64>, name: &'static str| {
            match value {
                Some(v) => Ok(v),
                None if req >= level => Err(Error::MissingField(name)),
                None => Ok(0),
            }
        };

        Ok(CurveParams {
            field_n: self.field_n,
            coeff_a: require(Requirement::NA, self.coeff_a, "coeffA")?,
            coeff_b: require(Requirement::NAB, self.coeff_b, "coeffB")?,
            rorder: require(Requirement::NABR, self.rorder, "rorder")?,
            i_sqr: self.i_sqr,
        })
    }

    pub fn prime_field(&self) -> Result<PrimeField> {
        PrimeField::new(self.unpack(Requirement::N)?.field_n)
    }

    pub fn extension_field(&self) -> Result<Fp2Field> {
        let params = self.unpack(Requirement::N)?;
        Fp2Field::new(params.field_n, params.i_sqr)
    }

    pub fn base_curve(&self) -> Result<BaseCurve> {
        let params = self.unpack(Requirement::NAB)?;
        Ok(Curve::new(
            PrimeField::new(params.field_n)?,
            params.coeff_a,
            params.coeff_b,
        ))
    }

    pub fn extension_curve(&self) -> Result<ExtensionCurve> {
        let params = self.unpack(Requirement::NAB)?;
        Ok(Curve::new(
            Fp2Field::new(params.field_n, params.i_sqr)?,
            params.coeff_a,
            params.coeff_b,
        ))
    }

    /// Extension curve for operations that only need `A`, such as the
    /// projective formulas. A missing `coeffB` is taken as zero.
    pub fn arithmetic_curve(&self) -> Result<ExtensionCurve> {
        let params = self.unpack(Requirement::NA)?;
        Ok(Curve::new(
            Fp2Field::new(params.field_n, params.i_sqr)?,
            params.coeff_a,
            params.coeff_b,
        ))
    }

    pub fn pairing_curve(&self) -> Result<PairingCurve> {
        let params = self.unpack(Requirement::NABR)?;
        PairingCurve::new(
            params.field_n,
            params.coeff_a,
            params.coeff_b,
            params.rorder,
            params.i_sqr,
        )
    }
}
