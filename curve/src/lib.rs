//! Elliptic curves over small prime fields and their quadratic extensions.
//!
//! This crate provides modular arithmetic, the fields `F_p` and
//! `F_p[i] / (i² − iSQR)`, the affine and projective group law, brute-force
//! point enumeration with the subgroup structure built on it, and the Weil
//! and Tate pairings computed with Miller's algorithm. Fields are tiny and
//! every algorithm favours transparency over speed.

mod affine;
mod config;
mod curve;
mod error;
mod extension;
mod field;
mod group;
pub mod modular;
mod msm;
mod pairing;
mod projective;
mod random;
mod torsion;

pub use affine::Point;
pub use config::{CurveConfig, CurveParams, Requirement};
pub use curve::{BaseCurve, BasePoint, CheckReport, Curve, ExtPoint, ExtensionCurve};
pub use error::{Error, ErrorKind, Result};
pub use extension::{Fp2, Fp2Field, DEFAULT_I_SQR};
pub use field::{FiniteField, PrimeField};
pub use group::{contains, filter_cycles_by_order, set_equals, set_subtract, unique_cycle_filter};
pub use pairing::{LineFunction, MillerState, MillerStep};
pub use projective::Projective;
pub use random::RandomField;
pub use torsion::{embedding_degree, PairingCurve, MAX_EMBEDDING_DEGREE};
