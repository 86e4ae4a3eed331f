//! Seam between this crate and the symbolic evaluation host.
//!
//! The host owns expression representation and simplification; this crate only
//! needs to build a handful of atom kinds and to hand rationals back for
//! simplification. `SymbolicValue` is the exchange type, `SymbolicHost` the
//! callback interface, and `ExactHost` a self-contained reference host used in
//! tests and simple embeddings.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

/// A numeric or textual atom exchanged with the host evaluator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SymbolicValue {
    Integer(i64),
    Rational(Ratio<i64>),
    Real(f64),
    Text(String),
}

impl SymbolicValue {
    /// Evaluate the atom to a floating-point value. Text atoms have no
    /// numeric value.
    pub fn round_to_float(&self) -> Option<f64> {
        match self {
            SymbolicValue::Integer(i) => Some(*i as f64),
            SymbolicValue::Rational(r) => Some(*r.numer() as f64 / *r.denom() as f64),
            SymbolicValue::Real(x) => Some(*x),
            SymbolicValue::Text(_) => None,
        }
    }
}

/// One element of a host matrix: either a single sample or a fixed-length
/// channel vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatrixElement {
    Scalar(SymbolicValue),
    Samples(Vec<SymbolicValue>),
}

/// Callback interface into the host evaluator.
///
/// Failures of the host are the only errors that escape the metadata
/// translator, so the error type is left to the implementor.
pub trait SymbolicHost {
    type Error;

    /// Simplify `numer / denom` into a host atom.
    fn simplify_rational(&mut self, numer: i64, denom: i64)
        -> Result<SymbolicValue, Self::Error>;
}

/// Rational with a zero denominator handed to [`ExactHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroDenominator {
    pub numer: i64,
}

impl std::fmt::Display for ZeroDenominator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zero denominator in rational {}/0", self.numer)
    }
}

impl std::error::Error for ZeroDenominator {}

/// Reference host: reduces fractions exactly and collapses integral results
/// to integers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactHost;

impl SymbolicHost for ExactHost {
    type Error = ZeroDenominator;

    fn simplify_rational(
        &mut self,
        numer: i64,
        denom: i64,
    ) -> Result<SymbolicValue, ZeroDenominator> {
        if denom == 0 {
            return Err(ZeroDenominator { numer });
        }
        let ratio = Ratio::new(numer, denom);
        Ok(if ratio.is_integer() {
            SymbolicValue::Integer(ratio.to_integer())
        } else {
            SymbolicValue::Rational(ratio)
        })
    }
}
