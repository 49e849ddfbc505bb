//! Curve-algebra errors.

use thiserror::Error;

pub type DistillResult<T> = Result<T, DistillError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistillError {
    /// Curve data violates the monotonicity contract.
    #[error("invalid curve: {what}")]
    InvalidCurve { what: &'static str },

    /// Requested fraction outside the tabulated span.
    #[error("fraction {fraction} outside curve span [{lo}, {hi}]")]
    OutOfSpan { fraction: f64, lo: f64, hi: f64 },

    /// Invalid argument (non-physical pressure, empty data, ...).
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Curve fit or root solve did not converge.
    #[error("{method}: convergence failed after {iterations} iterations")]
    ConvergenceFailed {
        method: &'static str,
        iterations: usize,
    },
}
