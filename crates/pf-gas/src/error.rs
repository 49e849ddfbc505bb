//! Gas-side errors.

use thiserror::Error;

/// Result type for gas-property evaluations.
pub type GasResult<T> = Result<T, GasError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Reduced state outside a chart fit's validity box.
    #[error("{method}: reduced state (Tr={tr:.3}, Pr={pr:.3}) out of range")]
    OutOfRange {
        method: &'static str,
        tr: f64,
        pr: f64,
    },

    /// Invalid argument (non-physical composition or gravity).
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Iterative chart fit did not converge.
    #[error("{method}: convergence failed after {iterations} iterations")]
    ConvergenceFailed {
        method: &'static str,
        iterations: usize,
    },
}
