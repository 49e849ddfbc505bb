//! Correlation errors.

use thiserror::Error;

/// Result type for correlation evaluations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur while evaluating a literature correlation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Input outside the correlation's documented validity box.
    #[error("{method}: {what} out of correlation range")]
    OutOfRange {
        method: &'static str,
        what: &'static str,
    },

    /// Ordered input pair not present in a generalized correlation's table.
    #[error("unsupported input pair ({first}, {second})")]
    InvalidInputPair {
        first: &'static str,
        second: &'static str,
    },

    /// Invalid argument (non-physical or missing).
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// An inner iterative solve did not converge.
    #[error("{method}: convergence failed ({what})")]
    ConvergenceFailed {
        method: &'static str,
        what: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PropsError::OutOfRange {
            method: "riazi_daubert_1980",
            what: "Tb",
        };
        assert!(err.to_string().contains("riazi_daubert_1980"));

        let err = PropsError::InvalidInputPair {
            first: "Tb",
            second: "M",
        };
        assert!(err.to_string().contains("Tb"));
    }
}
