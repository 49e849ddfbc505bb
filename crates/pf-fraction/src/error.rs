//! Orchestration errors: wraps the per-crate correlation errors and adds
//! the dispatcher's own failure kinds.

use thiserror::Error;

pub type FractionResult<T> = Result<T, FractionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FractionError {
    /// No definition mode matched the supplied inputs.
    #[error("insufficient input: no definition mode matches the supplied measurements")]
    InsufficientInput,

    /// A derived property needs an upstream value that failed or is absent.
    #[error("missing dependency: {what}")]
    MissingDependency { what: &'static str },

    /// Invalid argument at the orchestration boundary.
    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Base-pair resolution iteration did not converge.
    #[error("{method}: base-pair resolution did not converge")]
    ResolutionFailed { method: &'static str },

    #[error(transparent)]
    Core(#[from] pf_core::CoreError),

    #[error(transparent)]
    Props(#[from] pf_props::PropsError),

    #[error(transparent)]
    Gas(#[from] pf_gas::GasError),

    #[error(transparent)]
    Distill(#[from] pf_distill::DistillError),
}
