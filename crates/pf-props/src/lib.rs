//! Pure correlation library for petroleum-fraction characterization.
//!
//! Every function here is stateless: typed inputs in, a [`PropertySet`] (or
//! scalar) out. Correlations regressed with hard empirical bounds check them
//! and return [`PropsError::OutOfRange`] instead of extrapolating silently.
//! Internal arithmetic keeps each correlation's native unit system (°R/psia
//! for the API-era fits, K/bar for Riazi's SI tables) behind the typed
//! accessors from `pf-core`.

pub mod acentric;
pub mod composition;
pub mod criticals;
pub mod error;
pub mod points;
pub mod viscosity;

pub use acentric::*;
pub use composition::*;
pub use criticals::*;
pub use error::{PropsError, PropsResult};
pub use points::*;
pub use viscosity::*;
