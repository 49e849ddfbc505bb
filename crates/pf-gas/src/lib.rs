//! Real-gas compressibility and natural-gas pseudo-properties.
//!
//! Nine Standing-Katz chart fits (explicit and iterative) plus the
//! pseudo-critical mixing rules and sour-gas corrections needed to drive
//! them from a gas gravity and contaminant analysis.

pub mod error;
pub mod natural_gas;
pub mod pseudocritical;
pub mod solve;
pub mod zfactor;

pub use error::{GasError, GasResult};
pub use natural_gas::NaturalGas;
pub use pseudocritical::{PseudoCriticals, SourCorrection};
pub use zfactor::ZMethod;
