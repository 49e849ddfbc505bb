//! Characterization front end: sparse-input dispatch into the correlation
//! crates, a whole-crude catalog with black-oil PVT, and the method
//! configuration that selects between correlation families.

pub mod assay;
pub mod config;
pub mod crude;
pub mod error;
pub mod fraction;
pub mod inputs;
pub mod pvt;

pub use assay::{crude_catalog, crude_record, CrudeAssay};
pub use config::Config;
pub use crude::CrudeOil;
pub use error::{FractionError, FractionResult};
pub use fraction::{PetroleumFraction, PropertyFailure};
pub use inputs::{DefinitionMode, FractionInputs};
pub use pvt::{ReservoirState, ViscosityRegime};
