//! Distillation-curve algebra: validated curves, the laboratory-assay
//! interconversions, sub-atmospheric pressure correction and the
//! probability-distribution curve fit.

pub mod averages;
pub mod convert;
pub mod curve;
pub mod error;
pub mod fit;
pub mod pressure;

pub use averages::BoilingAverages;
pub use curve::{CurveKind, DistillationCurve};
pub use error::{DistillError, DistillResult};
pub use fit::CurveFit;
