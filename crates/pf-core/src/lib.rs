//! pf-core: stable foundation for petrofrac.
//!
//! Contains:
//! - units (uom SI types + petroleum-native constructors/accessors)
//! - numeric (tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
