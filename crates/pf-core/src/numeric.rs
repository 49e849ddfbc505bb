//! Convergence tolerances and float guards for the iterative solvers
//! (Z-factor chart fits, base-pair resolution, curve fitting).

use crate::error::{CoreError, CoreResult};

/// Paired absolute/relative tolerance for scalar iteration.
///
/// The iterates these guard are O(1) reduced properties (Z, reduced
/// density) or temperatures in K, so one default pair serves the
/// whole engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    /// Absolute floor, dominant near zero
    pub abs: f64,
    /// Relative band, dominant for O(1) and larger iterates
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Whether `a` and `b` agree within `tol`, absolute or relative.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Guard against NaN/inf escaping a correlation evaluation.
pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_scales_with_magnitude() {
        let tol = Tolerances::default();
        // O(1) compressibility iterates
        assert!(nearly_equal(0.8521, 0.8521 + 1e-11, tol));
        assert!(!nearly_equal(0.8521, 0.8530, tol));
        // psia-scale pressures lean on the relative band
        assert!(nearly_equal(1889.7, 1889.7 * (1.0 + 1e-10), tol));
        assert!(!nearly_equal(1889.7, 1890.7, tol));
    }

    #[test]
    fn absolute_floor_covers_near_zero() {
        assert!(nearly_equal(0.0, 5e-13, Tolerances::default()));
    }

    #[test]
    fn non_finite_is_rejected_with_context() {
        assert!(ensure_finite(0.9213, "z factor").is_ok());
        let err = ensure_finite(f64::NAN, "z factor").unwrap_err();
        assert!(format!("{err}").contains("z factor"));
        assert!(ensure_finite(f64::INFINITY, "pressure").is_err());
    }
}
