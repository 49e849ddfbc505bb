//! Bounded scalar iteration used by the implicit chart fits.

use crate::error::{GasError, GasResult};
use pf_core::numeric::{nearly_equal, Tolerances};

/// Scalar solver configuration.
pub struct SolveConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence band on the step (Newton) or update (substitution)
    pub tol: Tolerances,
    /// Damping factor for successive substitution
    pub damping: f64,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tol: Tolerances::default(),
            damping: 0.5,
        }
    }
}

/// Scalar iteration result.
pub struct SolveOutcome {
    /// Converged value
    pub value: f64,
    /// Iterations used
    pub iterations: usize,
}

/// Scalar Newton iteration with an analytic derivative. The iterate is
/// clamped to `(lo, hi)` so the rational chart fits never see a pole.
pub fn newton_scalar<F, D>(
    method: &'static str,
    x0: f64,
    lo: f64,
    hi: f64,
    f: F,
    df: D,
    config: &SolveConfig,
) -> GasResult<SolveOutcome>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0.clamp(lo, hi);
    for iter in 0..config.max_iterations {
        let fx = f(x);
        let dfx = df(x);
        if dfx == 0.0 || !dfx.is_finite() {
            return Err(GasError::ConvergenceFailed {
                method,
                iterations: iter,
            });
        }
        let x_new = (x - fx / dfx).clamp(lo, hi);
        if nearly_equal(x_new, x, config.tol) {
            // A step shrunk by the clamp is not convergence.
            if f(x_new).abs() > 1e-8 {
                return Err(GasError::ConvergenceFailed {
                    method,
                    iterations: iter + 1,
                });
            }
            return Ok(SolveOutcome {
                value: x_new,
                iterations: iter + 1,
            });
        }
        x = x_new;
    }
    Err(GasError::ConvergenceFailed {
        method,
        iterations: config.max_iterations,
    })
}

/// Damped successive substitution `x <- x + damping·(g(x) − x)`.
pub fn damped_substitution<G>(
    method: &'static str,
    x0: f64,
    g: G,
    config: &SolveConfig,
) -> GasResult<SolveOutcome>
where
    G: Fn(f64) -> f64,
{
    let mut x = x0;
    for iter in 0..config.max_iterations {
        let gx = g(x);
        if !gx.is_finite() {
            return Err(GasError::ConvergenceFailed {
                method,
                iterations: iter,
            });
        }
        if nearly_equal(gx, x, config.tol) {
            return Ok(SolveOutcome {
                value: gx,
                iterations: iter + 1,
            });
        }
        x += config.damping * (gx - x);
    }
    Err(GasError::ConvergenceFailed {
        method,
        iterations: config.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_finds_square_root() {
        let out = newton_scalar(
            "test",
            3.0,
            0.0,
            10.0,
            |x| x * x - 4.0,
            |x| 2.0 * x,
            &SolveConfig::default(),
        )
        .unwrap();
        assert!((out.value - 2.0).abs() < 1e-10);
    }

    #[test]
    fn substitution_finds_fixed_point() {
        // x = cos(x) has a fixed point near 0.739
        let out =
            damped_substitution("test", 1.0, |x| x.cos(), &SolveConfig::default()).unwrap();
        assert!((out.value - 0.739_085).abs() < 1e-5);
    }

    #[test]
    fn tolerance_governs_iteration_count() {
        let tight = damped_substitution("test", 1.0, |x| x.cos(), &SolveConfig::default()).unwrap();
        let loose = damped_substitution(
            "test",
            1.0,
            |x| x.cos(),
            &SolveConfig {
                tol: Tolerances {
                    abs: 1e-3,
                    rel: 1e-3,
                },
                ..Default::default()
            },
        )
        .unwrap();
        assert!(loose.iterations < tight.iterations);
    }

    #[test]
    fn newton_rejects_root_outside_bounds() {
        let err = newton_scalar(
            "test",
            5.0,
            0.0,
            10.0,
            |x| x - 20.0,
            |_| 1.0,
            &SolveConfig::default(),
        );
        assert!(matches!(err, Err(GasError::ConvergenceFailed { .. })));
    }
}
