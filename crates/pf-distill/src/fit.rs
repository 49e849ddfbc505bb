//! Probability-distribution fit of a boiling curve.
//!
//! Model `T(x) = T0·(1 + (A/B·ln 1/(1−x))^(1/B))` with T in K. The three
//! parameters come out of a Levenberg-Marquardt iteration with a numeric
//! Jacobian; the caller judges the fit on `r_squared`.

use crate::error::{DistillError, DistillResult};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Fitted distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFit {
    /// Initial boiling temperature [K]
    pub t0: f64,
    /// Shape parameter A
    pub a: f64,
    /// Shape parameter B
    pub b: f64,
    /// Coefficient of determination against the input points
    pub r_squared: f64,
    /// LM iterations used
    pub iterations: usize,
}

/// Model temperature [K] at cumulative fraction `x`.
pub fn predicted_tb(fit: &CurveFit, x: f64) -> DistillResult<f64> {
    model(fit.t0, fit.a, fit.b, x)
}

fn model(t0: f64, a: f64, b: f64, x: f64) -> DistillResult<f64> {
    if !(0.0..1.0).contains(&x) {
        return Err(DistillError::InvalidArg {
            what: "fraction must lie in [0, 1)",
        });
    }
    let g = a / b * (1.0 / (1.0 - x)).ln();
    Ok(t0 * (1.0 + g.powf(1.0 / b)))
}

/// Fit the distribution model to `(x, T)` pairs. `x` are cumulative
/// fractions in [0, 1), `t` temperatures in K. Initial guess
/// `[T[0], 0.1, 1.0]`.
pub fn fit_distribution(x: &[f64], t: &[f64]) -> DistillResult<CurveFit> {
    if x.len() != t.len() || x.len() < 4 {
        return Err(DistillError::InvalidArg {
            what: "need at least 4 (x, T) pairs",
        });
    }
    if x.iter().any(|&xi| !(0.0..1.0).contains(&xi)) {
        return Err(DistillError::InvalidArg {
            what: "fractions must lie in [0, 1)",
        });
    }

    let n = x.len();
    let residuals = |p: &[f64; 3]| -> DistillResult<DVector<f64>> {
        let mut r = DVector::zeros(n);
        for i in 0..n {
            r[i] = model(p[0], p[1], p[2], x[i])? - t[i];
        }
        Ok(r)
    };

    let mut p = [t[0], 0.1, 1.0];
    let mut r = residuals(&p)?;
    let mut cost = r.norm_squared();
    let mut lambda = 1e-3;
    let mut iterations = 0;

    for iter in 0..100 {
        iterations = iter + 1;

        // Forward-difference Jacobian
        let mut jac = DMatrix::zeros(n, 3);
        for j in 0..3 {
            let mut ph = p;
            let h = 1e-6 * p[j].abs().max(1e-6);
            ph[j] += h;
            let rh = residuals(&ph)?;
            for i in 0..n {
                jac[(i, j)] = (rh[i] - r[i]) / h;
            }
        }

        let jtj = jac.transpose() * &jac;
        let jtr = jac.transpose() * &r;

        // Damped normal equations; raise lambda until a step helps.
        let mut stepped = false;
        for _ in 0..20 {
            let mut damped = jtj.clone();
            for j in 0..3 {
                damped[(j, j)] += lambda * jtj[(j, j)].max(1e-12);
            }
            if let Some(dp) = damped.lu().solve(&(-&jtr)) {
                let trial = [p[0] + dp[0], p[1] + dp[1], p[2] + dp[2]];
                if trial[0] > 0.0 && trial[1] > 0.0 && trial[2] > 0.0 {
                    if let Ok(r_trial) = residuals(&trial) {
                        let cost_trial = r_trial.norm_squared();
                        if cost_trial < cost {
                            p = trial;
                            r = r_trial;
                            cost = cost_trial;
                            lambda *= 0.3;
                            stepped = true;
                            break;
                        }
                    }
                }
            }
            lambda *= 10.0;
        }

        if !stepped {
            break;
        }
        if cost < 1e-12 {
            break;
        }
    }

    let t_mean = t.iter().sum::<f64>() / n as f64;
    let ss_tot: f64 = t.iter().map(|ti| (ti - t_mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - cost / ss_tot } else { 1.0 };

    debug!(t0 = p[0], a = p[1], b = p[2], r_squared, iterations, "curve fit");
    Ok(CurveFit {
        t0: p[0],
        a: p[1],
        b: p[2],
        r_squared,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_synthetic_parameters() {
        let (t0, a, b) = (350.0, 0.1679, 1.2586);
        let x: Vec<f64> = vec![0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let t: Vec<f64> = x
            .iter()
            .map(|&xi| model(t0, a, b, xi).unwrap())
            .collect();

        let fit = fit_distribution(&x, &t).unwrap();
        assert_relative_eq!(fit.t0, t0, max_relative = 1e-3);
        assert_relative_eq!(fit.a, a, max_relative = 1e-2);
        assert_relative_eq!(fit.b, b, max_relative = 1e-2);
        assert!(fit.r_squared > 0.9999, "R² = {}", fit.r_squared);
    }

    #[test]
    fn predicted_tb_matches_inputs() {
        let x = vec![0.1, 0.3, 0.5, 0.7, 0.9];
        let t = vec![320.0, 365.0, 400.0, 440.0, 495.0];
        let fit = fit_distribution(&x, &t).unwrap();
        assert!(fit.r_squared > 0.99, "R² = {}", fit.r_squared);
        for (&xi, &ti) in x.iter().zip(&t) {
            let pred = predicted_tb(&fit, xi).unwrap();
            assert_relative_eq!(pred, ti, max_relative = 0.02);
        }
    }

    #[test]
    fn model_is_monotonic_in_fraction() {
        let fit = CurveFit {
            t0: 350.0,
            a: 0.17,
            b: 1.26,
            r_squared: 1.0,
            iterations: 0,
        };
        let mut last = 0.0;
        for i in 1..19 {
            let t = predicted_tb(&fit, i as f64 / 20.0).unwrap();
            assert!(t > last);
            last = t;
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert!(fit_distribution(&[0.1, 0.2], &[300.0, 310.0]).is_err());
        assert!(fit_distribution(&[0.1, 0.5, 0.9, 1.0], &[300.0, 310.0, 320.0, 330.0]).is_err());
        let fit = CurveFit {
            t0: 350.0,
            a: 0.17,
            b: 1.26,
            r_squared: 1.0,
            iterations: 0,
        };
        assert!(predicted_tb(&fit, 1.0).is_err());
    }
}
