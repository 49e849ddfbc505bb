//! Maxwell-Bonnell sub-atmospheric pressure correction and the vapor
//! pressure it implies.

use crate::error::{DistillError, DistillResult};
use pf_core::units::{k_of, kelvin, mmhg, mmhg_of, Pressure, Temperature};

// Q parameter, three pressure regimes (P in mmHg).
fn q_parameter(p_mmhg: f64) -> f64 {
    let lp = p_mmhg.log10();
    if p_mmhg < 2.0 {
        (6.76156 - 0.987672 * lp) / (3000.538 - 43.0 * lp)
    } else if p_mmhg <= 760.0 {
        (5.994296 - 0.972546 * lp) / (2663.129 - 95.76 * lp)
    } else {
        (6.412631 - 0.989679 * lp) / (2770.085 - 36.0 * lp)
    }
}

// Watson-K correction factor; paraffinicity only matters above 367 K.
fn kw_factor(tb_k: f64) -> f64 {
    if tb_k < 367.0 {
        0.0
    } else {
        -3.2985 + 0.009 * tb_k
    }
}

/// Normal (760 mmHg) boiling point equivalent of a temperature observed at
/// pressure `p`. `kw` applies the Watson-K paraffinicity correction; pass
/// 12.0 for a neutral stock.
pub fn normal_boiling_point(t: Temperature, p: Pressure, kw: f64) -> DistillResult<Temperature> {
    let p_mmhg = mmhg_of(p);
    if p_mmhg <= 0.0 {
        return Err(DistillError::InvalidArg {
            what: "pressure must be positive",
        });
    }
    let t_k = k_of(t);
    let q = q_parameter(p_mmhg);
    let tb = 748.1 * q * t_k / (1.0 + t_k * (0.3861 * q - 5.1606e-4));
    let corrected = tb - 1.3889 * kw_factor(tb) * (kw - 12.0) * (p_mmhg / 760.0).log10();
    Ok(kelvin(corrected))
}

/// Observed boiling point at pressure `p` for a stock with the given normal
/// boiling point; the inverse of [`normal_boiling_point`], found by secant.
pub fn tb_at_pressure(
    tb_normal: Temperature,
    p: Pressure,
    kw: f64,
) -> DistillResult<Temperature> {
    let target = k_of(tb_normal);
    let mut t0 = target * 0.7;
    let mut t1 = target;
    let mut f0 = k_of(normal_boiling_point(kelvin(t0), p, kw)?) - target;
    for iter in 0..100 {
        let f1 = k_of(normal_boiling_point(kelvin(t1), p, kw)?) - target;
        if f1.abs() < 1e-8 {
            return Ok(kelvin(t1));
        }
        let denom = f1 - f0;
        if denom.abs() < 1e-14 {
            return Err(DistillError::ConvergenceFailed {
                method: "tb_at_pressure",
                iterations: iter,
            });
        }
        let t2 = t1 - f1 * (t1 - t0) / denom;
        t0 = t1;
        f0 = f1;
        t1 = t2.max(20.0);
    }
    Err(DistillError::ConvergenceFailed {
        method: "tb_at_pressure",
        iterations: 100,
    })
}

/// Vapor pressure at temperature `t` of a stock with normal boiling point
/// `tb_normal`: the pressure at which `t` maps back to `tb_normal`.
/// Bisection on log10(P) over 1e-3 to 1e5 mmHg.
pub fn vapor_pressure(
    tb_normal: Temperature,
    kw: f64,
    t: Temperature,
) -> DistillResult<Pressure> {
    let target = k_of(tb_normal);
    let f = |log_p: f64| -> DistillResult<f64> {
        let p = mmhg(10f64.powf(log_p));
        Ok(k_of(normal_boiling_point(t, p, kw)?) - target)
    };
    let mut lo = -3.0;
    let mut hi = 5.0;
    // Higher pressure -> lower equivalent normal Tb, so f decreases in P.
    let f_lo = f(lo)?;
    let f_hi = f(hi)?;
    if f_lo * f_hi > 0.0 {
        return Err(DistillError::ConvergenceFailed {
            method: "vapor_pressure",
            iterations: 0,
        });
    }
    for _ in 0..100 {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;
        if f_mid.abs() < 1e-8 || hi - lo < 1e-12 {
            return Ok(mmhg(10f64.powf(mid)));
        }
        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(mmhg(10f64.powf(0.5 * (lo + hi))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::{atm, c_of, celsius};

    #[test]
    fn vacuum_observation_maps_to_higher_normal_tb() {
        // 200°C observed at 10 mmHg corresponds to ~349°C at 760 mmHg.
        let tb = normal_boiling_point(celsius(200.0), mmhg(10.0), 12.0).unwrap();
        assert_relative_eq!(c_of(tb), 349.0, epsilon = 2.0);
    }

    #[test]
    fn atmospheric_observation_is_nearly_identity() {
        let tb = normal_boiling_point(celsius(150.0), mmhg(760.0), 12.0).unwrap();
        assert_relative_eq!(c_of(tb), 150.0, epsilon = 1.5);
    }

    #[test]
    fn tb_at_pressure_inverts_normal_boiling_point() {
        let tb_normal = celsius(349.0);
        let t_obs = tb_at_pressure(tb_normal, mmhg(10.0), 12.0).unwrap();
        let back = normal_boiling_point(t_obs, mmhg(10.0), 12.0).unwrap();
        assert_relative_eq!(k_of(back), k_of(tb_normal), max_relative = 1e-7);
    }

    #[test]
    fn kw_correction_shifts_heavy_paraffinic_stock() {
        let neutral = normal_boiling_point(celsius(250.0), mmhg(10.0), 12.0).unwrap();
        let paraffinic = normal_boiling_point(celsius(250.0), mmhg(10.0), 12.5).unwrap();
        assert!((k_of(neutral) - k_of(paraffinic)).abs() > 0.5);
    }

    #[test]
    fn vapor_pressure_at_normal_tb_is_one_atmosphere() {
        let tb = celsius(150.0);
        let p = vapor_pressure(tb, 12.0, tb).unwrap();
        assert_relative_eq!(mmhg_of(p), mmhg_of(atm(1.0)), max_relative = 0.05);
    }

    #[test]
    fn vapor_pressure_rises_with_temperature() {
        let tb = celsius(150.0);
        let p1 = vapor_pressure(tb, 12.0, celsius(40.0)).unwrap();
        let p2 = vapor_pressure(tb, 12.0, celsius(80.0)).unwrap();
        assert!(mmhg_of(p2) > mmhg_of(p1));
        assert!(mmhg_of(p1) < 760.0);
    }

    #[test]
    fn rejects_nonpositive_pressure() {
        assert!(normal_boiling_point(celsius(200.0), mmhg(0.0), 12.0).is_err());
    }
}
