//! Acentric factor and critical compressibility correlations.

use crate::error::{PropsError, PropsResult};
use pf_core::units::{constants::P_ATM_PSI, psi_of, r_of, Pressure, Temperature};

/// Edmister (1958) acentric factor from the three-point vapor pressure line.
pub fn w_edmister(tc: Temperature, pc: Pressure, tb: Temperature) -> PropsResult<f64> {
    let tbr = r_of(tb) / r_of(tc);
    if !(0.0..1.0).contains(&tbr) {
        return Err(PropsError::InvalidArg {
            what: "Tb must be below Tc",
        });
    }
    Ok(3.0 / 7.0 * (psi_of(pc) / P_ATM_PSI).log10() / (1.0 / tbr - 1.0) - 1.0)
}

/// Lee-Kesler (1975) acentric factor from the f0/f1 vapor-pressure expansion
/// (low reduced boiling point) or the Watson-K branch above Tbr = 0.8.
pub fn w_lee_kesler(tc: Temperature, pc: Pressure, tb: Temperature, sg: f64) -> PropsResult<f64> {
    let tbr = r_of(tb) / r_of(tc);
    if !(0.0..1.0).contains(&tbr) {
        return Err(PropsError::InvalidArg {
            what: "Tb must be below Tc",
        });
    }
    if tbr <= 0.8 {
        let f0 = 5.92714 - 6.09648 / tbr - 1.28862 * tbr.ln() + 0.169347 * tbr.powi(6);
        let f1 = 15.2518 - 15.6875 / tbr - 13.4721 * tbr.ln() + 0.43577 * tbr.powi(6);
        Ok(((P_ATM_PSI / psi_of(pc)).ln() - f0) / f1)
    } else {
        let kw = pf_core::units::watson_k(tb, sg);
        Ok(-7.904 + 0.1352 * kw - 0.007465 * kw * kw + 8.359 * tbr
            + (1.408 - 0.01063 * kw) / tbr)
    }
}

/// Korsten (2000) acentric factor, a reworking of Edmister with a 1.3
/// exponent on reduced temperature.
pub fn w_korsten(tc: Temperature, pc: Pressure, tb: Temperature) -> PropsResult<f64> {
    let tbr = r_of(tb) / r_of(tc);
    if !(0.0..1.0).contains(&tbr) {
        return Err(PropsError::InvalidArg {
            what: "Tb must be below Tc",
        });
    }
    let t13 = tbr.powf(1.3);
    Ok(0.5899 * t13 / (1.0 - t13) * (psi_of(pc) / P_ATM_PSI).log10() - 1.0)
}

/// Critical compressibility, Hougen (1959): `Zc = 1/(1.28 w + 3.41)`.
pub fn zc_hougen(w: f64) -> f64 {
    1.0 / (1.28 * w + 3.41)
}

/// Critical compressibility, Reid (1977): `Zc = 0.291 − 0.080 w`.
pub fn zc_reid(w: f64) -> f64 {
    0.291 - 0.080 * w
}

/// Critical compressibility, Salerno (1986).
pub fn zc_salerno(w: f64) -> f64 {
    0.291 - 0.080 * w - 0.016 * w * w
}

/// Critical compressibility, Nath (1985).
pub fn zc_nath(w: f64) -> f64 {
    0.2918 - 0.0928 * w
}

/// Critical compressibility, Lee-Kesler (1975).
pub fn zc_lee_kesler(w: f64) -> f64 {
    0.2905 - 0.085 * w
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::{psi, rankine};
    use proptest::prelude::*;

    #[test]
    fn lee_kesler_low_branch_worked_example() {
        // Kerosene-like fraction from the Kesler-Lee fit itself.
        let w = w_lee_kesler(rankine(980.6), psi(470.2), rankine(657.67), 0.7365).unwrap();
        assert_relative_eq!(w, 0.306, max_relative = 3e-3);
    }

    #[test]
    fn edmister_and_korsten_agree_roughly() {
        let tc = rankine(980.6);
        let pc = psi(470.2);
        let tb = rankine(657.67);
        let we = w_edmister(tc, pc, tb).unwrap();
        let wk = w_korsten(tc, pc, tb).unwrap();
        assert!((we - wk).abs() < 0.05, "edmister {we} vs korsten {wk}");
    }

    #[test]
    fn rejects_tb_above_tc() {
        assert!(w_edmister(rankine(600.0), psi(400.0), rankine(700.0)).is_err());
        assert!(w_korsten(rankine(600.0), psi(400.0), rankine(700.0)).is_err());
        assert!(w_lee_kesler(rankine(600.0), psi(400.0), rankine(700.0), 0.8).is_err());
    }

    #[test]
    fn zc_methods_near_029_for_small_w() {
        for f in [zc_hougen, zc_reid, zc_salerno, zc_nath, zc_lee_kesler] {
            let zc = f(0.0);
            assert!((0.28..0.30).contains(&zc), "Zc(0) = {zc}");
        }
    }

    proptest! {
        // All five Zc fits decrease with increasing acentric factor.
        #[test]
        fn zc_decreases_with_w(w in 0.0f64..1.5) {
            let d = 1e-3;
            for f in [zc_hougen, zc_reid, zc_salerno, zc_nath, zc_lee_kesler] {
                prop_assert!(f(w + d) < f(w));
            }
        }
    }
}
