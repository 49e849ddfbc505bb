//! Product-quality point properties: freezing, cloud, pour, aniline,
//! smoke, flash, cetane and diesel indices.
//!
//! All from the API Technical Data Book / Riazi fits. Each keeps its native
//! regression units behind the typed interface.

use crate::error::{PropsError, PropsResult};
use pf_core::units::{c_of, f_of, k_of, kelvin, r_of, rankine, watson_k, Temperature};

/// Freezing point of a fraction (API procedure 2B7.1).
pub fn freezing_point(tb: Temperature, sg: f64) -> PropsResult<Temperature> {
    let tb_r = r_of(tb);
    if !(400.0..=1100.0).contains(&tb_r) {
        return Err(PropsError::OutOfRange {
            method: "freezing_point",
            what: "Tb",
        });
    }
    let kw = watson_k(tb, sg);
    Ok(rankine(
        -2390.42 + 1826.0 * sg + 122.49 * kw - 0.135 * tb_r,
    ))
}

/// Aniline point (API procedure 2B9.1).
pub fn aniline_point(tb: Temperature, sg: f64) -> PropsResult<Temperature> {
    let tb_r = r_of(tb);
    if !(400.0..=1100.0).contains(&tb_r) {
        return Err(PropsError::OutOfRange {
            method: "aniline_point",
            what: "Tb",
        });
    }
    let kw = watson_k(tb, sg);
    Ok(rankine(-1253.7 - 0.139 * tb_r + 107.8 * kw + 868.7 * sg))
}

/// Smoke point [mm] (API procedure 2B10.1); jet-fuel and kerosene range.
pub fn smoke_point(tb: Temperature, sg: f64) -> PropsResult<f64> {
    let tb_r = r_of(tb);
    if !(700.0..=1000.0).contains(&tb_r) {
        return Err(PropsError::OutOfRange {
            method: "smoke_point",
            what: "Tb",
        });
    }
    let kw = watson_k(tb, sg);
    Ok((-1.028 + 0.474 * kw - 0.00168 * tb_r).exp())
}

/// Cloud point (API procedure 2B12.1).
pub fn cloud_point(tb: Temperature, sg: f64) -> PropsResult<Temperature> {
    let tb_r = r_of(tb);
    if !(800.0..=1300.0).contains(&tb_r) {
        return Err(PropsError::OutOfRange {
            method: "cloud_point",
            what: "Tb",
        });
    }
    let exponent =
        -7.41 + 5.49 * tb_r.log10() - 0.712 * tb_r.powf(0.315) - 0.133 * sg;
    Ok(rankine(10f64.powf(exponent)))
}

/// Pour point (API procedure 2B8.1) from specific gravity, molecular weight
/// and the kinematic viscosity at 100°F in cSt.
pub fn pour_point(sg: f64, m: f64, v100_cst: f64) -> PropsResult<Temperature> {
    if m <= 0.0 || v100_cst <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "M and v100 must be positive",
        });
    }
    Ok(kelvin(
        130.47
            * sg.powf(2.970566)
            * m.powf(0.61235 - 0.47357 * sg)
            * v100_cst.powf(0.310331 - 0.32834 * sg),
    ))
}

/// Flash point from the 10% distillation temperature (API procedure 2B6.1),
/// `1/T_FP = -0.024209 + 2.84947/T10 + 3.4254e-3·ln(T10)` in K.
pub fn flash_point(t10: Temperature) -> PropsResult<Temperature> {
    let t10_k = k_of(t10);
    if !(300.0..=700.0).contains(&t10_k) {
        return Err(PropsError::OutOfRange {
            method: "flash_point",
            what: "T10",
        });
    }
    let inv = -0.024209 + 2.84947 / t10_k + 3.4254e-3 * t10_k.ln();
    Ok(kelvin(1.0 / inv))
}

/// Calculated cetane index, ASTM D976, from density at 15°C [g/cm³] and the
/// 50% distillation temperature.
pub fn cetane_index(density_g_cc: f64, t50: Temperature) -> PropsResult<f64> {
    let t50_c = c_of(t50);
    if !(0.0..=500.0).contains(&t50_c) || density_g_cc <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "T50 or density out of bounds for D976",
        });
    }
    let rho = density_g_cc;
    Ok(454.74 - 1641.416 * rho + 774.74 * rho * rho - 0.554 * t50_c
        + 97.803 * t50_c.log10().powi(2))
}

/// Diesel index, `API · aniline_point(°F) / 100`.
pub fn diesel_index(api: f64, aniline: Temperature) -> f64 {
    api * f_of(aniline) / 100.0
}
