//! Pseudo-critical mixing rules and sour-gas corrections.
//!
//! Standing's gravity fits give the sweet-gas base; Wichert-Aziz and
//! Carr-Kobayashi-Burrows shift it for acid-gas content. Whitson-Brûlé
//! instead strips the contaminants out, characterizes the hydrocarbon
//! remainder and Kay-mixes the contaminants back in.

use crate::error::{GasError, GasResult};
use pf_core::units::{psi, psi_of, r_of, rankine, Pressure, Temperature};

/// Pseudo-critical point of a gas mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoCriticals {
    pub tpc: Temperature,
    pub ppc: Pressure,
}

/// Acid-gas correction applied on top of a Standing base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourCorrection {
    #[default]
    None,
    WichertAziz,
    CarrKobayashiBurrows,
}

fn check_gravity(gravity: f64) -> GasResult<()> {
    if !(0.55..=1.75).contains(&gravity) {
        return Err(GasError::InvalidArg {
            what: "gas gravity outside 0.55-1.75",
        });
    }
    Ok(())
}

fn check_fraction(y: f64) -> GasResult<()> {
    if !(0.0..=1.0).contains(&y) {
        return Err(GasError::InvalidArg {
            what: "mole fraction outside [0, 1]",
        });
    }
    Ok(())
}

/// Standing (1977) pseudo-criticals for a dry (natural) gas, from gravity.
pub fn standing_dry(gravity: f64) -> GasResult<PseudoCriticals> {
    check_gravity(gravity)?;
    Ok(PseudoCriticals {
        tpc: rankine(168.0 + 325.0 * gravity - 12.5 * gravity * gravity),
        ppc: psi(677.0 + 15.0 * gravity - 37.5 * gravity * gravity),
    })
}

/// Standing (1977) pseudo-criticals for a wet (condensate) gas.
pub fn standing_wet(gravity: f64) -> GasResult<PseudoCriticals> {
    check_gravity(gravity)?;
    Ok(PseudoCriticals {
        tpc: rankine(187.0 + 330.0 * gravity - 71.5 * gravity * gravity),
        ppc: psi(706.0 - 51.7 * gravity - 11.1 * gravity * gravity),
    })
}

/// Wichert-Aziz (1972) acid-gas correction. `epsilon` shifts Tpc down and
/// Ppc along with it.
pub fn wichert_aziz(
    base: PseudoCriticals,
    y_co2: f64,
    y_h2s: f64,
) -> GasResult<PseudoCriticals> {
    check_fraction(y_co2)?;
    check_fraction(y_h2s)?;
    let a = y_co2 + y_h2s;
    let b = y_h2s;
    let epsilon = 120.0 * (a.powf(0.9) - a.powf(1.6)) + 15.0 * (b.sqrt() - b.powi(4));
    let tpc = r_of(base.tpc);
    let tpc_corr = tpc - epsilon;
    let ppc_corr = psi_of(base.ppc) * tpc_corr / (tpc + b * (1.0 - b) * epsilon);
    Ok(PseudoCriticals {
        tpc: rankine(tpc_corr),
        ppc: psi(ppc_corr),
    })
}

/// Carr-Kobayashi-Burrows (1954) linear contaminant correction.
pub fn carr_kobayashi_burrows(
    base: PseudoCriticals,
    y_co2: f64,
    y_h2s: f64,
    y_n2: f64,
) -> GasResult<PseudoCriticals> {
    check_fraction(y_co2)?;
    check_fraction(y_h2s)?;
    check_fraction(y_n2)?;
    Ok(PseudoCriticals {
        tpc: rankine(r_of(base.tpc) - 80.0 * y_co2 + 130.0 * y_h2s - 250.0 * y_n2),
        ppc: psi(psi_of(base.ppc) + 440.0 * y_co2 + 600.0 * y_h2s - 170.0 * y_n2),
    })
}

// Contaminant criticals (°R, psia) and gravities for Whitson-Brûlé.
const N2: (f64, f64, f64) = (227.3, 493.1, 28.013 / 28.9586);
const CO2: (f64, f64, f64) = (547.6, 1071.0, 44.010 / 28.9586);
const H2S: (f64, f64, f64) = (672.4, 1306.0, 34.081 / 28.9586);

/// Whitson-Brûlé (2000) pseudo-criticals: characterize the hydrocarbon
/// remainder with Standing's fit, then Kay-mix the contaminants back with
/// their pure-component criticals.
pub fn whitson_brule(
    gravity: f64,
    y_n2: f64,
    y_co2: f64,
    y_h2s: f64,
    wet: bool,
) -> GasResult<PseudoCriticals> {
    check_fraction(y_n2)?;
    check_fraction(y_co2)?;
    check_fraction(y_h2s)?;
    let y_cont = y_n2 + y_co2 + y_h2s;
    if y_cont >= 1.0 {
        return Err(GasError::InvalidArg {
            what: "contaminants must leave a hydrocarbon remainder",
        });
    }
    let g_hc = (gravity - y_n2 * N2.2 - y_co2 * CO2.2 - y_h2s * H2S.2) / (1.0 - y_cont);
    let hc = if wet {
        standing_wet(g_hc)?
    } else {
        standing_dry(g_hc)?
    };
    let y_hc = 1.0 - y_cont;
    Ok(PseudoCriticals {
        tpc: rankine(
            y_hc * r_of(hc.tpc) + y_n2 * N2.0 + y_co2 * CO2.0 + y_h2s * H2S.0,
        ),
        ppc: psi(
            y_hc * psi_of(hc.ppc) + y_n2 * N2.1 + y_co2 * CO2.1 + y_h2s * H2S.1,
        ),
    })
}
