//! Natural-gas entity: gravity + contaminant analysis to real-gas state.

use crate::error::{GasError, GasResult};
use crate::pseudocritical::{
    self, PseudoCriticals, SourCorrection,
};
use crate::zfactor::{z_factor, ZMethod};
use pf_core::units::{k_of, pa_of, r_of, Pressure, Temperature};
use tracing::debug;

/// Molar mass of air [g/mol]; gas gravity is M/M_air.
const M_AIR: f64 = 28.9586;

/// Universal gas constant [J/(mol·K)].
const R_GAS: f64 = 8.314_462_618;

/// A natural gas described by its gravity (air = 1) and contaminant mole
/// fractions. `wet` selects Standing's condensate-gas pseudo-critical fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalGas {
    pub gravity: f64,
    pub y_n2: f64,
    pub y_co2: f64,
    pub y_h2s: f64,
    pub wet: bool,
}

impl NaturalGas {
    /// Sweet dry gas of the given gravity.
    pub fn sweet(gravity: f64) -> Self {
        NaturalGas {
            gravity,
            y_n2: 0.0,
            y_co2: 0.0,
            y_h2s: 0.0,
            wet: false,
        }
    }

    /// Correction picked from the analysis: any N2 forces the
    /// Carr-Kobayashi-Burrows shift (Wichert-Aziz has no N2 term), acid gas
    /// alone takes Wichert-Aziz, a sweet gas takes none.
    pub fn auto_correction(&self) -> SourCorrection {
        if self.y_n2 > 0.0 {
            SourCorrection::CarrKobayashiBurrows
        } else if self.y_co2 + self.y_h2s > 0.0 {
            SourCorrection::WichertAziz
        } else {
            SourCorrection::None
        }
    }

    /// Pseudo-critical point: Standing base plus the given correction.
    pub fn pseudo_criticals(&self, correction: SourCorrection) -> GasResult<PseudoCriticals> {
        let base = if self.wet {
            pseudocritical::standing_wet(self.gravity)?
        } else {
            pseudocritical::standing_dry(self.gravity)?
        };
        match correction {
            SourCorrection::None => Ok(base),
            SourCorrection::WichertAziz => {
                pseudocritical::wichert_aziz(base, self.y_co2, self.y_h2s)
            }
            SourCorrection::CarrKobayashiBurrows => {
                pseudocritical::carr_kobayashi_burrows(base, self.y_co2, self.y_h2s, self.y_n2)
            }
        }
    }

    /// Whitson-Brûlé pseudo-criticals; never picked automatically, only on
    /// explicit request.
    pub fn pseudo_criticals_whitson_brule(&self) -> GasResult<PseudoCriticals> {
        pseudocritical::whitson_brule(self.gravity, self.y_n2, self.y_co2, self.y_h2s, self.wet)
    }

    /// Reduced state at the given conditions, with the auto-selected
    /// contaminant correction.
    pub fn reduced_state(&self, t: Temperature, p: Pressure) -> GasResult<(f64, f64)> {
        let pc = self.pseudo_criticals(self.auto_correction())?;
        let tr = r_of(t) / r_of(pc.tpc);
        let pr = pf_core::units::psi_of(p) / pf_core::units::psi_of(pc.ppc);
        Ok((tr, pr))
    }

    /// Compressibility factor at the given conditions.
    pub fn z(&self, t: Temperature, p: Pressure, method: ZMethod) -> GasResult<f64> {
        let (tr, pr) = self.reduced_state(t, p)?;
        let z = z_factor(method, tr, pr)?;
        debug!(gravity = self.gravity, tr, pr, z, "natural gas Z");
        Ok(z)
    }

    /// Molar mass [g/mol].
    pub fn molar_mass(&self) -> f64 {
        self.gravity * M_AIR
    }

    /// Real-gas density [kg/m³], `rho = p·M / (Z·R·T)`.
    pub fn density(&self, t: Temperature, p: Pressure, method: ZMethod) -> GasResult<f64> {
        let z = self.z(t, p, method)?;
        if z <= 0.0 {
            return Err(GasError::InvalidArg {
                what: "non-physical Z from chart fit",
            });
        }
        Ok(pa_of(p) * self.molar_mass() * 1e-3 / (z * R_GAS * k_of(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::{fahrenheit, psi};

    #[test]
    fn auto_correction_priority() {
        let mut gas = NaturalGas::sweet(0.7);
        assert_eq!(gas.auto_correction(), SourCorrection::None);
        gas.y_co2 = 0.05;
        assert_eq!(gas.auto_correction(), SourCorrection::WichertAziz);
        gas.y_n2 = 0.02;
        assert_eq!(gas.auto_correction(), SourCorrection::CarrKobayashiBurrows);
    }

    #[test]
    fn sweet_gas_z_textbook_case() {
        // 0.7-gravity gas at 150°F, 2000 psia: Tr ~ 1.57, Pr ~ 3.0,
        // Z about 0.80 from the Standing-Katz chart.
        let gas = NaturalGas::sweet(0.7);
        let z = gas.z(fahrenheit(150.0), psi(2000.0), ZMethod::HallYarborough).unwrap();
        assert_relative_eq!(z, 0.80, epsilon = 0.03);
    }

    #[test]
    fn methods_agree_on_sweet_gas() {
        let gas = NaturalGas::sweet(0.65);
        let t = fahrenheit(120.0);
        let p = psi(1500.0);
        let reference = gas.z(t, p, ZMethod::DranchukAbouKassem).unwrap();
        for method in [ZMethod::HallYarborough, ZMethod::Papay, ZMethod::ShellOil] {
            let z = gas.z(t, p, method).unwrap();
            assert_relative_eq!(z, reference, max_relative = 0.04);
        }
    }

    #[test]
    fn density_tracks_ideal_gas_at_low_pressure() {
        let gas = NaturalGas::sweet(0.7);
        let t = fahrenheit(100.0);
        let p = psi(100.0);
        let rho = gas.density(t, p, ZMethod::HallYarborough).unwrap();
        let rho_ideal =
            pf_core::units::pa_of(p) * gas.molar_mass() * 1e-3 / (R_GAS * k_of(t));
        assert_relative_eq!(rho, rho_ideal, max_relative = 0.03);
        assert!(rho > rho_ideal, "real gas denser below the Boyle point");
    }

    #[test]
    fn sour_gas_shifts_z() {
        let sweet = NaturalGas::sweet(0.75);
        let sour = NaturalGas {
            y_co2: 0.08,
            y_h2s: 0.04,
            ..sweet
        };
        let t = fahrenheit(180.0);
        let p = psi(2500.0);
        let z_sweet = sweet.z(t, p, ZMethod::DranchukAbouKassem).unwrap();
        let z_sour = sour.z(t, p, ZMethod::DranchukAbouKassem).unwrap();
        assert!((z_sweet - z_sour).abs() > 1e-3);
    }

    #[test]
    fn whitson_brule_explicit_only() {
        let gas = NaturalGas {
            y_n2: 0.03,
            ..NaturalGas::sweet(0.8)
        };
        // Auto path picks CKB for an N2-bearing gas.
        assert_eq!(gas.auto_correction(), SourCorrection::CarrKobayashiBurrows);
        let wb = gas.pseudo_criticals_whitson_brule().unwrap();
        let ckb = gas.pseudo_criticals(gas.auto_correction()).unwrap();
        assert!((r_of(wb.tpc) - r_of(ckb.tpc)).abs() > 0.1);
    }
}
