//! Method-preference configuration.
//!
//! Every selectable correlation family gets a stable enum key with a named
//! default. A configuration is a pure value: dispatch is a function of
//! (inputs, config), never of ambient state.

use serde::{Deserialize, Serialize};

/// Critical-property (Tc, Pc, Vc) correlation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CriticalMethod {
    #[default]
    RiaziDaubert1980,
    /// Riazi-Daubert 1987 generalized pair table.
    RiaziDaubert,
    Cavett,
    LeeKesler,
    SimDaubert,
    Twu,
    Sancet,
    Standing,
    Ahmed,
    /// Lee-Kesler Tc with the Edmister vapor-pressure relation closing Pc.
    Edmister,
}

/// Molecular-weight correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MolecularWeightMethod {
    #[default]
    RiaziDaubert1980,
    RiaziDaubert,
    LeeKesler,
    SimDaubert,
    Twu,
}

/// Acentric-factor correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AcentricMethod {
    #[default]
    LeeKesler,
    Edmister,
    Korsten,
}

/// Critical-compressibility correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZcMethod {
    #[default]
    LeeKesler,
    Hougen,
    Reid,
    Salerno,
    Nath,
}

/// PNA composition split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PnaMethod {
    #[default]
    RiaziDaubert,
    VanNes,
}

/// D86 to TBP interconversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum D86TbpMethod {
    #[default]
    Riazi,
    Daubert,
}

/// Bubble-point pressure correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BubblePointMethod {
    #[default]
    Standing,
    Lasater,
    VazquezBeggs,
    Glaso,
    Total,
    AlMarhoun,
    DoklaOsman,
    PetroskyFarshad,
    KartoatmodjoSchmidt,
}

/// Oil formation-volume-factor correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FvfMethod {
    #[default]
    Standing,
    VazquezBeggs,
    Glaso,
    AlMarhoun,
    PetroskyFarshad,
    KartoatmodjoSchmidt,
}

/// Dead-oil viscosity correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeadViscosityMethod {
    #[default]
    BeggsRobinson,
    Beal,
    Glaso,
    KartoatmodjoSchmidt,
}

/// Live-oil (gas-saturated) viscosity correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LiveViscosityMethod {
    #[default]
    BeggsRobinson,
    ChewConnally,
    KartoatmodjoSchmidt,
}

/// Above-bubble-point viscosity correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureViscosityMethod {
    #[default]
    VazquezBeggs,
    Beal,
    KartoatmodjoSchmidt,
}

/// Z-factor chart fit (mirrors `pf_gas::ZMethod` with serde-stable keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZFactorMethod {
    Papay,
    #[default]
    HallYarborough,
    DranchukAbouKassem,
    DranchukPurvisRobinson,
    BrillBeggs,
    Gopal,
    ShellOil,
    SanjariLay,
    Bahadori,
}

impl ZFactorMethod {
    pub fn resolve(self) -> pf_gas::ZMethod {
        match self {
            ZFactorMethod::Papay => pf_gas::ZMethod::Papay,
            ZFactorMethod::HallYarborough => pf_gas::ZMethod::HallYarborough,
            ZFactorMethod::DranchukAbouKassem => pf_gas::ZMethod::DranchukAbouKassem,
            ZFactorMethod::DranchukPurvisRobinson => pf_gas::ZMethod::DranchukPurvisRobinson,
            ZFactorMethod::BrillBeggs => pf_gas::ZMethod::BrillBeggs,
            ZFactorMethod::Gopal => pf_gas::ZMethod::Gopal,
            ZFactorMethod::ShellOil => pf_gas::ZMethod::ShellOil,
            ZFactorMethod::SanjariLay => pf_gas::ZMethod::SanjariLay,
            ZFactorMethod::Bahadori => pf_gas::ZMethod::Bahadori,
        }
    }
}

/// Pseudo-critical mixing rule for the companion gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PseudoCriticalMethod {
    /// Standing base + contaminant-driven auto correction.
    #[default]
    StandingAuto,
    WhitsonBrule,
}

/// The full method-preference set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub critical: CriticalMethod,
    pub molecular_weight: MolecularWeightMethod,
    pub acentric: AcentricMethod,
    pub zc: ZcMethod,
    pub pna: PnaMethod,
    pub d86_tbp: D86TbpMethod,
    pub bubble_point: BubblePointMethod,
    pub fvf: FvfMethod,
    pub dead_viscosity: DeadViscosityMethod,
    pub live_viscosity: LiveViscosityMethod,
    pub pressure_viscosity: PressureViscosityMethod,
    pub z_factor: ZFactorMethod,
    pub pseudo_critical: PseudoCriticalMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_reference_methods() {
        let config = Config::default();
        assert_eq!(config.critical, CriticalMethod::RiaziDaubert1980);
        assert_eq!(config.acentric, AcentricMethod::LeeKesler);
        assert_eq!(config.bubble_point, BubblePointMethod::Standing);
        assert_eq!(config.z_factor.resolve(), pf_gas::ZMethod::HallYarborough);
        assert_eq!(config.pseudo_critical, PseudoCriticalMethod::StandingAuto);
    }
}
