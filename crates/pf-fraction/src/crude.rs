//! Whole-crude wrapper: a characterized fraction built from a catalog assay
//! plus the black-oil PVT chain evaluated with the assay's separator gas.

use crate::assay::{crude_record, CrudeAssay};
use crate::config::{Config, PseudoCriticalMethod};
use crate::error::{FractionError, FractionResult};
use crate::fraction::PetroleumFraction;
use crate::inputs::FractionInputs;
use crate::pvt::{self, ReservoirState, ViscosityRegime};
use pf_core::units::{fahrenheit, psi_of, r_of, Pressure, Temperature};
use pf_gas::NaturalGas;
use tracing::info;

/// Whole crudes sit near the paraffinic end of the characterization band;
/// the assay records gravity but not a boiling point, so the mean boiling
/// point is backed out of an assumed Watson K.
const ASSUMED_WATSON_K: f64 = 11.9;

/// A catalog crude: the characterized bulk fraction plus reservoir-fluid
/// correlations fed by the assay's separator-gas analysis.
#[derive(Debug, Clone)]
pub struct CrudeOil {
    assay: &'static CrudeAssay,
    fraction: PetroleumFraction,
    plus_fraction: Option<PetroleumFraction>,
    config: Config,
}

impl CrudeOil {
    /// Build from a catalog id. Unknown ids are an error, not a panic.
    /// `cplus`, when given, is the carbon number of the heavy residue; the
    /// plus fraction is then characterized through the carbon-number route.
    pub fn from_assay(id: &str, cplus: Option<f64>, config: Config) -> FractionResult<Self> {
        let assay = crude_record(id).ok_or(FractionError::InvalidArg {
            what: "unknown crude assay id",
        })?;
        info!(id, api = assay.api, "characterizing catalog crude");

        let inputs = FractionInputs {
            api: Some(assay.api),
            kw: Some(ASSUMED_WATSON_K),
            v100: Some(assay.v100_cst),
            sulfur: Some(assay.sulfur_wt / 100.0),
            nitrogen: Some(assay.nitrogen_wt / 100.0),
            ..Default::default()
        };
        let fraction = PetroleumFraction::characterize(&inputs, &config);
        if fraction.status() == 0 {
            return Err(FractionError::InvalidArg {
                what: "assay did not characterize",
            });
        }

        let plus_fraction = match cplus {
            Some(nc) => {
                let plus = PetroleumFraction::characterize(
                    &FractionInputs {
                        nc: Some(nc),
                        ..Default::default()
                    },
                    &config,
                );
                if plus.status() == 0 {
                    return Err(FractionError::InvalidArg {
                        what: "plus-fraction carbon number did not characterize",
                    });
                }
                Some(plus)
            }
            None => None,
        };

        Ok(CrudeOil {
            assay,
            fraction,
            plus_fraction,
            config,
        })
    }

    pub fn assay(&self) -> &'static CrudeAssay {
        self.assay
    }

    pub fn fraction(&self) -> &PetroleumFraction {
        &self.fraction
    }

    /// The characterized C(n)+ residue, when a carbon number was supplied.
    pub fn plus_fraction(&self) -> Option<&PetroleumFraction> {
        self.plus_fraction.as_ref()
    }

    /// Measured pour point from the assay sheet, not the correlation.
    pub fn pour_point(&self) -> Temperature {
        fahrenheit(self.assay.pour_point_f)
    }

    /// The separator gas as a natural-gas entity.
    pub fn separator_gas(&self) -> NaturalGas {
        NaturalGas {
            gravity: self.assay.separator_gas_gravity(),
            y_n2: self.assay.y_n2,
            y_co2: self.assay.y_co2,
            y_h2s: self.assay.y_h2s,
            wet: false,
        }
    }

    /// Separator-gas compressibility at `(t, p)` under the configured
    /// Z-factor chart fit and pseudo-critical rule.
    pub fn gas_z(&self, t: Temperature, p: Pressure) -> FractionResult<f64> {
        let gas = self.separator_gas();
        let method = self.config.z_factor.resolve();
        match self.config.pseudo_critical {
            PseudoCriticalMethod::StandingAuto => Ok(gas.z(t, p, method)?),
            PseudoCriticalMethod::WhitsonBrule => {
                let pc = gas.pseudo_criticals_whitson_brule()?;
                let tr = r_of(t) / r_of(pc.tpc);
                let pr = psi_of(p) / psi_of(pc.ppc);
                Ok(pf_gas::zfactor::z_factor(method, tr, pr)?)
            }
        }
    }

    fn reservoir_state(&self, rs: f64, t: Temperature) -> FractionResult<ReservoirState> {
        ReservoirState::new(rs, self.assay.separator_gas_gravity(), self.assay.api, t)
    }

    /// Bubble-point pressure at `(rs, t)`, corrected for the separator
    /// gas's non-hydrocarbon content.
    pub fn bubble_point(&self, rs: f64, t: Temperature) -> FractionResult<Pressure> {
        let state = self.reservoir_state(rs, t)?;
        let pb = pvt::bubble_point(self.config.bubble_point, &state)?;
        let c = pvt::contaminant_correction(
            self.assay.api,
            t,
            self.assay.y_n2,
            self.assay.y_co2,
            self.assay.y_h2s,
        );
        Ok(pb * c)
    }

    /// Oil formation volume factor [bbl/STB] at pressure `p`.
    pub fn fvf(&self, rs: f64, t: Temperature, p: Pressure) -> FractionResult<f64> {
        let state = self.reservoir_state(rs, t)?;
        let pb = self.bubble_point(rs, t)?;
        pvt::fvf(self.config.fvf, &state, p, pb)
    }

    /// Oil viscosity [cP] at pressure `p`, with the regime the chain ended in.
    pub fn viscosity(
        &self,
        rs: f64,
        t: Temperature,
        p: Pressure,
    ) -> FractionResult<(f64, ViscosityRegime)> {
        let state = self.reservoir_state(rs, t)?;
        let pb = self.bubble_point(rs, t)?;
        pvt::viscosity_at(
            self.config.dead_viscosity,
            self.config.live_viscosity,
            self.config.pressure_viscosity,
            &state,
            p,
            pb,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::{f_of, psi, psi_of};

    #[test]
    fn catalog_crudes_characterize() {
        for assay in crate::assay::crude_catalog() {
            let crude = CrudeOil::from_assay(assay.id, None, Config::default()).unwrap();
            let f = crude.fraction();
            assert_eq!(f.status(), 1, "{}", assay.id);
            assert_relative_eq!(f.api.unwrap(), assay.api, max_relative = 1e-12);
            if assay.api >= 30.0 {
                // Lighter crudes sit inside the correlation boxes.
                assert!(f.tc.is_some(), "{}", assay.id);
            } else {
                // The heavy ends exceed the boiling-point box; the failure
                // is recorded, not panicked.
                assert!(
                    f.tc.is_some() || f.failures.iter().any(|p| p.property == "criticals"),
                    "{}",
                    assay.id
                );
            }
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert!(matches!(
            CrudeOil::from_assay("syncrude-xyz", None, Config::default()),
            Err(FractionError::InvalidArg { .. })
        ));
    }

    #[test]
    fn assumed_watson_k_fixes_the_boiling_point() {
        let crude = CrudeOil::from_assay("wti", None, Config::default()).unwrap();
        let f = crude.fraction();
        assert_relative_eq!(f.kw.unwrap(), ASSUMED_WATSON_K, max_relative = 1e-9);
    }

    #[test]
    fn sweet_crude_needs_no_bubble_point_correction() {
        let crude = CrudeOil::from_assay("wti", None, Config::default()).unwrap();
        let t = fahrenheit(200.0);
        let pb = crude.bubble_point(350.0, t).unwrap();
        // WTI separator gas is essentially sweet; the correction is small.
        let state = ReservoirState::new(350.0, crude.assay().separator_gas_gravity(), 39.6, t).unwrap();
        let raw = pvt::bubble_point(Config::default().bubble_point, &state).unwrap();
        assert_relative_eq!(psi_of(pb), psi_of(raw), max_relative = 0.03);
    }

    #[test]
    fn sour_correction_moves_the_bubble_point() {
        let t = fahrenheit(200.0);
        let maya = CrudeOil::from_assay("maya", None, Config::default()).unwrap();
        let state = ReservoirState::new(
            350.0,
            maya.assay().separator_gas_gravity(),
            maya.assay().api,
            t,
        )
        .unwrap();
        let raw = pvt::bubble_point(Config::default().bubble_point, &state).unwrap();
        let corrected = maya.bubble_point(350.0, t).unwrap();
        assert!(psi_of(corrected) != psi_of(raw));
    }

    #[test]
    fn pvt_chain_end_to_end() {
        let crude = CrudeOil::from_assay("brent", None, Config::default()).unwrap();
        let t = fahrenheit(180.0);
        let pb = crude.bubble_point(300.0, t).unwrap();
        assert!(psi_of(pb) > 500.0 && psi_of(pb) < 4000.0);

        let b = crude.fvf(300.0, t, pb).unwrap();
        assert!(b > 1.0 && b < 1.6);

        let (mu, regime) = crude.viscosity(300.0, t, psi(psi_of(pb) + 1500.0)).unwrap();
        assert_eq!(regime, ViscosityRegime::Undersaturated);
        assert!(mu > 0.1 && mu < 20.0);
    }

    #[test]
    fn separator_gas_z_under_both_pseudo_critical_rules() {
        let crude = CrudeOil::from_assay("arab-light", None, Config::default()).unwrap();
        let t = fahrenheit(200.0);
        let p = psi(2000.0);
        let z_auto = crude.gas_z(t, p).unwrap();
        assert!(z_auto > 0.4 && z_auto < 1.1);

        let explicit = CrudeOil::from_assay(
            "arab-light",
            None,
            Config {
                pseudo_critical: PseudoCriticalMethod::WhitsonBrule,
                ..Default::default()
            },
        )
        .unwrap();
        let z_wb = explicit.gas_z(t, p).unwrap();
        // Different mixing rules, same neighborhood.
        assert_relative_eq!(z_wb, z_auto, max_relative = 0.1);
    }

    #[test]
    fn plus_fraction_rides_along() {
        let bare = CrudeOil::from_assay("brent", None, Config::default()).unwrap();
        assert!(bare.plus_fraction().is_none());

        let with_plus = CrudeOil::from_assay("brent", Some(7.0), Config::default()).unwrap();
        let plus = with_plus.plus_fraction().unwrap();
        assert_eq!(plus.status(), 1);
        assert_relative_eq!(plus.m.unwrap(), 94.7, max_relative = 5e-3);
    }

    #[test]
    fn measured_pour_point_comes_from_the_sheet() {
        let crude = CrudeOil::from_assay("bonny-light", None, Config::default()).unwrap();
        assert_relative_eq!(f_of(crude.pour_point()), 25.0, max_relative = 1e-9);
    }
}
