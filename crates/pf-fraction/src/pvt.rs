//! Black-oil PVT correlations for a crude: bubble-point pressure, oil
//! formation volume factor and the three-stage viscosity chain.
//!
//! All correlations were regressed in field units (°F, psia, scf/STB, cP);
//! arithmetic stays in that system behind the typed boundary. Gas and oil
//! gravities and solution GOR are documented raw f64 values.

use crate::config::{
    BubblePointMethod, DeadViscosityMethod, FvfMethod, LiveViscosityMethod,
    PressureViscosityMethod,
};
use crate::error::{FractionError, FractionResult};
use pf_core::numeric::ensure_finite;
use pf_core::units::{f_of, psi, psi_of, sg_from_api, Pressure, Temperature};
use tracing::debug;

/// Reservoir conditions a crude's PVT state is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirState {
    /// Solution gas-oil ratio [scf/STB]
    pub rs: f64,
    /// Gas specific gravity (air = 1)
    pub gas_gravity: f64,
    /// Stock-tank oil API gravity
    pub api: f64,
    /// Reservoir temperature
    pub t: Temperature,
}

impl ReservoirState {
    pub fn new(rs: f64, gas_gravity: f64, api: f64, t: Temperature) -> FractionResult<Self> {
        ensure_finite(rs, "solution GOR")?;
        if rs < 0.0 {
            return Err(FractionError::InvalidArg {
                what: "solution GOR must be non-negative",
            });
        }
        if !(0.5..=2.0).contains(&gas_gravity) {
            return Err(FractionError::InvalidArg {
                what: "gas gravity outside 0.5-2.0",
            });
        }
        if !(5.0..=70.0).contains(&api) {
            return Err(FractionError::InvalidArg {
                what: "API gravity outside 5-70",
            });
        }
        Ok(ReservoirState {
            rs,
            gas_gravity,
            api,
            t,
        })
    }

    fn oil_sg(&self) -> f64 {
        sg_from_api(self.api)
    }
}

/// Bubble-point pressure of a saturated crude.
pub fn bubble_point(method: BubblePointMethod, state: &ReservoirState) -> FractionResult<Pressure> {
    let ReservoirState {
        rs,
        gas_gravity: gg,
        api,
        ..
    } = *state;
    let t_f = f_of(state.t);
    let t_r = t_f + 459.67;
    let go = state.oil_sg();
    debug!(?method, rs, gg, api, t_f, "bubble point dispatch");

    let pb = match method {
        BubblePointMethod::Standing => {
            18.2 * ((rs / gg).powf(0.83) * 10f64.powf(0.00091 * t_f - 0.0125 * api) - 1.4)
        }
        BubblePointMethod::Lasater => {
            let mo = if api <= 40.0 {
                630.0 - 10.0 * api
            } else {
                73110.0 * api.powf(-1.562)
            };
            let moles_gas = rs / 379.3;
            let yg = moles_gas / (moles_gas + 350.0 * go / mo);
            let pf = if yg <= 0.6 {
                0.679 * (2.786 * yg).exp() - 0.323
            } else {
                8.26 * yg.powf(3.56) + 1.95
            };
            pf * (t_f + 460.0) / gg
        }
        BubblePointMethod::VazquezBeggs => {
            let (c1, c2, c3) = if api <= 30.0 {
                (0.0362, 1.0937, 25.724)
            } else {
                (0.0178, 1.187, 23.931)
            };
            (rs / (c1 * gg * (c3 * api / (t_f + 460.0)).exp())).powf(1.0 / c2)
        }
        BubblePointMethod::Glaso => {
            let pb_star = (rs / gg).powf(0.816) * t_f.powf(0.172) / api.powf(0.989);
            let x = pb_star.log10();
            10f64.powf(1.7669 + 1.7447 * x - 0.30218 * x * x)
        }
        BubblePointMethod::Total => {
            let (c1, c2, c3, c4) = if api <= 10.0 {
                (12.847, 0.9636, 0.000993, 0.34170)
            } else if api <= 35.0 {
                (25.2755, 0.7617, 0.000835, 0.011292)
            } else {
                (216.4711, 0.6922, -0.000427, 0.02314)
            };
            c1 * (rs / gg).powf(c2) * 10f64.powf(c3 * t_f - c4 * api)
        }
        BubblePointMethod::AlMarhoun => {
            5.38088e-3
                * rs.powf(0.715082)
                * gg.powf(-1.87784)
                * go.powf(3.1437)
                * t_r.powf(1.32657)
        }
        BubblePointMethod::DoklaOsman => {
            0.836386e4
                * rs.powf(0.724047)
                * gg.powf(-1.01049)
                * go.powf(0.107991)
                * t_r.powf(-0.952584)
        }
        BubblePointMethod::PetroskyFarshad => {
            let x = 7.916e-4 * api.powf(1.5410) - 4.561e-5 * t_f.powf(1.3911);
            112.727 * rs.powf(0.577421) / (gg.powf(0.8439) * 10f64.powf(x)) - 1391.051
        }
        BubblePointMethod::KartoatmodjoSchmidt => {
            let (c1, c2, c3, c4) = if api <= 30.0 {
                (0.05958, 0.7972, 13.1405, 1.0014)
            } else {
                (0.03150, 0.7587, 11.2895, 0.9143)
            };
            (rs / (c1 * gg.powf(c2) * 10f64.powf(c3 * api / (t_f + 460.0)))).powf(1.0 / c4)
        }
    };

    let pb = ensure_finite(pb, "bubble-point pressure")?;
    if pb <= 0.0 {
        return Err(FractionError::InvalidArg {
            what: "bubble point did not evaluate to a positive pressure",
        });
    }
    Ok(psi(pb))
}

/// Non-hydrocarbon correction multiplier for a black-oil bubble point,
/// applied as `CN2 * CH2S * CCO2 * pb` (Jhaveri-Vogel style factors).
pub fn contaminant_correction(
    api: f64,
    t: Temperature,
    y_n2: f64,
    y_co2: f64,
    y_h2s: f64,
) -> f64 {
    let t_f = f_of(t);
    let c_n2 = 1.0
        + ((-2.65e-4 * api + 5.5e-3) * t_f + (0.0931 * api - 0.8295)) * y_n2
        + ((1.954e-11 * api.powf(4.699)) * t_f + (0.027 * api - 2.366)) * y_n2 * y_n2;
    let c_h2s = 1.0 - (0.9035 + 0.0015 * api) * y_h2s + 0.019 * (45.0 - api) * y_h2s * y_h2s;
    let c_co2 = if y_co2 > 0.0 {
        1.0 - 693.8 * y_co2 * t_f.powf(-1.553)
    } else {
        1.0
    };
    c_n2 * c_h2s * c_co2
}

/// Oil formation volume factor at the bubble point [bbl/STB].
pub fn fvf_saturated(method: FvfMethod, state: &ReservoirState) -> FractionResult<f64> {
    let ReservoirState {
        rs,
        gas_gravity: gg,
        api,
        ..
    } = *state;
    let t_f = f_of(state.t);
    let t_r = t_f + 459.67;
    let go = state.oil_sg();

    let bob = match method {
        FvfMethod::Standing => {
            let f = rs * (gg / go).sqrt() + 1.25 * t_f;
            0.9759 + 12e-5 * f.powf(1.2)
        }
        FvfMethod::VazquezBeggs => {
            let (c1, c2, c3) = if api <= 30.0 {
                (4.677e-4, 1.751e-5, -1.811e-8)
            } else {
                (4.670e-4, 1.100e-5, 1.337e-9)
            };
            let ratio = api / gg;
            1.0 + c1 * rs + c2 * (t_f - 60.0) * ratio + c3 * rs * (t_f - 60.0) * ratio
        }
        FvfMethod::Glaso => {
            let bob_star = rs * (gg / go).powf(0.526) + 0.968 * t_f;
            let x = bob_star.log10();
            let a = -6.58511 + 2.91329 * x - 0.27683 * x * x;
            1.0 + 10f64.powf(a)
        }
        FvfMethod::AlMarhoun => {
            let f = rs.powf(0.74239) * gg.powf(0.323294) * go.powf(-1.20204);
            0.497069 + 0.862963e-3 * t_r + 0.182594e-2 * f + 0.318099e-5 * f * f
        }
        FvfMethod::PetroskyFarshad => {
            let f = rs.powf(0.3738) * gg.powf(0.2914) / go.powf(0.6265)
                + 0.24626 * t_f.powf(0.5371);
            1.0113 + 7.2046e-5 * f.powf(3.0936)
        }
        FvfMethod::KartoatmodjoSchmidt => {
            let f = rs.powf(0.755) * gg.powf(0.25) * go.powf(-1.5) + 0.45 * t_f;
            0.98496 + 1e-4 * f.powf(1.5)
        }
    };

    if !(bob.is_finite() && bob >= 1.0) {
        return Err(FractionError::InvalidArg {
            what: "formation volume factor did not evaluate above unity",
        });
    }
    Ok(bob)
}

/// Undersaturated isothermal oil compressibility [1/psi], Vazquez-Beggs.
pub fn oil_compressibility(state: &ReservoirState, p: Pressure) -> FractionResult<f64> {
    let p_psi = psi_of(p);
    if p_psi <= 0.0 {
        return Err(FractionError::InvalidArg {
            what: "compressibility needs a positive pressure",
        });
    }
    let t_f = f_of(state.t);
    Ok((-1433.0 + 5.0 * state.rs + 17.2 * t_f - 1180.0 * state.gas_gravity
        + 12.61 * state.api)
        / (1e5 * p_psi))
}

/// Oil FVF at pressure `p`: the saturated value at and below the bubble
/// point, contracted by the undersaturated compressibility above it.
pub fn fvf(
    method: FvfMethod,
    state: &ReservoirState,
    p: Pressure,
    pb: Pressure,
) -> FractionResult<f64> {
    let bob = fvf_saturated(method, state)?;
    let (p_psi, pb_psi) = (psi_of(p), psi_of(pb));
    if p_psi <= pb_psi {
        return Ok(bob);
    }
    let co = oil_compressibility(state, p)?;
    Ok(bob * (co * (pb_psi - p_psi)).exp())
}

/// Dead (gas-free) oil viscosity at reservoir temperature [cP].
pub fn dead_viscosity(
    method: DeadViscosityMethod,
    api: f64,
    t: Temperature,
) -> FractionResult<f64> {
    if !(5.0..=70.0).contains(&api) {
        return Err(FractionError::InvalidArg {
            what: "API gravity outside 5-70",
        });
    }
    let t_f = f_of(t);
    if t_f <= 0.0 {
        return Err(FractionError::InvalidArg {
            what: "dead-oil viscosity needs T above 0 degF",
        });
    }

    let mu = match method {
        DeadViscosityMethod::Beal => {
            let a = 10f64.powf(0.43 + 8.33 / api);
            (0.32 + 1.8e7 / api.powf(4.53)) * (360.0 / (t_f + 200.0)).powf(a)
        }
        DeadViscosityMethod::BeggsRobinson => {
            let x = 10f64.powf(3.0324 - 0.02023 * api) * t_f.powf(-1.163);
            10f64.powf(x) - 1.0
        }
        DeadViscosityMethod::Glaso => {
            3.141e10
                * t_f.powf(-3.444)
                * api.log10().powf(10.313 * t_f.log10() - 36.447)
        }
        DeadViscosityMethod::KartoatmodjoSchmidt => {
            16e8 * t_f.powf(-2.8177) * api.log10().powf(5.7526 * t_f.log10() - 26.9718)
        }
    };
    Ok(mu)
}

/// Gas-saturated (live) oil viscosity from the dead value and solution GOR.
pub fn live_viscosity(
    method: LiveViscosityMethod,
    dead_cp: f64,
    rs: f64,
) -> FractionResult<f64> {
    if !(dead_cp > 0.0 && dead_cp.is_finite()) {
        return Err(FractionError::InvalidArg {
            what: "live viscosity needs a positive dead viscosity",
        });
    }
    if rs < 0.0 {
        return Err(FractionError::InvalidArg {
            what: "solution GOR must be non-negative",
        });
    }

    let mu = match method {
        LiveViscosityMethod::ChewConnally => {
            let a = 10f64.powf(rs * (2.2e-7 * rs - 7.4e-4));
            let b = 0.68 / 10f64.powf(8.62e-5 * rs)
                + 0.25 / 10f64.powf(1.1e-3 * rs)
                + 0.062 / 10f64.powf(3.74e-3 * rs);
            a * dead_cp.powf(b)
        }
        LiveViscosityMethod::BeggsRobinson => {
            let a = 10.715 * (rs + 100.0).powf(-0.515);
            let b = 5.44 * (rs + 150.0).powf(-0.338);
            a * dead_cp.powf(b)
        }
        LiveViscosityMethod::KartoatmodjoSchmidt => {
            let b = 10f64.powf(-0.00081 * rs);
            let a = 0.2001 + 0.8428 * 10f64.powf(-0.000845 * rs);
            let f = a * dead_cp.powf(0.43 + 0.5165 * b);
            -0.06821 + 0.9824 * f + 40.34e-5 * f * f
        }
    };
    Ok(mu)
}

/// Undersaturated viscosity above the bubble point.
pub fn pressure_viscosity(
    method: PressureViscosityMethod,
    live_cp: f64,
    p: Pressure,
    pb: Pressure,
) -> FractionResult<f64> {
    let (p_psi, pb_psi) = (psi_of(p), psi_of(pb));
    if p_psi < pb_psi {
        return Err(FractionError::InvalidArg {
            what: "pressure correction applies at or above the bubble point",
        });
    }
    if !(live_cp > 0.0 && live_cp.is_finite()) {
        return Err(FractionError::InvalidArg {
            what: "pressure viscosity needs a positive saturated viscosity",
        });
    }

    let mu = match method {
        PressureViscosityMethod::Beal => {
            live_cp
                + 0.001
                    * (p_psi - pb_psi)
                    * (0.024 * live_cp.powf(1.6) + 0.038 * live_cp.powf(0.56))
        }
        PressureViscosityMethod::VazquezBeggs => {
            let m = 2.6 * p_psi.powf(1.187) * (-11.513 - 8.98e-5 * p_psi).exp();
            live_cp * (p_psi / pb_psi).powf(m)
        }
        PressureViscosityMethod::KartoatmodjoSchmidt => {
            1.00081 * live_cp
                + 1.127e-3
                    * (p_psi - pb_psi)
                    * (-0.006517 * live_cp.powf(1.8148) + 0.038 * live_cp.powf(1.590))
        }
    };
    Ok(mu)
}

/// Viscosity evaluation mode selected by the full chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViscosityRegime {
    Dead,
    Saturated,
    Undersaturated,
}

/// Chained viscosity at `(p, pb)`: dead when no gas is dissolved, saturated
/// at or below the bubble point, pressure-corrected above it.
pub fn viscosity_at(
    dead_method: DeadViscosityMethod,
    live_method: LiveViscosityMethod,
    pressure_method: PressureViscosityMethod,
    state: &ReservoirState,
    p: Pressure,
    pb: Pressure,
) -> FractionResult<(f64, ViscosityRegime)> {
    let dead = dead_viscosity(dead_method, state.api, state.t)?;
    if state.rs == 0.0 {
        return Ok((dead, ViscosityRegime::Dead));
    }
    let live = live_viscosity(live_method, dead, state.rs)?;
    if psi_of(p) <= psi_of(pb) {
        return Ok((live, ViscosityRegime::Saturated));
    }
    let mu = pressure_viscosity(pressure_method, live, p, pb)?;
    Ok((mu, ViscosityRegime::Undersaturated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::fahrenheit;

    // The classic saturated example: Rs = 350 scf/STB, gas gravity 0.75,
    // 30 API, 200 degF.
    fn example() -> ReservoirState {
        ReservoirState::new(350.0, 0.75, 30.0, fahrenheit(200.0)).unwrap()
    }

    #[test]
    fn standing_bubble_point_reference() {
        let pb = bubble_point(BubblePointMethod::Standing, &example()).unwrap();
        assert_relative_eq!(psi_of(pb), 1889.7, max_relative = 1e-3);
    }

    #[test]
    fn bubble_point_family_agrees_on_the_example() {
        let methods = [
            BubblePointMethod::Standing,
            BubblePointMethod::Lasater,
            BubblePointMethod::VazquezBeggs,
            BubblePointMethod::Glaso,
            BubblePointMethod::Total,
            BubblePointMethod::AlMarhoun,
            BubblePointMethod::DoklaOsman,
            BubblePointMethod::PetroskyFarshad,
            BubblePointMethod::KartoatmodjoSchmidt,
        ];
        for m in methods {
            let pb = psi_of(bubble_point(m, &example()).unwrap());
            assert!((1500.0..2300.0).contains(&pb), "{m:?}: {pb}");
        }
    }

    #[test]
    fn bounding_methods_of_the_family() {
        let lo = psi_of(bubble_point(BubblePointMethod::DoklaOsman, &example()).unwrap());
        let hi = psi_of(bubble_point(BubblePointMethod::AlMarhoun, &example()).unwrap());
        assert_relative_eq!(lo, 1580.4, max_relative = 1e-3);
        assert_relative_eq!(hi, 2210.7, max_relative = 1e-3);
    }

    #[test]
    fn clean_gas_needs_no_correction() {
        let c = contaminant_correction(30.0, fahrenheit(200.0), 0.0, 0.0, 0.0);
        assert_relative_eq!(c, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn nitrogen_raises_co2_lowers() {
        let t = fahrenheit(200.0);
        assert!(contaminant_correction(30.0, t, 0.05, 0.0, 0.0) > 1.0);
        assert!(contaminant_correction(30.0, t, 0.0, 0.05, 0.0) < 1.0);
        assert!(contaminant_correction(30.0, t, 0.0, 0.0, 0.05) < 1.0);
    }

    #[test]
    fn standing_fvf_reference() {
        let bob = fvf_saturated(FvfMethod::Standing, &example()).unwrap();
        assert_relative_eq!(bob, 1.2211, max_relative = 1e-3);
    }

    #[test]
    fn fvf_family_agrees_on_the_example() {
        let methods = [
            FvfMethod::Standing,
            FvfMethod::VazquezBeggs,
            FvfMethod::Glaso,
            FvfMethod::AlMarhoun,
            FvfMethod::PetroskyFarshad,
            FvfMethod::KartoatmodjoSchmidt,
        ];
        for m in methods {
            let bob = fvf_saturated(m, &example()).unwrap();
            assert!((1.15..1.28).contains(&bob), "{m:?}: {bob}");
        }
    }

    #[test]
    fn fvf_shrinks_above_bubble_point() {
        let state = example();
        let pb = bubble_point(BubblePointMethod::Standing, &state).unwrap();
        let bob = fvf(FvfMethod::Standing, &state, pb, pb).unwrap();
        let b_high = fvf(FvfMethod::Standing, &state, psi(4000.0), pb).unwrap();
        assert!(b_high < bob);
        assert!(b_high > 1.0);
    }

    #[test]
    fn beggs_robinson_dead_viscosity_reference() {
        let mu = dead_viscosity(DeadViscosityMethod::BeggsRobinson, 30.0, fahrenheit(200.0))
            .unwrap();
        assert_relative_eq!(mu, 2.636, max_relative = 1e-3);
    }

    #[test]
    fn dissolved_gas_thins_the_oil() {
        let dead = dead_viscosity(DeadViscosityMethod::BeggsRobinson, 30.0, fahrenheit(200.0))
            .unwrap();
        let live = live_viscosity(LiveViscosityMethod::BeggsRobinson, dead, 350.0).unwrap();
        assert_relative_eq!(live, 0.8808, max_relative = 1e-3);
        assert!(live < dead);
    }

    #[test]
    fn live_viscosity_family_is_ordered_below_dead() {
        let dead = dead_viscosity(DeadViscosityMethod::BeggsRobinson, 30.0, fahrenheit(200.0))
            .unwrap();
        for m in [
            LiveViscosityMethod::BeggsRobinson,
            LiveViscosityMethod::ChewConnally,
            LiveViscosityMethod::KartoatmodjoSchmidt,
        ] {
            let live = live_viscosity(m, dead, 350.0).unwrap();
            assert!(live < dead, "{m:?}: {live}");
            assert!(live > 0.3, "{m:?}: {live}");
        }
    }

    #[test]
    fn pressure_thickens_above_bubble_point() {
        let state = example();
        let pb = bubble_point(BubblePointMethod::Standing, &state).unwrap();
        let (mu_sat, regime) = viscosity_at(
            DeadViscosityMethod::BeggsRobinson,
            LiveViscosityMethod::BeggsRobinson,
            PressureViscosityMethod::VazquezBeggs,
            &state,
            pb,
            pb,
        )
        .unwrap();
        assert_eq!(regime, ViscosityRegime::Saturated);

        let (mu_high, regime) = viscosity_at(
            DeadViscosityMethod::BeggsRobinson,
            LiveViscosityMethod::BeggsRobinson,
            PressureViscosityMethod::VazquezBeggs,
            &state,
            psi(3000.0),
            pb,
        )
        .unwrap();
        assert_eq!(regime, ViscosityRegime::Undersaturated);
        assert!(mu_high > mu_sat);
        assert_relative_eq!(mu_high, 0.9962, max_relative = 2e-3);
    }

    #[test]
    fn no_dissolved_gas_is_the_dead_regime() {
        let state = ReservoirState::new(0.0, 0.75, 30.0, fahrenheit(200.0)).unwrap();
        let (mu, regime) = viscosity_at(
            DeadViscosityMethod::BeggsRobinson,
            LiveViscosityMethod::BeggsRobinson,
            PressureViscosityMethod::VazquezBeggs,
            &state,
            psi(500.0),
            psi(100.0),
        )
        .unwrap();
        assert_eq!(regime, ViscosityRegime::Dead);
        assert_relative_eq!(mu, 2.636, max_relative = 1e-3);
    }

    #[test]
    fn pressure_correction_rejects_below_bubble_point() {
        assert!(matches!(
            pressure_viscosity(
                PressureViscosityMethod::Beal,
                1.0,
                psi(1000.0),
                psi(2000.0)
            ),
            Err(FractionError::InvalidArg { .. })
        ));
    }

    #[test]
    fn state_validation() {
        assert!(ReservoirState::new(-1.0, 0.75, 30.0, fahrenheit(200.0)).is_err());
        assert!(ReservoirState::new(350.0, 0.3, 30.0, fahrenheit(200.0)).is_err());
        assert!(ReservoirState::new(350.0, 0.75, 80.0, fahrenheit(200.0)).is_err());
    }

    #[test]
    fn non_finite_gor_is_reported_as_such() {
        let err = ReservoirState::new(f64::NAN, 0.75, 30.0, fahrenheit(200.0)).unwrap_err();
        assert!(matches!(err, FractionError::Core(_)));
    }
}
