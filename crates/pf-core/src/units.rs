// pf-core/src/units.rs
//
// Typed quantities for the characterization engine. The public surface is
// SI, but most petroleum correlations were regressed in °R / °F / psia, so
// the constructors and accessors below expose those views explicitly.
// Molecular weight, specific gravity, API gravity, Watson K and kinematic
// viscosity in cSt are carried as documented raw f64 values.

use uom::si::f64::{
    Pressure as UomPressure, Ratio as UomRatio, SpecificVolume as UomSpecificVolume,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type SpecVolume = UomSpecificVolume;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn fahrenheit(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn rankine(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_rankine;
    Temperature::new::<degree_rankine>(v)
}

#[inline]
pub fn k_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn c_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

#[inline]
pub fn f_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    t.get::<degree_fahrenheit>()
}

#[inline]
pub fn r_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_rankine;
    t.get::<degree_rankine>()
}

#[inline]
pub fn pascal(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn mmhg(v: f64) -> Pressure {
    use uom::si::pressure::millimeter_of_mercury;
    Pressure::new::<millimeter_of_mercury>(v)
}

#[inline]
pub fn pa_of(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn bar_of(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

#[inline]
pub fn atm_of(p: Pressure) -> f64 {
    use uom::si::pressure::atmosphere;
    p.get::<atmosphere>()
}

#[inline]
pub fn psi_of(p: Pressure) -> f64 {
    use uom::si::pressure::pound_force_per_square_inch;
    p.get::<pound_force_per_square_inch>()
}

#[inline]
pub fn mmhg_of(p: Pressure) -> f64 {
    use uom::si::pressure::millimeter_of_mercury;
    p.get::<millimeter_of_mercury>()
}

#[inline]
pub fn m3kg(v: f64) -> SpecVolume {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    SpecVolume::new::<cubic_meter_per_kilogram>(v)
}

/// Specific volume from ft³/lb (the API-TDB native unit for Vc).
#[inline]
pub fn ft3lb(v: f64) -> SpecVolume {
    m3kg(v * constants::M3KG_PER_FT3LB)
}

#[inline]
pub fn m3kg_of(v: SpecVolume) -> f64 {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    v.get::<cubic_meter_per_kilogram>()
}

#[inline]
pub fn ft3lb_of(v: SpecVolume) -> f64 {
    m3kg_of(v) / constants::M3KG_PER_FT3LB
}

/// Specific volume from cm³/g (Riazi's SI tables report Vc in cm³/g).
#[inline]
pub fn cm3g(v: f64) -> SpecVolume {
    m3kg(v * 1e-3)
}

#[inline]
pub fn cm3g_of(v: SpecVolume) -> f64 {
    m3kg_of(v) * 1e3
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// API gravity from specific gravity (60°F/60°F).
#[inline]
pub fn api_from_sg(sg: f64) -> f64 {
    141.5 / sg - 131.5
}

/// Specific gravity (60°F/60°F) from API gravity.
#[inline]
pub fn sg_from_api(api: f64) -> f64 {
    141.5 / (api + 131.5)
}

/// Watson characterization factor, `Tb_R^(1/3) / SG`.
#[inline]
pub fn watson_k(tb: Temperature, sg: f64) -> f64 {
    r_of(tb).cbrt() / sg
}

pub mod constants {
    /// m³/kg per ft³/lb.
    pub const M3KG_PER_FT3LB: f64 = 0.028_316_846_592 / 0.453_592_37;

    /// m²/s per centistokes.
    pub const M2S_PER_CST: f64 = 1e-6;

    /// Atmospheric pressure in psia as used by the vapor-pressure-based
    /// acentric-factor correlations (Edmister, Lee-Kesler).
    pub const P_ATM_PSI: f64 = 14.7;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn temperature_views() {
        let t = celsius(92.222_222_222_222_22); // 198°F
        let t2 = fahrenheit(198.0);
        assert_relative_eq!(k_of(t), k_of(t2), max_relative = 1e-9);
        assert_relative_eq!(r_of(t2), 657.67, max_relative = 1e-9);
        assert_relative_eq!(f_of(rankine(657.67)), 198.0, max_relative = 1e-9);
    }

    #[test]
    fn pressure_views() {
        assert_relative_eq!(psi_of(atm(1.0)), 14.695_95, max_relative = 1e-4);
        assert_relative_eq!(mmhg_of(atm(1.0)), 760.0, max_relative = 1e-4);
        assert_relative_eq!(bar_of(pascal(1e5)), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn specific_volume_views() {
        let v = ft3lb(0.0623);
        assert_relative_eq!(ft3lb_of(v), 0.0623, max_relative = 1e-12);
        assert_relative_eq!(m3kg_of(v), 0.0623 * 0.062_427_96, max_relative = 1e-6);
        assert_relative_eq!(cm3g_of(m3kg(1e-3)), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn api_sg_round_trip() {
        for &api in &[10.0, 25.0, 40.0, 60.0] {
            assert_relative_eq!(api_from_sg(sg_from_api(api)), api, max_relative = 1e-12);
        }
    }

    #[test]
    fn watson_k_example() {
        // Kerosene-like: Tb = 470 K, SG = 0.8
        let kw = watson_k(kelvin(470.0), 0.8);
        assert_relative_eq!(kw, 11.82, max_relative = 1e-3);
    }
}
