//! Built-in crude-oil assay catalog.
//!
//! A small table of published whole-crude assays: gravity, sulfur and
//! nitrogen, cold-flow data and the separator-gas analysis. Entries are
//! looked up by id or free-text query and feed [`crate::crude::CrudeOil`].

/// One whole-crude assay record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrudeAssay {
    pub id: &'static str,
    pub name: &'static str,
    pub origin: &'static str,
    /// Stock-tank API gravity
    pub api: f64,
    /// Sulfur [weight %]
    pub sulfur_wt: f64,
    /// Nitrogen [weight %]
    pub nitrogen_wt: f64,
    /// Pour point [°F]
    pub pour_point_f: f64,
    /// Kinematic viscosity at 100°F [cSt]
    pub v100_cst: f64,
    /// Separator-gas mole fractions, C1 through C6 (butanes and pentanes
    /// lumped per carbon number).
    pub composition: [f64; 6],
    /// Separator-gas nitrogen mole fraction
    pub y_n2: f64,
    /// Separator-gas CO2 mole fraction
    pub y_co2: f64,
    /// Separator-gas H2S mole fraction
    pub y_h2s: f64,
}

/// C1..C6 molar masses [g/mol], butane and pentane isomers averaged.
const ALKANE_M: [f64; 6] = [16.043, 30.070, 44.097, 58.123, 72.150, 86.177];
const M_N2: f64 = 28.013;
const M_CO2: f64 = 44.010;
const M_H2S: f64 = 34.081;
const M_AIR: f64 = 28.9586;

impl CrudeAssay {
    /// Separator-gas gravity (air = 1) by Kay mixing over the full analysis.
    pub fn separator_gas_gravity(&self) -> f64 {
        let mut m = self.y_n2 * M_N2 + self.y_co2 * M_CO2 + self.y_h2s * M_H2S;
        let mut total = self.y_n2 + self.y_co2 + self.y_h2s;
        for (y, mw) in self.composition.iter().zip(ALKANE_M) {
            m += y * mw;
            total += y;
        }
        m / (total * M_AIR)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.to_ascii_lowercase().contains(&query)
            || self.name.to_ascii_lowercase().contains(&query)
            || self.origin.to_ascii_lowercase().contains(&query)
    }
}

const CRUDE_CATALOG: [CrudeAssay; 8] = [
    CrudeAssay {
        id: "brent",
        name: "Brent Blend",
        origin: "North Sea, UK",
        api: 38.3,
        sulfur_wt: 0.37,
        nitrogen_wt: 0.10,
        pour_point_f: 10.0,
        v100_cst: 3.6,
        composition: [0.820, 0.080, 0.045, 0.025, 0.012, 0.006],
        y_n2: 0.004,
        y_co2: 0.008,
        y_h2s: 0.0,
    },
    CrudeAssay {
        id: "wti",
        name: "West Texas Intermediate",
        origin: "Texas, USA",
        api: 39.6,
        sulfur_wt: 0.24,
        nitrogen_wt: 0.08,
        pour_point_f: -10.0,
        v100_cst: 4.0,
        composition: [0.840, 0.075, 0.040, 0.018, 0.008, 0.003],
        y_n2: 0.006,
        y_co2: 0.010,
        y_h2s: 0.0,
    },
    CrudeAssay {
        id: "arab-light",
        name: "Arabian Light",
        origin: "Saudi Arabia",
        api: 33.4,
        sulfur_wt: 1.77,
        nitrogen_wt: 0.09,
        pour_point_f: -30.0,
        v100_cst: 6.0,
        composition: [0.730, 0.100, 0.068, 0.040, 0.020, 0.010],
        y_n2: 0.002,
        y_co2: 0.015,
        y_h2s: 0.015,
    },
    CrudeAssay {
        id: "arab-heavy",
        name: "Arabian Heavy",
        origin: "Saudi Arabia",
        api: 27.6,
        sulfur_wt: 2.80,
        nitrogen_wt: 0.16,
        pour_point_f: -40.0,
        v100_cst: 17.0,
        composition: [0.690, 0.105, 0.075, 0.048, 0.023, 0.012],
        y_n2: 0.002,
        y_co2: 0.020,
        y_h2s: 0.025,
    },
    CrudeAssay {
        id: "maya",
        name: "Maya",
        origin: "Gulf of Mexico, Mexico",
        api: 21.8,
        sulfur_wt: 3.33,
        nitrogen_wt: 0.32,
        pour_point_f: -20.0,
        v100_cst: 98.0,
        composition: [0.650, 0.115, 0.085, 0.055, 0.030, 0.014],
        y_n2: 0.003,
        y_co2: 0.018,
        y_h2s: 0.030,
    },
    CrudeAssay {
        id: "bonny-light",
        name: "Bonny Light",
        origin: "Niger Delta, Nigeria",
        api: 35.4,
        sulfur_wt: 0.14,
        nitrogen_wt: 0.10,
        pour_point_f: 25.0,
        v100_cst: 4.4,
        composition: [0.850, 0.070, 0.038, 0.016, 0.006, 0.003],
        y_n2: 0.005,
        y_co2: 0.012,
        y_h2s: 0.0,
    },
    CrudeAssay {
        id: "urals",
        name: "Urals",
        origin: "Volga-Urals, Russia",
        api: 31.7,
        sulfur_wt: 1.35,
        nitrogen_wt: 0.14,
        pour_point_f: -15.0,
        v100_cst: 9.0,
        composition: [0.760, 0.098, 0.062, 0.035, 0.015, 0.007],
        y_n2: 0.008,
        y_co2: 0.010,
        y_h2s: 0.005,
    },
    CrudeAssay {
        id: "kirkuk",
        name: "Kirkuk Blend",
        origin: "Iraq",
        api: 36.1,
        sulfur_wt: 1.97,
        nitrogen_wt: 0.11,
        pour_point_f: -35.0,
        v100_cst: 5.3,
        composition: [0.770, 0.095, 0.058, 0.030, 0.014, 0.006],
        y_n2: 0.003,
        y_co2: 0.014,
        y_h2s: 0.010,
    },
];

pub fn crude_catalog() -> &'static [CrudeAssay] {
    &CRUDE_CATALOG
}

pub fn crude_record(id: &str) -> Option<&'static CrudeAssay> {
    CRUDE_CATALOG.iter().find(|a| a.id == id)
}

pub fn filter_crude_catalog(query: &str) -> Vec<CrudeAssay> {
    CRUDE_CATALOG
        .iter()
        .filter(|a| a.matches_query(query))
        .copied()
        .collect()
}
