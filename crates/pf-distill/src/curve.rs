//! Validated distillation curve with percentile interpolation.

use crate::error::{DistillError, DistillResult};
use pf_core::units::{k_of, kelvin, mmhg, Pressure, Temperature};

/// Laboratory assay the curve came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveKind {
    /// ASTM D86 atmospheric batch distillation.
    D86,
    /// True boiling point (ASTM D2892).
    Tbp,
    /// Simulated distillation by gas chromatography (ASTM D2887).
    Sd,
    /// Equilibrium flash vaporization.
    Efv,
    /// ASTM D1160 vacuum distillation at the given pressure.
    D1160(Pressure),
}

impl CurveKind {
    /// D1160 at its standard 10 mmHg condition.
    pub fn d1160_standard() -> Self {
        CurveKind::D1160(mmhg(10.0))
    }
}

/// A distillation curve: volume fractions in [0, 1] strictly increasing,
/// temperatures non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct DistillationCurve {
    kind: CurveKind,
    fractions: Vec<f64>,
    temperatures: Vec<Temperature>,
}

impl DistillationCurve {
    pub fn new(
        kind: CurveKind,
        fractions: Vec<f64>,
        temperatures: Vec<Temperature>,
    ) -> DistillResult<Self> {
        if fractions.len() != temperatures.len() {
            return Err(DistillError::InvalidCurve {
                what: "fraction and temperature lengths differ",
            });
        }
        if fractions.len() < 3 {
            return Err(DistillError::InvalidCurve {
                what: "at least 3 points required",
            });
        }
        for pair in fractions.windows(2) {
            if pair[1] <= pair[0] {
                return Err(DistillError::InvalidCurve {
                    what: "fractions must be strictly increasing",
                });
            }
        }
        if fractions[0] < 0.0 || *fractions.last().unwrap_or(&0.0) > 1.0 {
            return Err(DistillError::InvalidCurve {
                what: "fractions must lie in [0, 1]",
            });
        }
        for pair in temperatures.windows(2) {
            if k_of(pair[1]) < k_of(pair[0]) {
                return Err(DistillError::InvalidCurve {
                    what: "temperatures must be non-decreasing",
                });
            }
        }
        Ok(DistillationCurve {
            kind,
            fractions,
            temperatures,
        })
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn temperatures(&self) -> &[Temperature] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    /// Temperature at a volume fraction by linear interpolation. Fractions
    /// outside the tabulated span are an error, not an extrapolation.
    pub fn at_fraction(&self, x: f64) -> DistillResult<Temperature> {
        let lo = self.fractions[0];
        let hi = *self.fractions.last().unwrap_or(&lo);
        if x < lo || x > hi {
            return Err(DistillError::OutOfSpan {
                fraction: x,
                lo,
                hi,
            });
        }
        let idx = self
            .fractions
            .windows(2)
            .position(|w| x <= w[1])
            .unwrap_or(self.fractions.len() - 2);
        let (x0, x1) = (self.fractions[idx], self.fractions[idx + 1]);
        let (t0, t1) = (k_of(self.temperatures[idx]), k_of(self.temperatures[idx + 1]));
        Ok(kelvin(t0 + (t1 - t0) * (x - x0) / (x1 - x0)))
    }

    /// Temperature at a percent distilled (0-100 scale).
    pub fn at_percent(&self, percent: f64) -> DistillResult<Temperature> {
        self.at_fraction(percent / 100.0)
    }

    /// Resample onto the given percent grid.
    pub fn resampled(&self, kind: CurveKind, percents: &[f64]) -> DistillResult<Self> {
        let mut temps = Vec::with_capacity(percents.len());
        for &p in percents {
            temps.push(self.at_percent(p)?);
        }
        DistillationCurve::new(kind, percents.iter().map(|p| p / 100.0).collect(), temps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::celsius;

    fn naphtha_d86() -> DistillationCurve {
        DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.1, 0.3, 0.5, 0.7, 0.9],
            vec![
                celsius(36.5),
                celsius(54.0),
                celsius(77.0),
                celsius(101.5),
                celsius(131.0),
                celsius(171.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn interpolates_between_points() {
        let c = naphtha_d86();
        let t = c.at_percent(20.0).unwrap();
        assert_relative_eq!(k_of(t), k_of(celsius(65.5)), max_relative = 1e-9);
    }

    #[test]
    fn hits_tabulated_points_exactly() {
        let c = naphtha_d86();
        assert_relative_eq!(
            k_of(c.at_percent(50.0).unwrap()),
            k_of(celsius(101.5)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_out_of_span() {
        let c = naphtha_d86();
        assert!(matches!(
            c.at_percent(95.0),
            Err(DistillError::OutOfSpan { .. })
        ));
    }

    #[test]
    fn rejects_non_monotonic_fractions() {
        let err = DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.3, 0.2],
            vec![celsius(40.0), celsius(60.0), celsius(80.0)],
        );
        assert!(matches!(err, Err(DistillError::InvalidCurve { .. })));
    }

    #[test]
    fn rejects_decreasing_temperatures() {
        let err = DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.5, 0.9],
            vec![celsius(40.0), celsius(90.0), celsius(80.0)],
        );
        assert!(matches!(err, Err(DistillError::InvalidCurve { .. })));
    }

    #[test]
    fn allows_temperature_plateau() {
        // Azeotrope-like plateau is legal.
        assert!(DistillationCurve::new(
            CurveKind::Tbp,
            vec![0.1, 0.2, 0.3],
            vec![celsius(60.0), celsius(60.0), celsius(62.0)],
        )
        .is_ok());
    }
}
