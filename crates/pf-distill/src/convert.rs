//! Interconversions between laboratory distillation assays.
//!
//! Two families: pointwise power laws (Riazi) evaluated per percentile, and
//! segment-difference methods (Daubert, D1160) that anchor at the 50% point
//! and accumulate transformed segment widths outward. Reverse directions
//! are written out explicitly; none is an aliased inverse of its forward.

use crate::curve::{CurveKind, DistillationCurve};
use crate::error::{DistillError, DistillResult};
use pf_core::units::{f_of, fahrenheit, k_of, kelvin, Temperature};

// Pointwise Riazi coefficients: (percent, a, b), model TBP = a·D86^b in K.
const D86_TBP_RIAZI: [(f64, f64, f64); 7] = [
    (0.0, 0.9177, 1.0019),
    (10.0, 0.5564, 1.0900),
    (30.0, 0.7617, 1.0425),
    (50.0, 0.9013, 1.0176),
    (70.0, 0.8821, 1.0226),
    (90.0, 0.9552, 1.0110),
    (95.0, 0.8177, 1.0355),
];

// SD -> D86: (percent, a, b, c), model D86 = a·SD^b·F^c in K with
// F = 0.01411·SD10^0.05434·SD50^0.6147.
const SD_D86_RIAZI: [(f64, f64, f64, f64); 7] = [
    (0.0, 5.1764, 0.7445, 0.2879),
    (10.0, 3.7452, 0.7944, 0.2671),
    (30.0, 4.2749, 0.7719, 0.3450),
    (50.0, 18.445, 0.5425, 0.7132),
    (70.0, 1.0751, 0.9867, 0.0486),
    (90.0, 1.0849, 0.9834, 0.0354),
    (95.0, 1.799, 0.9007, 0.0625),
];

// D86 -> EFV: (percent, a, b, c), model EFV = a·D86^b·SG^c in K.
const D86_EFV_RIAZI: [(f64, f64, f64, f64); 7] = [
    (0.0, 2.9747, 0.8466, 0.4209),
    (10.0, 1.4459, 0.9511, 0.1287),
    (30.0, 0.8506, 1.0315, 0.0817),
    (50.0, 3.268, 0.8274, 0.6214),
    (70.0, 8.2873, 0.6871, 0.934),
    (90.0, 10.6266, 0.6529, 1.1025),
    (100.0, 7.9952, 0.6949, 1.0737),
];

// Daubert (1994) segment table: (lo%, hi%, A, B), model Y = A·X^B on °F
// segment widths, anchored at TBP50 = 0.87180·D86_50^1.0258.
const D86_TBP_DAUBERT: [(f64, f64, f64, f64); 6] = [
    (0.0, 10.0, 7.4012, 0.6024),
    (10.0, 30.0, 4.9004, 0.7164),
    (30.0, 50.0, 3.0305, 0.8008),
    (50.0, 70.0, 2.5282, 0.8200),
    (70.0, 90.0, 3.0419, 0.7550),
    (90.0, 100.0, 0.11798, 1.6606),
];

/// Pointwise evaluation over whichever table percents fall inside the
/// input curve's span. At least 3 usable percents are required.
fn pointwise<F>(
    curve: &DistillationCurve,
    percents: &[f64],
    out_kind: CurveKind,
    f: F,
) -> DistillResult<DistillationCurve>
where
    F: Fn(f64, Temperature) -> Temperature,
{
    let mut xs = Vec::new();
    let mut ts = Vec::new();
    for &p in percents {
        if let Ok(t) = curve.at_percent(p) {
            xs.push(p / 100.0);
            ts.push(f(p, t));
        }
    }
    if xs.len() < 3 {
        return Err(DistillError::InvalidArg {
            what: "curve span covers fewer than 3 table percents",
        });
    }
    DistillationCurve::new(out_kind, xs, ts)
}

/// D86 -> TBP, Riazi pointwise power law.
pub fn d86_to_tbp_riazi(d86: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let percents: Vec<f64> = D86_TBP_RIAZI.iter().map(|r| r.0).collect();
    pointwise(d86, &percents, CurveKind::Tbp, |p, t| {
        let (_, a, b) = *D86_TBP_RIAZI
            .iter()
            .find(|r| r.0 == p)
            .unwrap_or(&D86_TBP_RIAZI[0]);
        kelvin(a * k_of(t).powf(b))
    })
}

/// TBP -> D86, the explicit inverse of Riazi's pointwise power law.
pub fn tbp_to_d86_riazi(tbp: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let percents: Vec<f64> = D86_TBP_RIAZI.iter().map(|r| r.0).collect();
    pointwise(tbp, &percents, CurveKind::D86, |p, t| {
        let (_, a, b) = *D86_TBP_RIAZI
            .iter()
            .find(|r| r.0 == p)
            .unwrap_or(&D86_TBP_RIAZI[0]);
        kelvin((k_of(t) / a).powf(1.0 / b))
    })
}

/// D86 -> TBP, Daubert (1994) segment-difference method (API procedure 3A1.1).
pub fn d86_to_tbp_daubert(d86: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let d: Vec<f64> = sample_f(d86, &[0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 100.0])?;
    let t50 = d[3];
    if t50 <= 0.0 {
        return Err(DistillError::InvalidArg {
            what: "50% point must be above 0°F for the Daubert anchor",
        });
    }
    let tbp50 = 0.87180 * t50.powf(1.0258);

    let mut out = [f64::NAN; 7];
    out[3] = tbp50;
    // Upward from the anchor
    for (i, &(_, _, a, b)) in D86_TBP_DAUBERT.iter().enumerate().skip(3) {
        out[i + 1] = out[i] + a * (d[i + 1] - d[i]).powf(b);
    }
    // Downward from the anchor
    for (i, &(_, _, a, b)) in D86_TBP_DAUBERT.iter().enumerate().take(3).rev() {
        out[i] = out[i + 1] - a * (d[i + 1] - d[i]).powf(b);
    }

    curve_from_f(
        CurveKind::Tbp,
        &[0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 100.0],
        &out,
    )
}

/// TBP -> D86, Daubert's reverse: invert the anchor and each segment width.
pub fn tbp_to_d86_daubert(tbp: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let t: Vec<f64> = sample_f(tbp, &[0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 100.0])?;
    let tbp50 = t[3];
    if tbp50 <= 0.0 {
        return Err(DistillError::InvalidArg {
            what: "50% point must be above 0°F for the Daubert anchor",
        });
    }
    let d50 = (tbp50 / 0.87180).powf(1.0 / 1.0258);

    let mut out = [f64::NAN; 7];
    out[3] = d50;
    for (i, &(_, _, a, b)) in D86_TBP_DAUBERT.iter().enumerate().skip(3) {
        out[i + 1] = out[i] + ((t[i + 1] - t[i]) / a).powf(1.0 / b);
    }
    for (i, &(_, _, a, b)) in D86_TBP_DAUBERT.iter().enumerate().take(3).rev() {
        out[i] = out[i + 1] - ((t[i + 1] - t[i]) / a).powf(1.0 / b);
    }

    curve_from_f(
        CurveKind::D86,
        &[0.0, 10.0, 30.0, 50.0, 70.0, 90.0, 100.0],
        &out,
    )
}

/// Simulated distillation -> D86, Riazi's three-parameter power law with the
/// composition factor F from the SD 10% and 50% points.
pub fn sd_to_d86_riazi(sd: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let sd10 = k_of(sd.at_percent(10.0)?);
    let sd50 = k_of(sd.at_percent(50.0)?);
    let f = 0.01411 * sd10.powf(0.05434) * sd50.powf(0.6147);
    let percents: Vec<f64> = SD_D86_RIAZI.iter().map(|r| r.0).collect();
    pointwise(sd, &percents, CurveKind::D86, |p, t| {
        let (_, a, b, c) = *SD_D86_RIAZI
            .iter()
            .find(|r| r.0 == p)
            .unwrap_or(&SD_D86_RIAZI[0]);
        kelvin(a * k_of(t).powf(b) * f.powf(c))
    })
}

/// Simulated distillation -> TBP, composed through D86.
pub fn sd_to_tbp(sd: &DistillationCurve) -> DistillResult<DistillationCurve> {
    d86_to_tbp_riazi(&sd_to_d86_riazi(sd)?)
}

/// D86 -> EFV; the flash curve also depends on the bulk specific gravity.
pub fn d86_to_efv(d86: &DistillationCurve, sg: f64) -> DistillResult<DistillationCurve> {
    if !(0.4..=1.3).contains(&sg) {
        return Err(DistillError::InvalidArg {
            what: "specific gravity outside 0.4-1.3",
        });
    }
    let percents: Vec<f64> = D86_EFV_RIAZI.iter().map(|r| r.0).collect();
    pointwise(d86, &percents, CurveKind::Efv, |p, t| {
        let (_, a, b, c) = *D86_EFV_RIAZI
            .iter()
            .find(|r| r.0 == p)
            .unwrap_or(&D86_EFV_RIAZI[0]);
        kelvin(a * k_of(t).powf(b) * sg.powf(c))
    })
}

// Edmister's cubic for the low-end D1160 segment widths (widths in K).
fn d1160_segment(dt: f64) -> f64 {
    0.3 + 1.2775 * dt - 5.539e-3 * dt * dt + 2.7486e-5 * dt.powi(3)
}

/// D1160 -> TBP, both at 10 mmHg. Points at and above 50% carry over
/// unchanged; below, segment widths pass through Edmister's cubic.
pub fn d1160_to_tbp_10mmhg(d1160: &DistillationCurve) -> DistillResult<DistillationCurve> {
    let grid = [10.0, 30.0, 50.0, 70.0, 90.0];
    let mut t: Vec<f64> = Vec::with_capacity(grid.len());
    for &p in &grid {
        t.push(k_of(d1160.at_percent(p)?));
    }
    // 50% anchor and above unchanged
    let t50 = t[2];
    let t30 = t50 - d1160_segment(t50 - t[1]);
    let t10 = t30 - d1160_segment(t[1] - t[0]);

    curve_from_k(CurveKind::Tbp, &grid, &[t10, t30, t50, t[3], t[4]])
}

fn sample_f(curve: &DistillationCurve, percents: &[f64]) -> DistillResult<Vec<f64>> {
    percents
        .iter()
        .map(|&p| curve.at_percent(p).map(f_of))
        .collect()
}

fn curve_from_f(kind: CurveKind, percents: &[f64], temps_f: &[f64]) -> DistillResult<DistillationCurve> {
    DistillationCurve::new(
        kind,
        percents.iter().map(|p| p / 100.0).collect(),
        temps_f.iter().map(|&t| fahrenheit(t)).collect(),
    )
}

fn curve_from_k(kind: CurveKind, percents: &[f64], temps_k: &[f64]) -> DistillResult<DistillationCurve> {
    DistillationCurve::new(
        kind,
        percents.iter().map(|p| p / 100.0).collect(),
        temps_k.iter().map(|&t| kelvin(t)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::{c_of, celsius};

    // API-TDB kerosene example.
    fn kerosene_d86() -> DistillationCurve {
        DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.1, 0.3, 0.5, 0.7, 0.9],
            vec![
                celsius(32.2),
                celsius(71.1),
                celsius(143.3),
                celsius(204.4),
                celsius(250.6),
                celsius(291.7),
            ],
        )
        .unwrap()
    }

    #[test]
    fn riazi_d86_to_tbp_reference() {
        let tbp = d86_to_tbp_riazi(&kerosene_d86()).unwrap();
        let expected_c = [10.1, 50.9, 136.8, 206.6, 259.1, 305.3];
        for (t, e) in tbp.temperatures().iter().zip(expected_c) {
            assert_relative_eq!(c_of(*t), e, epsilon = 0.2);
        }
    }

    #[test]
    fn riazi_reverse_recovers_d86() {
        let d86 = kerosene_d86();
        let back = tbp_to_d86_riazi(&d86_to_tbp_riazi(&d86).unwrap()).unwrap();
        for (a, b) in back.temperatures().iter().zip(d86.temperatures()) {
            assert_relative_eq!(k_of(*a), k_of(*b), max_relative = 1e-9);
        }
    }

    #[test]
    fn daubert_tracks_riazi() {
        // Daubert needs the full 0-100% span; stretch the assay.
        let d86 = DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0],
            vec![
                celsius(32.2),
                celsius(71.1),
                celsius(143.3),
                celsius(204.4),
                celsius(250.6),
                celsius(291.7),
                celsius(315.0),
            ],
        )
        .unwrap();
        let riazi = d86_to_tbp_riazi(&d86).unwrap();
        let daubert = d86_to_tbp_daubert(&d86).unwrap();
        for &p in &[10.0, 30.0, 50.0, 70.0, 90.0] {
            let a = c_of(riazi.at_percent(p).unwrap());
            let b = c_of(daubert.at_percent(p).unwrap());
            assert!((a - b).abs() < 6.0, "{p}%: riazi {a:.1} vs daubert {b:.1}");
        }
    }

    #[test]
    fn daubert_reverse_recovers_d86() {
        let d86 = DistillationCurve::new(
            CurveKind::D86,
            vec![0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0],
            vec![
                celsius(32.2),
                celsius(71.1),
                celsius(143.3),
                celsius(204.4),
                celsius(250.6),
                celsius(291.7),
                celsius(315.0),
            ],
        )
        .unwrap();
        let back = tbp_to_d86_daubert(&d86_to_tbp_daubert(&d86).unwrap()).unwrap();
        for (a, b) in back.temperatures().iter().zip(d86.temperatures()) {
            assert_relative_eq!(k_of(*a), k_of(*b), max_relative = 1e-6);
        }
    }

    #[test]
    fn sd_to_d86_shifts_down_at_front() {
        // GC simulated distillation reads lower than D86 at the front end.
        let sd = DistillationCurve::new(
            CurveKind::Sd,
            vec![0.0, 0.1, 0.3, 0.5, 0.7, 0.9],
            vec![
                celsius(15.0),
                celsius(60.0),
                celsius(140.0),
                celsius(205.0),
                celsius(255.0),
                celsius(300.0),
            ],
        )
        .unwrap();
        let d86 = sd_to_d86_riazi(&sd).unwrap();
        let front_sd = c_of(sd.at_percent(0.0).unwrap());
        let front_d86 = c_of(d86.at_percent(0.0).unwrap());
        assert!(front_d86 > front_sd, "{front_d86} <= {front_sd}");

        // The composed TBP path stays monotonic.
        assert!(sd_to_tbp(&sd).is_ok());
    }

    #[test]
    fn efv_sits_above_d86_midrange() {
        let efv = d86_to_efv(&kerosene_d86(), 0.78).unwrap();
        let d86_50 = c_of(kerosene_d86().at_percent(50.0).unwrap());
        let efv_50 = c_of(efv.at_percent(50.0).unwrap());
        assert!((efv_50 - d86_50).abs() < 40.0);
    }

    #[test]
    fn d1160_upper_points_carry_over() {
        let d1160 = DistillationCurve::new(
            CurveKind::d1160_standard(),
            vec![0.1, 0.3, 0.5, 0.7, 0.9],
            vec![
                celsius(150.0),
                celsius(205.0),
                celsius(250.0),
                celsius(290.0),
                celsius(340.0),
            ],
        )
        .unwrap();
        let tbp = d1160_to_tbp_10mmhg(&d1160).unwrap();
        for &p in &[50.0, 70.0, 90.0] {
            assert_relative_eq!(
                k_of(tbp.at_percent(p).unwrap()),
                k_of(d1160.at_percent(p).unwrap()),
                max_relative = 1e-12
            );
        }
        // Lower points stretch downward.
        assert!(
            k_of(tbp.at_percent(10.0).unwrap()) < k_of(d1160.at_percent(10.0).unwrap())
        );
    }

    #[test]
    fn short_span_is_rejected() {
        let stub = DistillationCurve::new(
            CurveKind::D86,
            vec![0.4, 0.5, 0.6],
            vec![celsius(180.0), celsius(204.0), celsius(225.0)],
        )
        .unwrap();
        assert!(matches!(
            d86_to_tbp_riazi(&stub),
            Err(DistillError::InvalidArg { .. })
        ));
    }
}
