//! Refractive-index, density and PNA-composition correlations.
//!
//! The Huang characterization parameter `I` ties the refractive index to
//! boiling point and specific gravity; the composition splits build on it.

use crate::error::{PropsError, PropsResult};
use pf_core::units::{k_of, Temperature};

/// Paraffin/naphthene/aromatic mole-fraction split. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnaSplit {
    pub paraffins: f64,
    pub naphthenes: f64,
    pub aromatics: f64,
}

impl PnaSplit {
    fn clamped(xp: f64, xn: f64, xa: f64) -> Self {
        let xp = xp.max(0.0);
        let xn = xn.max(0.0);
        let xa = xa.max(0.0);
        let sum = xp + xn + xa;
        PnaSplit {
            paraffins: xp / sum,
            naphthenes: xn / sum,
            aromatics: xa / sum,
        }
    }
}

/// Huang (1977) characterization parameter `I = 0.3773·Tb^-0.02269·SG^0.9182`
/// with Tb in K.
pub fn huang_i(tb: Temperature, sg: f64) -> PropsResult<f64> {
    let tb_k = k_of(tb);
    if !(200.0..=700.0).contains(&tb_k) {
        return Err(PropsError::OutOfRange {
            method: "huang",
            what: "Tb",
        });
    }
    Ok(0.3773 * tb_k.powf(-0.02269) * sg.powf(0.9182))
}

/// Specific gravity back out of the Huang parameter at a known boiling point.
pub fn sg_from_huang_i(tb: Temperature, i: f64) -> PropsResult<f64> {
    let tb_k = k_of(tb);
    if i <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "Huang I must be positive",
        });
    }
    Ok((i / (0.3773 * tb_k.powf(-0.02269))).powf(1.0 / 0.9182))
}

/// Refractive index at 20°C from the Huang parameter,
/// `n = sqrt((1 + 2I)/(1 − I))`.
pub fn n_from_i(i: f64) -> PropsResult<f64> {
    if !(0.0..1.0).contains(&i) {
        return Err(PropsError::InvalidArg {
            what: "Huang I must lie in (0, 1)",
        });
    }
    Ok(((1.0 + 2.0 * i) / (1.0 - i)).sqrt())
}

/// Huang parameter from the refractive index, `I = (n² − 1)/(n² + 2)`.
pub fn i_from_n(n: f64) -> PropsResult<f64> {
    if n <= 1.0 {
        return Err(PropsError::InvalidArg {
            what: "refractive index must exceed 1",
        });
    }
    let n2 = n * n;
    Ok((n2 - 1.0) / (n2 + 2.0))
}

/// Liquid density at 20°C [g/cm³] from specific gravity 60/60°F,
/// `d20 = SG − 4.5e-3·(2.34 − 1.9·SG)`.
pub fn d20_from_sg(sg: f64) -> f64 {
    sg - 4.5e-3 * (2.34 - 1.9 * sg)
}

/// Carbon/hydrogen weight ratio (Riazi, 1986). Tb in K internally.
pub fn ch_ratio(tb: Temperature, sg: f64) -> PropsResult<f64> {
    let tb_k = k_of(tb);
    if !(200.0..=700.0).contains(&tb_k) {
        return Err(PropsError::OutOfRange {
            method: "ch_ratio",
            what: "Tb",
        });
    }
    Ok(3.4707
        * (1.485e-2 * tb_k + 16.94 * sg - 1.2492e-2 * tb_k * sg).exp()
        * tb_k.powf(-2.725)
        * sg.powf(-6.798))
}

/// Specific gravity matching a target C/H ratio at a known boiling point.
/// `ch_ratio` is monotonic in SG at fixed Tb, so a bisection suffices.
pub fn sg_from_ch(tb: Temperature, ch: f64) -> PropsResult<f64> {
    if ch <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "C/H ratio must be positive",
        });
    }
    let mut lo = 0.40;
    let mut hi = 1.30;
    let f = |sg: f64| ch_ratio(tb, sg).map(|v| v - ch);
    let f_lo = f(lo)?;
    let f_hi = f(hi)?;
    if f_lo * f_hi > 0.0 {
        return Err(PropsError::ConvergenceFailed {
            method: "sg_from_ch",
            what: "target C/H outside bracket",
        });
    }
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;
        if f_mid.abs() < 1e-10 || hi - lo < 1e-12 {
            return Ok(mid);
        }
        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// PNA split, Riazi-Daubert (1980/1986). Two regimes: below M = 200 the
/// split keys on the `m = M·(n − 1.475)` parameter and SG; above it keys on
/// the refractivity intercept `Ri = n − d20/2` and the C/H ratio.
pub fn pna_riazi_daubert(m: f64, sg: f64, n: f64, ch: f64) -> PropsResult<PnaSplit> {
    if m <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "molecular weight must be positive",
        });
    }
    let (xp, xn) = if m <= 200.0 {
        let mp = m * (n - 1.475);
        (
            3.7387 - 4.0829 * sg + 0.014772 * mp,
            -1.5027 + 2.10152 * sg - 0.02388 * mp,
        )
    } else {
        let d20 = d20_from_sg(sg);
        let ri = n - d20 / 2.0;
        (
            1.9842 - 0.27722 * ri - 0.15643 * ch,
            0.5977 - 0.761745 * ri + 0.068048 * ch,
        )
    };
    Ok(PnaSplit::clamped(xp, xn, 1.0 - xp - xn))
}

/// PNA split, van Nes-van Westen (1951) n-d-M method, from refractive index,
/// density at 20°C [g/cm³], molecular weight and sulfur weight fraction.
pub fn pna_van_nes(n: f64, d20: f64, m: f64, sulfur: f64) -> PropsResult<PnaSplit> {
    if m <= 0.0 {
        return Err(PropsError::InvalidArg {
            what: "molecular weight must be positive",
        });
    }
    if !(0.0..=1.0).contains(&sulfur) {
        return Err(PropsError::InvalidArg {
            what: "sulfur must be a weight fraction in [0, 1]",
        });
    }
    let s_pct = 100.0 * sulfur;
    let v = 2.51 * (n - 1.4750) - (d20 - 0.8510);
    let w = (d20 - 0.8510) - 1.11 * (n - 1.4750);

    let pct_aromatic = if v > 0.0 {
        430.0 * v + 3660.0 / m
    } else {
        670.0 * v + 3660.0 / m
    };
    let pct_ring = if w > 0.0 {
        820.0 * w - 3.0 * s_pct + 10_000.0 / m
    } else {
        1440.0 * w - 3.0 * s_pct + 10_600.0 / m
    };

    let xa = pct_aromatic / 100.0;
    let xn = (pct_ring - pct_aromatic) / 100.0;
    Ok(PnaSplit::clamped(1.0 - xa - xn, xn, xa))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::kelvin;
    use proptest::prelude::*;

    #[test]
    fn huang_parameter_kerosene() {
        // Tb = 470 K, SG = 0.8: I about 0.26, n about 1.44.
        let i = huang_i(kelvin(470.0), 0.8).unwrap();
        assert!((0.24..0.28).contains(&i), "I = {i}");
        let n = n_from_i(i).unwrap();
        assert!((1.42..1.47).contains(&n), "n = {n}");
    }

    #[test]
    fn huang_inverse_round_trips() {
        let tb = kelvin(470.0);
        let i = huang_i(tb, 0.8).unwrap();
        assert_relative_eq!(sg_from_huang_i(tb, i).unwrap(), 0.8, max_relative = 1e-10);
    }

    #[test]
    fn refractive_index_round_trips() {
        for &n in &[1.38, 1.45, 1.55] {
            let i = i_from_n(n).unwrap();
            assert_relative_eq!(n_from_i(i).unwrap(), n, max_relative = 1e-12);
        }
    }

    #[test]
    fn d20_slightly_below_sg() {
        let d = d20_from_sg(0.8);
        assert!(d < 0.8 && d > 0.79, "d20 = {d}");
    }

    #[test]
    fn ch_ratio_kerosene() {
        let ch = ch_ratio(kelvin(470.0), 0.8).unwrap();
        assert_relative_eq!(ch, 6.23, max_relative = 5e-3);
    }

    #[test]
    fn sg_from_ch_inverts() {
        let tb = kelvin(470.0);
        let ch = ch_ratio(tb, 0.8).unwrap();
        assert_relative_eq!(sg_from_ch(tb, ch).unwrap(), 0.8, max_relative = 1e-7);
    }

    #[test]
    fn pna_light_fraction_mostly_paraffinic() {
        // Light paraffinic naphtha
        let split = pna_riazi_daubert(96.0, 0.7365, 1.40, 5.5).unwrap();
        assert!(split.paraffins > split.aromatics);
        assert_relative_eq!(
            split.paraffins + split.naphthenes + split.aromatics,
            1.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn pna_heavy_branch_uses_refractivity_intercept() {
        let split = pna_riazi_daubert(300.0, 0.90, 1.50, 7.5).unwrap();
        assert_relative_eq!(
            split.paraffins + split.naphthenes + split.aromatics,
            1.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn van_nes_split_sums_to_one() {
        let split = pna_van_nes(1.4689, 0.8414, 190.0, 0.002).unwrap();
        assert_relative_eq!(
            split.paraffins + split.naphthenes + split.aromatics,
            1.0,
            max_relative = 1e-12
        );
        assert!(split.paraffins > 0.0);
    }

    #[test]
    fn van_nes_rejects_bad_sulfur() {
        assert!(pna_van_nes(1.46, 0.84, 190.0, 1.5).is_err());
    }

    proptest! {
        #[test]
        fn pna_always_normalized(
            m in 80.0f64..400.0,
            sg in 0.65f64..1.05,
            n in 1.38f64..1.58,
            ch in 5.0f64..9.0,
        ) {
            let s = pna_riazi_daubert(m, sg, n, ch).unwrap();
            prop_assert!((s.paraffins + s.naphthenes + s.aromatics - 1.0).abs() < 1e-9);
            prop_assert!(s.paraffins >= 0.0 && s.naphthenes >= 0.0 && s.aromatics >= 0.0);
        }

        #[test]
        fn huang_i_stays_physical(tb in 250.0f64..650.0, sg in 0.55f64..1.2) {
            let i = huang_i(kelvin(tb), sg).unwrap();
            prop_assert!(i > 0.0 && i < 1.0);
            prop_assert!(n_from_i(i).unwrap() > 1.0);
        }
    }
}
