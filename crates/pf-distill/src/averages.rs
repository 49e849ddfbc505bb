//! Average boiling points of a D86 assay (API procedure 2B1.1).

use crate::curve::DistillationCurve;
use crate::error::DistillResult;
use pf_core::units::{f_of, fahrenheit, Temperature};

/// The five average boiling points. VABP is the plain 10-90% arithmetic
/// mean; the others subtract (or add) a slope-dependent correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoilingAverages {
    /// Volumetric average boiling point
    pub vabp: Temperature,
    /// Weight average boiling point
    pub wabp: Temperature,
    /// Molal average boiling point
    pub mabp: Temperature,
    /// Cubic average boiling point
    pub cabp: Temperature,
    /// Mean average boiling point
    pub meabp: Temperature,
}

/// Average boiling points from a D86 curve covering at least 10-90%.
/// Internal arithmetic in °F with the slope in °F per percent.
pub fn boiling_averages(d86: &DistillationCurve) -> DistillResult<BoilingAverages> {
    let t10 = f_of(d86.at_percent(10.0)?);
    let t30 = f_of(d86.at_percent(30.0)?);
    let t50 = f_of(d86.at_percent(50.0)?);
    let t70 = f_of(d86.at_percent(70.0)?);
    let t90 = f_of(d86.at_percent(90.0)?);

    let vabp = (t10 + t30 + t50 + t70 + t90) / 5.0;
    let sl = (t90 - t10) / 80.0;

    let wabp = vabp + (-3.64991 - 0.02706 * vabp.powf(0.6667) + 5.163875 * sl.powf(0.25)).exp();
    let mabp = vabp - (-1.15158 - 0.01181 * vabp.powf(0.6667) + 3.70612 * sl.powf(0.25)).exp();
    let cabp = vabp - (-0.82368 - 0.08997 * vabp.powf(0.45) + 2.456791 * sl.powf(0.45)).exp();
    let meabp = vabp - (-1.53181 - 0.0128 * vabp.powf(0.6667) + 3.646064 * sl.powf(0.333)).exp();

    Ok(BoilingAverages {
        vabp: fahrenheit(vabp),
        wabp: fahrenheit(wabp),
        mabp: fahrenheit(mabp),
        cabp: fahrenheit(cabp),
        meabp: fahrenheit(meabp),
    })
}
