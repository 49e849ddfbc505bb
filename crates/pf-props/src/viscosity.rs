//! Kinematic viscosity estimation for fractions (Abbott, 1971).
//!
//! Viscosities are plain f64 centistokes; the correlation was regressed in
//! Kw/API space and has no natural typed unit.

use crate::error::{PropsError, PropsResult};

/// Kinematic viscosity at 100°F [cSt], Abbott correlation from Watson K and
/// API gravity.
pub fn v100_abbott(kw: f64, api: f64) -> PropsResult<f64> {
    check_inputs(kw, api)?;
    let log_v = 4.39371 - 1.94733 * kw + 0.12769 * kw * kw
        + 3.2629e-4 * api * api
        - 1.18246e-2 * kw * api
        + (0.171617 * kw * kw + 10.9943 * api + 9.50663e-2 * api * api
            - 0.860218 * kw * api)
            / (api + 50.3642 - 4.78231 * kw);
    Ok(10f64.powf(log_v))
}

/// Kinematic viscosity at 210°F [cSt], Abbott correlation.
pub fn v210_abbott(kw: f64, api: f64) -> PropsResult<f64> {
    check_inputs(kw, api)?;
    let log_v = -0.463634 - 0.166532 * api + 5.13447e-4 * api * api - 8.48995e-3 * kw * api
        + (8.0325e-2 * kw + 1.24899 * api + 0.19768 * api * api)
            / (api + 26.786 - 2.6296 * kw);
    Ok(10f64.powf(log_v))
}

fn check_inputs(kw: f64, api: f64) -> PropsResult<()> {
    if !(10.0..=13.0).contains(&kw) {
        return Err(PropsError::OutOfRange {
            method: "abbott",
            what: "Kw",
        });
    }
    if !(0.0..=80.0).contains(&api) {
        return Err(PropsError::OutOfRange {
            method: "abbott",
            what: "API",
        });
    }
    Ok(())
}
