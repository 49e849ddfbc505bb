//! The petroleum-fraction property resolver.
//!
//! `characterize` classifies the sparse inputs into a definition mode,
//! resolves the base (Tb, SG) pair for that mode, then walks the property
//! graph in dependency order, dispatching each family through the
//! configured method. Failures on the base pair leave the instance in the
//! uncalculated state; failures downstream are recorded per property and
//! do not disturb unrelated properties.

use crate::config::{
    AcentricMethod, Config, CriticalMethod, D86TbpMethod, MolecularWeightMethod, PnaMethod,
    ZcMethod,
};
use crate::error::{FractionError, FractionResult};
use crate::inputs::{DefinitionMode, FractionInputs};
use pf_core::units::{api_from_sg, fahrenheit, k_of, kelvin, watson_k, Pressure, Temperature};
use pf_distill::averages::boiling_averages;
use pf_distill::convert;
use pf_distill::curve::{CurveKind, DistillationCurve};
use pf_distill::pressure::{normal_boiling_point, vapor_pressure};
use pf_distill::BoilingAverages;
use pf_props::composition::PnaSplit;
use pf_props::criticals::{PropertySet, RiaziInput};
use tracing::{debug, info, warn};

/// One derived property that could not be computed, with its cause.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFailure {
    pub property: &'static str,
    pub error: FractionError,
}

/// A fully characterized fraction. Immutable once built; every derived
/// value is `Option` because each can fail independently.
#[derive(Debug, Clone, Default)]
pub struct PetroleumFraction {
    pub mode: Option<DefinitionMode>,

    // Base pair and its mutually consistent views
    pub tb: Option<Temperature>,
    pub sg: Option<f64>,
    pub api: Option<f64>,
    pub kw: Option<f64>,
    pub m: Option<f64>,

    // Critical properties
    pub tc: Option<Temperature>,
    pub pc: Option<Pressure>,
    pub vc: Option<pf_core::units::SpecVolume>,
    pub w: Option<f64>,
    pub zc: Option<f64>,

    // Refractive and compositional
    pub n: Option<f64>,
    pub i: Option<f64>,
    pub ch: Option<f64>,
    pub d20: Option<f64>,
    pub pna: Option<PnaSplit>,

    // Viscosity
    pub v100: Option<f64>,
    pub v210: Option<f64>,

    // Point properties
    pub pour_point: Option<Temperature>,
    pub cloud_point: Option<Temperature>,
    pub freezing_point: Option<Temperature>,
    pub aniline_point: Option<Temperature>,
    pub smoke_point_mm: Option<f64>,
    pub cetane_index: Option<f64>,
    pub diesel_index: Option<f64>,
    pub flash_point: Option<Temperature>,

    // Distillation-derived
    pub d86: Option<DistillationCurve>,
    pub averages: Option<BoilingAverages>,
    pub reid_vapor_pressure: Option<Pressure>,

    pub failures: Vec<PropertyFailure>,
    msg: String,
}

// Resolved base pair plus whatever the mode's route already produced.
struct Base {
    tb: Temperature,
    sg: f64,
    preset: PropertySet,
    d86: Option<DistillationCurve>,
}

impl PetroleumFraction {
    /// Characterize a fraction from sparse inputs under a method
    /// configuration. Never panics; an unusable input set or a failed base
    /// pair leaves `status() == 0` with the reason in `msg()`.
    pub fn characterize(inputs: &FractionInputs, config: &Config) -> Self {
        let mut out = PetroleumFraction::default();

        let Some(mode) = inputs.classify() else {
            out.msg = FractionError::InsufficientInput.to_string();
            info!("characterization aborted: no definition mode");
            return out;
        };
        out.mode = Some(mode);
        debug!(?mode, "definition mode selected");

        let base = match resolve_base(inputs, config, mode) {
            Ok(base) => base,
            Err(err) => {
                out.msg = err.to_string();
                warn!(%err, "base pair resolution failed");
                return out;
            }
        };

        out.tb = Some(base.tb);
        out.sg = Some(base.sg);
        out.api = Some(api_from_sg(base.sg));
        out.kw = Some(watson_k(base.tb, base.sg));
        out.d86 = base.d86.clone();
        out.d20 = Some(pf_props::composition::d20_from_sg(base.sg));

        out.resolve_molecular_weight(inputs, config, &base);
        out.resolve_criticals(inputs, config, &base);
        out.resolve_refractive(inputs);
        out.resolve_acentric(config);
        out.resolve_composition(inputs, config);
        out.resolve_viscosity(inputs);
        out.resolve_points();
        out.resolve_curve_derived();

        info!(
            mode = ?out.mode,
            failures = out.failures.len(),
            "characterization complete"
        );
        out
    }

    /// 1 when the base pair resolved, 0 otherwise (the uncalculated state).
    pub fn status(&self) -> u8 {
        u8::from(self.tb.is_some() && self.sg.is_some())
    }

    /// Human-readable reason when `status() == 0`; empty otherwise.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    fn fail(&mut self, property: &'static str, error: FractionError) {
        debug!(property, %error, "property resolution failed");
        self.failures.push(PropertyFailure { property, error });
    }

    fn resolve_molecular_weight(
        &mut self,
        inputs: &FractionInputs,
        config: &Config,
        base: &Base,
    ) {
        if let Some(m) = inputs.m.or(base.preset.m) {
            self.m = Some(m);
            return;
        }
        let (tb, sg) = (base.tb, base.sg);
        let result = match config.molecular_weight {
            MolecularWeightMethod::RiaziDaubert1980 => {
                pf_props::riazi_daubert_1980(tb, sg).map(|p| p.m)
            }
            MolecularWeightMethod::RiaziDaubert => {
                pf_props::riazi_daubert(RiaziInput::Tb(tb), RiaziInput::Sg(sg)).map(|p| p.m)
            }
            MolecularWeightMethod::LeeKesler => pf_props::lee_kesler(tb, sg).map(|p| p.m),
            MolecularWeightMethod::SimDaubert => pf_props::sim_daubert(tb, sg).map(|p| p.m),
            MolecularWeightMethod::Twu => pf_props::twu(tb, sg).map(|p| p.m),
        };
        match result {
            Ok(Some(m)) => self.m = Some(m),
            Ok(None) => self.fail(
                "molecular_weight",
                FractionError::MissingDependency {
                    what: "selected method does not produce M",
                },
            ),
            Err(err) => self.fail("molecular_weight", err.into()),
        }
    }

    fn resolve_criticals(&mut self, inputs: &FractionInputs, config: &Config, base: &Base) {
        let (tb, sg) = (base.tb, base.sg);
        let result: FractionResult<PropertySet> = match config.critical {
            CriticalMethod::RiaziDaubert1980 => {
                pf_props::riazi_daubert_1980(tb, sg).map_err(Into::into)
            }
            CriticalMethod::RiaziDaubert => {
                pf_props::riazi_daubert(RiaziInput::Tb(tb), RiaziInput::Sg(sg))
                    .map_err(Into::into)
            }
            CriticalMethod::Cavett => {
                pf_props::cavett(tb, api_from_sg(sg)).map_err(Into::into)
            }
            CriticalMethod::LeeKesler => pf_props::lee_kesler(tb, sg).map_err(Into::into),
            CriticalMethod::SimDaubert => pf_props::sim_daubert(tb, sg).map_err(Into::into),
            CriticalMethod::Twu => pf_props::twu(tb, sg).map_err(Into::into),
            CriticalMethod::Sancet => match self.m {
                Some(m) => pf_props::sancet(m).map_err(Into::into),
                None => Err(FractionError::MissingDependency {
                    what: "Sancet criticals need M",
                }),
            },
            CriticalMethod::Standing => match self.m {
                Some(m) => pf_props::standing(m, sg).map_err(Into::into),
                None => Err(FractionError::MissingDependency {
                    what: "Standing criticals need M",
                }),
            },
            CriticalMethod::Ahmed => match inputs.nc {
                Some(nc) => pf_props::ahmed(nc).map_err(Into::into),
                None => Err(FractionError::MissingDependency {
                    what: "Ahmed criticals need the carbon number",
                }),
            },
            CriticalMethod::Edmister => edmister_criticals(tb, sg),
        };

        match result {
            Ok(set) => {
                self.tc = base.preset.tc.or(set.tc);
                self.pc = base.preset.pc.or(set.pc);
                self.vc = base.preset.vc.or(set.vc);
                if let Some(w) = set.w.or(base.preset.w) {
                    // Provisional; the acentric pass may override per config.
                    self.w = Some(w);
                }
                // Methods without a Vc row fall back to the generalized table.
                if self.vc.is_none() {
                    match pf_props::riazi_daubert(RiaziInput::Tb(tb), RiaziInput::Sg(sg)) {
                        Ok(p) => self.vc = p.vc,
                        Err(err) => self.fail("vc", err.into()),
                    }
                }
            }
            Err(err) => {
                // Presets from a carbon-number route still stand.
                self.tc = base.preset.tc;
                self.pc = base.preset.pc;
                self.vc = base.preset.vc;
                self.w = base.preset.w;
                if self.tc.is_none() {
                    self.fail("criticals", err);
                }
            }
        }
    }

    fn resolve_refractive(&mut self, inputs: &FractionInputs) {
        self.i = inputs.resolved_i();
        if self.i.is_none() {
            if let (Some(tb), Some(sg)) = (self.tb, self.sg) {
                match pf_props::huang_i(tb, sg) {
                    Ok(i) => self.i = Some(i),
                    Err(err) => self.fail("huang_i", err.into()),
                }
            }
        }
        if let Some(i) = self.i {
            match pf_props::n_from_i(i) {
                Ok(n) => self.n = Some(n),
                Err(err) => self.fail("refractive_index", err.into()),
            }
        }

        self.ch = inputs.ch;
        if self.ch.is_none() {
            if let (Some(tb), Some(sg)) = (self.tb, self.sg) {
                match pf_props::ch_ratio(tb, sg) {
                    Ok(ch) => self.ch = Some(ch),
                    Err(err) => self.fail("ch_ratio", err.into()),
                }
            }
        }
    }

    fn resolve_acentric(&mut self, config: &Config) {
        let (Some(tc), Some(pc), Some(tb)) = (self.tc, self.pc, self.tb) else {
            if self.w.is_none() {
                self.fail(
                    "acentric",
                    FractionError::MissingDependency {
                        what: "acentric factor needs Tc, Pc and Tb",
                    },
                );
            }
            return;
        };
        let result = match config.acentric {
            AcentricMethod::LeeKesler => match self.sg {
                Some(sg) => pf_props::w_lee_kesler(tc, pc, tb, sg),
                None => Err(pf_props::PropsError::InvalidArg {
                    what: "Lee-Kesler acentric needs SG",
                }),
            },
            AcentricMethod::Edmister => pf_props::w_edmister(tc, pc, tb),
            AcentricMethod::Korsten => pf_props::w_korsten(tc, pc, tb),
        };
        match result {
            Ok(w) => self.w = Some(w),
            Err(err) => {
                if self.w.is_none() {
                    self.fail("acentric", err.into());
                }
            }
        }

        if let Some(w) = self.w {
            self.zc = Some(match config.zc {
                ZcMethod::LeeKesler => pf_props::zc_lee_kesler(w),
                ZcMethod::Hougen => pf_props::zc_hougen(w),
                ZcMethod::Reid => pf_props::zc_reid(w),
                ZcMethod::Salerno => pf_props::zc_salerno(w),
                ZcMethod::Nath => pf_props::zc_nath(w),
            });
        }
    }

    fn resolve_composition(&mut self, inputs: &FractionInputs, config: &Config) {
        let result = match config.pna {
            PnaMethod::RiaziDaubert => {
                match (self.m, self.sg, self.n, self.ch) {
                    (Some(m), Some(sg), Some(n), Some(ch)) => {
                        pf_props::pna_riazi_daubert(m, sg, n, ch).map_err(Into::into)
                    }
                    _ => Err(FractionError::MissingDependency {
                        what: "PNA split needs M, SG, n and CH",
                    }),
                }
            }
            PnaMethod::VanNes => match (self.n, self.d20, self.m) {
                (Some(n), Some(d20), Some(m)) => {
                    pf_props::pna_van_nes(n, d20, m, inputs.sulfur.unwrap_or(0.0))
                        .map_err(Into::into)
                }
                _ => Err(FractionError::MissingDependency {
                    what: "n-d-M split needs n, d20 and M",
                }),
            },
        };
        match result {
            Ok(split) => self.pna = Some(split),
            Err(err) => self.fail("pna", err),
        }
    }

    fn resolve_viscosity(&mut self, inputs: &FractionInputs) {
        self.v100 = inputs.v100;
        self.v210 = inputs.v210;
        let (Some(kw), Some(api)) = (self.kw, self.api) else {
            return;
        };
        if self.v100.is_none() {
            match pf_props::v100_abbott(kw, api) {
                Ok(v) => self.v100 = Some(v),
                Err(err) => self.fail("v100", err.into()),
            }
        }
        if self.v210.is_none() {
            match pf_props::v210_abbott(kw, api) {
                Ok(v) => self.v210 = Some(v),
                Err(err) => self.fail("v210", err.into()),
            }
        }
    }

    fn resolve_points(&mut self) {
        let (Some(tb), Some(sg)) = (self.tb, self.sg) else {
            return;
        };

        match pf_props::freezing_point(tb, sg) {
            Ok(t) => self.freezing_point = Some(t),
            Err(err) => self.fail("freezing_point", err.into()),
        }
        match pf_props::aniline_point(tb, sg) {
            Ok(t) => self.aniline_point = Some(t),
            Err(err) => self.fail("aniline_point", err.into()),
        }
        match pf_props::smoke_point(tb, sg) {
            Ok(mm) => self.smoke_point_mm = Some(mm),
            Err(err) => self.fail("smoke_point", err.into()),
        }
        match pf_props::cloud_point(tb, sg) {
            Ok(t) => self.cloud_point = Some(t),
            Err(err) => self.fail("cloud_point", err.into()),
        }

        match (self.m, self.v100) {
            (Some(m), Some(v100)) => match pf_props::pour_point(sg, m, v100) {
                Ok(t) => self.pour_point = Some(t),
                Err(err) => self.fail("pour_point", err.into()),
            },
            _ => self.fail(
                "pour_point",
                FractionError::MissingDependency {
                    what: "pour point needs M and v100",
                },
            ),
        }

        if let (Some(api), Some(aniline)) = (self.api, self.aniline_point) {
            self.diesel_index = Some(pf_props::diesel_index(api, aniline));
        }
    }

    fn resolve_curve_derived(&mut self) {
        let Some(d86) = self.d86.clone() else {
            return;
        };

        match boiling_averages(&d86) {
            Ok(avg) => self.averages = Some(avg),
            Err(err) => self.fail("boiling_averages", err.into()),
        }

        match d86.at_percent(10.0) {
            Ok(t10) => {
                match pf_props::flash_point(t10) {
                    Ok(t) => self.flash_point = Some(t),
                    Err(err) => self.fail("flash_point", err.into()),
                }
                // Reid conditions: light-end surrogate at 100°F.
                if let Some(kw) = self.kw {
                    match vapor_pressure(t10, kw, fahrenheit(100.0)) {
                        Ok(p) => self.reid_vapor_pressure = Some(p),
                        Err(err) => self.fail("reid_vapor_pressure", err.into()),
                    }
                }
            }
            Err(err) => self.fail("flash_point", err.into()),
        }

        match (d86.at_percent(50.0), self.d20) {
            (Ok(t50), Some(d20)) => match pf_props::cetane_index(d20, t50) {
                Ok(ci) => self.cetane_index = Some(ci),
                Err(err) => self.fail("cetane_index", err.into()),
            },
            (Err(err), _) => self.fail("cetane_index", err.into()),
            _ => {}
        }
    }
}

// Lee-Kesler Tc and M with the Edmister vapor-pressure relation closing Pc.
fn edmister_criticals(tb: Temperature, sg: f64) -> FractionResult<PropertySet> {
    let lk = pf_props::lee_kesler(tb, sg)?;
    let (Some(tc), Some(w)) = (lk.tc, lk.w) else {
        return Err(FractionError::MissingDependency {
            what: "Edmister closure needs Lee-Kesler Tc and w",
        });
    };
    let closed = pf_props::edmister(Some(tc), None, Some(tb), Some(w))?;
    Ok(PropertySet {
        m: lk.m,
        tc: Some(tc),
        pc: closed.pc,
        w: Some(w),
        ..Default::default()
    })
}

fn resolve_base(
    inputs: &FractionInputs,
    config: &Config,
    mode: DefinitionMode,
) -> FractionResult<Base> {
    let plain = |tb: Temperature, sg: f64| Base {
        tb,
        sg,
        preset: PropertySet::default(),
        d86: None,
    };

    match mode {
        DefinitionMode::TbSg => {
            let tb = inputs.resolved_tb().ok_or(FractionError::InsufficientInput)?;
            let sg = inputs.resolved_sg().ok_or(FractionError::InsufficientInput)?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::MSg => {
            let m = inputs.m.ok_or(FractionError::InsufficientInput)?;
            let sg = inputs.resolved_sg().ok_or(FractionError::InsufficientInput)?;
            let set = pf_props::riazi_daubert(RiaziInput::M(m), RiaziInput::Sg(sg))?;
            let tb = set.tb.ok_or(FractionError::MissingDependency {
                what: "generalized table row lacks Tb",
            })?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::TbRefractive => {
            let tb = inputs.resolved_tb().ok_or(FractionError::InsufficientInput)?;
            let i = inputs.resolved_i().ok_or(FractionError::InsufficientInput)?;
            let sg = pf_props::sg_from_huang_i(tb, i)?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::TbCh => {
            let tb = inputs.resolved_tb().ok_or(FractionError::InsufficientInput)?;
            let ch = inputs.ch.ok_or(FractionError::InsufficientInput)?;
            let sg = pf_props::sg_from_ch(tb, ch)?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::MRefractive => {
            let m = inputs.m.ok_or(FractionError::InsufficientInput)?;
            let i = inputs.resolved_i().ok_or(FractionError::InsufficientInput)?;
            let (tb, sg) =
                solve_m_partner(m, "m_refractive", |tb| pf_props::sg_from_huang_i(tb, i))?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::MCh => {
            let m = inputs.m.ok_or(FractionError::InsufficientInput)?;
            let ch = inputs.ch.ok_or(FractionError::InsufficientInput)?;
            let (tb, sg) = solve_m_partner(m, "m_ch", |tb| pf_props::sg_from_ch(tb, ch))?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::V100Refractive => {
            let v100 = inputs.v100.ok_or(FractionError::InsufficientInput)?;
            let i = inputs.resolved_i().ok_or(FractionError::InsufficientInput)?;
            let (tb, sg) = solve_v100_refractive(v100, i)?;
            Ok(plain(tb, sg))
        }
        DefinitionMode::CarbonNumber => {
            let nc = inputs.nc.ok_or(FractionError::InsufficientInput)?;
            info!(nc, "carbon-number definition: least accurate route");
            let preset = pf_props::ahmed(nc)?;
            let tb = preset.tb.ok_or(FractionError::MissingDependency {
                what: "carbon-number route lacks Tb",
            })?;
            let sg = preset.sg.ok_or(FractionError::MissingDependency {
                what: "carbon-number route lacks SG",
            })?;
            Ok(Base {
                tb,
                sg,
                preset,
                d86: None,
            })
        }
        DefinitionMode::Curve => {
            let curve = inputs
                .curve
                .as_ref()
                .ok_or(FractionError::InsufficientInput)?;
            let sg = inputs.resolved_sg().ok_or(FractionError::InsufficientInput)?;
            let d86 = to_d86(curve, config)?;
            let avg = boiling_averages(&d86)?;
            Ok(Base {
                tb: avg.meabp,
                sg,
                preset: PropertySet::default(),
                d86: Some(d86),
            })
        }
    }
}

// Damped fixed point on Tb: partner property fixes SG(Tb), the generalized
// table maps (M, SG) back to Tb.
fn solve_m_partner<F>(m: f64, method: &'static str, sg_of_tb: F) -> FractionResult<(Temperature, f64)>
where
    F: Fn(Temperature) -> Result<f64, pf_props::PropsError>,
{
    let mut tb_k: f64 = 450.0;
    for _ in 0..60 {
        let sg = sg_of_tb(kelvin(tb_k))?;
        let set = pf_props::riazi_daubert(RiaziInput::M(m), RiaziInput::Sg(sg))?;
        let tb_new = k_of(set.tb.ok_or(FractionError::MissingDependency {
            what: "generalized table row lacks Tb",
        })?);
        if (tb_new - tb_k).abs() < 1e-6 {
            return Ok((kelvin(tb_new), sg_of_tb(kelvin(tb_new))?));
        }
        tb_k += 0.5 * (tb_new - tb_k);
    }
    Err(FractionError::ResolutionFailed { method })
}

// Bisection on Tb: refractive data fixes SG(Tb); Abbott predicts v100 from
// (Kw, API); match the measured v100.
fn solve_v100_refractive(v100: f64, i: f64) -> FractionResult<(Temperature, f64)> {
    let residual = |tb_k: f64| -> FractionResult<f64> {
        let tb = kelvin(tb_k);
        let sg = pf_props::sg_from_huang_i(tb, i)?;
        let predicted = pf_props::v100_abbott(watson_k(tb, sg), api_from_sg(sg))?;
        Ok(predicted - v100)
    };

    // Walk the endpoints inward past the Abbott validity box before
    // demanding a sign change.
    let (mut lo, mut hi) = (320.0, 660.0);
    let f_lo = loop {
        match residual(lo) {
            Ok(v) => break v,
            Err(_) if lo + 10.0 < hi => lo += 10.0,
            Err(err) => return Err(err),
        }
    };
    let f_hi = loop {
        match residual(hi) {
            Ok(v) => break v,
            Err(_) if hi - 10.0 > lo => hi -= 10.0,
            Err(err) => return Err(err),
        }
    };
    if f_lo * f_hi > 0.0 {
        return Err(FractionError::ResolutionFailed {
            method: "v100_refractive",
        });
    }
    for _ in 0..100 {
        let mid = 0.5 * (lo + hi);
        let f_mid = residual(mid)?;
        if f_mid.abs() < 1e-9 || hi - lo < 1e-9 {
            let tb = kelvin(mid);
            let sg = pf_props::sg_from_huang_i(tb, i)?;
            return Ok((tb, sg));
        }
        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Err(FractionError::ResolutionFailed {
        method: "v100_refractive",
    })
}

// Normalize whatever assay was supplied down to a D86 curve.
fn to_d86(curve: &DistillationCurve, config: &Config) -> FractionResult<DistillationCurve> {
    match curve.kind() {
        CurveKind::D86 => Ok(curve.clone()),
        CurveKind::Tbp => match config.d86_tbp {
            D86TbpMethod::Riazi => Ok(convert::tbp_to_d86_riazi(curve)?),
            D86TbpMethod::Daubert => Ok(convert::tbp_to_d86_daubert(curve)?),
        },
        CurveKind::Sd => Ok(convert::sd_to_d86_riazi(curve)?),
        CurveKind::Efv => Err(FractionError::InvalidArg {
            what: "no published EFV reverse transform; supply D86, TBP, SD or D1160",
        }),
        CurveKind::D1160(p) => {
            // To TBP at 10 mmHg, pressure-correct each point to the normal
            // boiling equivalent, then back down to D86.
            let tbp_vac = convert::d1160_to_tbp_10mmhg(curve)?;
            let mut temps = Vec::with_capacity(tbp_vac.len());
            for &t in tbp_vac.temperatures() {
                temps.push(normal_boiling_point(t, p, 12.0)?);
            }
            let tbp = DistillationCurve::new(
                CurveKind::Tbp,
                tbp_vac.fractions().to_vec(),
                temps,
            )?;
            match config.d86_tbp {
                D86TbpMethod::Riazi => Ok(convert::tbp_to_d86_riazi(&tbp)?),
                D86TbpMethod::Daubert => Ok(convert::tbp_to_d86_daubert(&tbp)?),
            }
        }
    }
}
