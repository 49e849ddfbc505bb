//! Sparse measurement set and definition-mode classification.

use pf_core::units::{api_from_sg, rankine, sg_from_api, Temperature};
use pf_distill::DistillationCurve;

/// Everything a caller may know about a fraction. All optional; the
/// dispatcher classifies whichever subset is present into a definition mode.
#[derive(Debug, Clone, Default)]
pub struct FractionInputs {
    /// Molecular weight [g/mol]
    pub m: Option<f64>,
    /// Normal boiling point
    pub tb: Option<Temperature>,
    /// Specific gravity 60°F/60°F
    pub sg: Option<f64>,
    /// API gravity (alternative to SG)
    pub api: Option<f64>,
    /// Watson characterization factor (usable with Tb in place of SG)
    pub kw: Option<f64>,
    /// Carbon/hydrogen weight ratio
    pub ch: Option<f64>,
    /// Refractive index at 20°C
    pub n: Option<f64>,
    /// Huang characterization parameter (alternative to n)
    pub i: Option<f64>,
    /// Carbon number
    pub nc: Option<f64>,
    /// Kinematic viscosity at 100°F [cSt]
    pub v100: Option<f64>,
    /// Kinematic viscosity at 210°F [cSt]
    pub v210: Option<f64>,
    /// Sulfur content [weight fraction]
    pub sulfur: Option<f64>,
    /// Nitrogen content [weight fraction]
    pub nitrogen: Option<f64>,
    /// Distillation assay; requires `sg` (or `api`) alongside.
    pub curve: Option<DistillationCurve>,
}

/// The nine recognized input combinations, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionMode {
    /// Tb plus SG (directly, via API, or via Kw+Tb)
    TbSg,
    /// M plus SG
    MSg,
    /// Tb plus refractive data (n or I)
    TbRefractive,
    /// M plus refractive data
    MRefractive,
    /// Tb plus C/H ratio
    TbCh,
    /// M plus C/H ratio
    MCh,
    /// v100 plus refractive data
    V100Refractive,
    /// Carbon number alone; least accurate route
    CarbonNumber,
    /// A distillation curve (with SG)
    Curve,
}

impl FractionInputs {
    /// Specific gravity however it was expressed.
    pub fn resolved_sg(&self) -> Option<f64> {
        self.sg.or_else(|| self.api.map(sg_from_api))
    }

    /// Boiling point, directly or through Kw + SG.
    pub fn resolved_tb(&self) -> Option<Temperature> {
        self.tb.or_else(|| {
            let (kw, sg) = (self.kw?, self.resolved_sg()?);
            Some(rankine((kw * sg).powi(3)))
        })
    }

    /// Huang parameter, directly or from the refractive index.
    pub fn resolved_i(&self) -> Option<f64> {
        self.i.or_else(|| {
            let n = self.n?;
            pf_props::i_from_n(n).ok()
        })
    }

    /// First matching definition mode, in the documented priority order.
    pub fn classify(&self) -> Option<DefinitionMode> {
        let has_sg = self.resolved_sg().is_some();
        let has_tb = self.resolved_tb().is_some();
        let has_i = self.resolved_i().is_some();

        if has_tb && has_sg {
            Some(DefinitionMode::TbSg)
        } else if self.m.is_some() && has_sg {
            Some(DefinitionMode::MSg)
        } else if has_tb && has_i {
            Some(DefinitionMode::TbRefractive)
        } else if self.m.is_some() && has_i {
            Some(DefinitionMode::MRefractive)
        } else if has_tb && self.ch.is_some() {
            Some(DefinitionMode::TbCh)
        } else if self.m.is_some() && self.ch.is_some() {
            Some(DefinitionMode::MCh)
        } else if self.v100.is_some() && has_i {
            Some(DefinitionMode::V100Refractive)
        } else if self.nc.is_some() {
            Some(DefinitionMode::CarbonNumber)
        } else if self.curve.is_some() && has_sg {
            Some(DefinitionMode::Curve)
        } else {
            None
        }
    }

    /// API gravity however it was expressed.
    pub fn resolved_api(&self) -> Option<f64> {
        self.api.or_else(|| self.sg.map(api_from_sg))
    }
}
