//! Transfer ("xfer") processors: how the color chain's output is written into the destination.
//!
//! A builder only holds an [`XPFactory`]. The backend asks the factory for a concrete
//! [`XferProcessor`] once the color and coverage analyses are resolved.

pub mod blend;
pub mod factories;

use std::fmt;

use crate::analysis::ProcOptInfo;
use crate::foundation::error::DrawStateResult;

pub use blend::{BlendCoeff, BlendEquation, BlendFormula, BlendMode};
pub use factories::{
    CoverageSetOpXPFactory, CustomXPFactory, DisableColorXPFactory, PorterDuffXPFactory,
    xp_factory_for_mode,
};

/// Device capabilities consulted when choosing a blend strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Caps {
    /// Fixed-function blending can take a second shader output as a coefficient.
    pub dual_source_blending: bool,
    /// Shaders can read the destination pixel directly (framebuffer fetch).
    pub dst_read_in_shader: bool,
    /// Hardware supports the separable advanced blend equations (multiply, screen-like modes).
    pub advanced_blend_equations: bool,
    /// Hardware also supports the non-separable equations (hue, saturation, color, luminosity).
    pub non_separable_blend_equations: bool,
}

impl Caps {
    /// Whether `mode` can run as a hardware blend equation on this device.
    pub fn supports_equation(&self, mode: BlendMode) -> bool {
        self.advanced_blend_equations && (mode.is_separable() || self.non_separable_blend_equations)
    }

    /// Parses a JSON capability profile; missing keys default to `false`.
    pub fn from_json(text: &str) -> DrawStateResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Frozen transfer state produced by an [`XPFactory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XferProcessor {
    pub formula: BlendFormula,
    /// The fragment shader reads the destination (directly or from a copy).
    pub reads_dst: bool,
    /// The backend must copy destination pixels before the draw.
    pub needs_dst_copy: bool,
    pub writes_color: bool,
    pub invert_coverage: bool,
}

/// Produces the function that combines the color chain's output with the destination.
pub trait XPFactory: fmt::Debug {
    fn name(&self) -> &'static str;

    /// The paint blend mode this factory implements, if it implements one.
    fn blend_mode(&self) -> Option<BlendMode> {
        None
    }

    /// Whether the blend has to read the destination in the shader for these inputs.
    fn will_read_dst_color(&self, caps: &Caps, color: &ProcOptInfo, coverage: &ProcOptInfo)
    -> bool;

    /// Whether a backend has to copy destination pixels before the draw.
    fn will_need_dst_copy(&self, caps: &Caps, color: &ProcOptInfo, coverage: &ProcOptInfo) -> bool {
        self.will_read_dst_color(caps, color, coverage) && !caps.dst_read_in_shader
    }

    /// Whether folding coverage into the color's alpha before blending gives the same result as
    /// applying it after.
    fn can_tweak_alpha_for_coverage(&self) -> bool;

    /// Whether the final written color depends on the current destination color.
    fn will_blend_with_dst(&self, color: &ProcOptInfo, coverage: &ProcOptInfo) -> bool;

    /// Builds the frozen transfer state, or `None` when this factory cannot serve the inputs.
    fn create_xfer_processor(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> Option<XferProcessor>;
}

#[cfg(test)]
#[path = "../../tests/unit/xfer/factories.rs"]
mod tests;
