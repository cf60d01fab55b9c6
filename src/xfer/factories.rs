use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{BlendCoeff, BlendEquation, BlendFormula, BlendMode, Caps, XPFactory, XferProcessor};
use crate::analysis::ProcOptInfo;
use crate::clip::RegionOp;

thread_local! {
    static PORTER_DUFF_FACTORIES: RefCell<HashMap<BlendMode, Rc<PorterDuffXPFactory>>> =
        RefCell::new(HashMap::new());
}

/// Picks the factory that implements a paint blend mode.
pub fn xp_factory_for_mode(mode: BlendMode) -> Rc<dyn XPFactory> {
    if let Some(porter_duff) = PorterDuffXPFactory::create(mode) {
        return porter_duff;
    }
    Rc::new(CustomXPFactory { mode })
}

/// Fixed-function Porter-Duff blending.
#[derive(Debug, PartialEq, Eq)]
pub struct PorterDuffXPFactory {
    mode: BlendMode,
    src_coeff: BlendCoeff,
    dst_coeff: BlendCoeff,
}

impl PorterDuffXPFactory {
    /// Shared factory for `mode`; the same `Rc` is returned for every call on a thread.
    /// `None` for modes without a coefficient form.
    pub fn create(mode: BlendMode) -> Option<Rc<Self>> {
        let (src_coeff, dst_coeff) = mode.coefficients()?;
        Some(Self::shared(mode, src_coeff, dst_coeff))
    }

    /// The factory used when nothing else was installed.
    pub fn src_over() -> Rc<Self> {
        Self::shared(BlendMode::SrcOver, BlendCoeff::One, BlendCoeff::InvSrcAlpha)
    }

    fn shared(mode: BlendMode, src_coeff: BlendCoeff, dst_coeff: BlendCoeff) -> Rc<Self> {
        PORTER_DUFF_FACTORIES.with(|cache| {
            cache
                .borrow_mut()
                .entry(mode)
                .or_insert_with(|| {
                    Rc::new(Self {
                        mode,
                        src_coeff,
                        dst_coeff,
                    })
                })
                .clone()
        })
    }

    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    pub fn coefficients(&self) -> (BlendCoeff, BlendCoeff) {
        (self.src_coeff, self.dst_coeff)
    }

    /// Four-channel coverage needs a per-channel dst coefficient. Dual-source blending provides
    /// one; a known constant color under src-over can use the blend constant instead.
    fn lcd_needs_dst_read(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> bool {
        if self.mode == BlendMode::Dst || !coverage.is_four_channel_output() {
            return false;
        }
        if caps.dual_source_blending {
            return false;
        }
        !(self.mode == BlendMode::SrcOver && color.is_constant())
    }

    fn formula(&self, caps: &Caps, coverage: &ProcOptInfo) -> BlendFormula {
        if coverage.is_four_channel_output() && caps.dual_source_blending {
            // Secondary output carries coverage * src alpha per channel.
            return BlendFormula::add(self.src_coeff, BlendCoeff::InvSrc2Color);
        }
        BlendFormula::add(self.src_coeff, self.dst_coeff)
    }
}

impl XPFactory for PorterDuffXPFactory {
    fn name(&self) -> &'static str {
        "porter_duff"
    }

    fn blend_mode(&self) -> Option<BlendMode> {
        Some(self.mode)
    }

    fn will_read_dst_color(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> bool {
        self.lcd_needs_dst_read(caps, color, coverage)
    }

    fn can_tweak_alpha_for_coverage(&self) -> bool {
        matches!(
            self.dst_coeff,
            BlendCoeff::One | BlendCoeff::InvSrcAlpha | BlendCoeff::InvSrcColor
        )
    }

    fn will_blend_with_dst(&self, color: &ProcOptInfo, coverage: &ProcOptInfo) -> bool {
        if !coverage.is_solid_white() || self.src_coeff.references_dst() {
            return true;
        }
        match self.dst_coeff {
            BlendCoeff::Zero => false,
            BlendCoeff::InvSrcAlpha => !color.is_opaque(),
            BlendCoeff::SrcAlpha => !color.output().has_zero_alpha(),
            _ => true,
        }
    }

    fn create_xfer_processor(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> Option<XferProcessor> {
        let reads_dst = self.will_read_dst_color(caps, color, coverage);
        let formula = if reads_dst {
            BlendFormula::REPLACE
        } else {
            self.formula(caps, coverage)
        };
        Some(XferProcessor {
            formula,
            reads_dst,
            needs_dst_copy: self.will_need_dst_copy(caps, color, coverage),
            writes_color: true,
            invert_coverage: false,
        })
    }
}

/// Advanced (non Porter-Duff) blend modes.
#[derive(Debug, PartialEq, Eq)]
pub struct CustomXPFactory {
    mode: BlendMode,
}

impl CustomXPFactory {
    /// `None` for modes that have a fixed-function form; use [`PorterDuffXPFactory`] for those.
    pub fn new(mode: BlendMode) -> Option<Rc<Self>> {
        (!mode.is_coeff_mode()).then(|| Rc::new(Self { mode }))
    }

    fn uses_hw_equation(&self, caps: &Caps, coverage: &ProcOptInfo) -> bool {
        caps.supports_equation(self.mode) && !coverage.is_four_channel_output()
    }
}

impl XPFactory for CustomXPFactory {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn blend_mode(&self) -> Option<BlendMode> {
        Some(self.mode)
    }

    fn will_read_dst_color(
        &self,
        caps: &Caps,
        _color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> bool {
        !self.uses_hw_equation(caps, coverage)
    }

    fn can_tweak_alpha_for_coverage(&self) -> bool {
        false
    }

    fn will_blend_with_dst(&self, _color: &ProcOptInfo, _coverage: &ProcOptInfo) -> bool {
        true
    }

    fn create_xfer_processor(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> Option<XferProcessor> {
        let formula = if self.uses_hw_equation(caps, coverage) {
            BlendFormula {
                equation: BlendEquation::Advanced(self.mode),
                src_coeff: BlendCoeff::One,
                dst_coeff: BlendCoeff::Zero,
            }
        } else {
            BlendFormula::REPLACE
        };
        Some(XferProcessor {
            formula,
            reads_dst: self.will_read_dst_color(caps, color, coverage),
            needs_dst_copy: self.will_need_dst_copy(caps, color, coverage),
            writes_color: true,
            invert_coverage: false,
        })
    }
}

/// Writes coverage into the destination combined by a region operator; used for clip masks.
#[derive(Debug, PartialEq, Eq)]
pub struct CoverageSetOpXPFactory {
    op: RegionOp,
    invert_coverage: bool,
}

impl CoverageSetOpXPFactory {
    pub fn new(op: RegionOp, invert_coverage: bool) -> Rc<Self> {
        Rc::new(Self {
            op,
            invert_coverage,
        })
    }

    pub fn op(&self) -> RegionOp {
        self.op
    }

    pub fn invert_coverage(&self) -> bool {
        self.invert_coverage
    }

    fn formula(&self) -> BlendFormula {
        use BlendCoeff::*;
        match self.op {
            RegionOp::Replace => BlendFormula::add(One, Zero),
            RegionOp::Intersect => BlendFormula::add(DstColor, Zero),
            RegionOp::Union => BlendFormula::add(One, InvSrcColor),
            RegionOp::Xor => BlendFormula::add(InvDstColor, InvSrcColor),
            RegionOp::Difference => BlendFormula::add(Zero, InvSrcColor),
            RegionOp::ReverseDifference => BlendFormula::add(InvDstColor, Zero),
        }
    }
}

impl XPFactory for CoverageSetOpXPFactory {
    fn name(&self) -> &'static str {
        "coverage_set_op"
    }

    fn will_read_dst_color(
        &self,
        _caps: &Caps,
        _color: &ProcOptInfo,
        _coverage: &ProcOptInfo,
    ) -> bool {
        false
    }

    fn can_tweak_alpha_for_coverage(&self) -> bool {
        false
    }

    fn will_blend_with_dst(&self, _color: &ProcOptInfo, _coverage: &ProcOptInfo) -> bool {
        self.op != RegionOp::Replace
    }

    fn create_xfer_processor(
        &self,
        _caps: &Caps,
        _color: &ProcOptInfo,
        _coverage: &ProcOptInfo,
    ) -> Option<XferProcessor> {
        Some(XferProcessor {
            formula: self.formula(),
            reads_dst: false,
            needs_dst_copy: false,
            writes_color: true,
            invert_coverage: self.invert_coverage,
        })
    }
}

/// Disables color writes entirely; used for stencil-only passes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DisableColorXPFactory;

impl DisableColorXPFactory {
    pub fn new() -> Rc<Self> {
        Rc::new(Self)
    }
}

impl XPFactory for DisableColorXPFactory {
    fn name(&self) -> &'static str {
        "disable_color"
    }

    fn will_read_dst_color(
        &self,
        _caps: &Caps,
        _color: &ProcOptInfo,
        _coverage: &ProcOptInfo,
    ) -> bool {
        false
    }

    fn can_tweak_alpha_for_coverage(&self) -> bool {
        true
    }

    fn will_blend_with_dst(&self, _color: &ProcOptInfo, _coverage: &ProcOptInfo) -> bool {
        false
    }

    fn create_xfer_processor(
        &self,
        _caps: &Caps,
        _color: &ProcOptInfo,
        _coverage: &ProcOptInfo,
    ) -> Option<XferProcessor> {
        Some(XferProcessor {
            formula: BlendFormula::NO_OP,
            reads_dst: false,
            needs_dst_copy: false,
            writes_color: false,
            invert_coverage: false,
        })
    }
}
