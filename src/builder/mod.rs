//! Aggregated state for a single draw.
//!
//! A [`PipelineBuilder`] collects the render target, clip, stencil, face culling, state flags,
//! the color and coverage fragment-stage chains, and the transfer factory. It also memoizes the
//! invariant analysis of each chain so blend decisions can be queried repeatedly.
//!
//! # Stage chains
//! The input to the first color stage is the draw's color (constant or per-vertex); the output of
//! the last one is the source color handed to the transfer processor. The coverage chain works
//! the same way but its final output is fractional pixel coverage. Outside of
//! [`ScopedEffectGuard`] rollback, chains only grow.
//!
//! # Threading
//! Builders, and the `Rc` handles they share, belong to one thread. Nothing here locks.

pub mod guard;
pub mod state;

use std::cell::OnceCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::analysis::{AnalysisSeed, InvariantCache, ProcOptInfo, SeedSource};
use crate::clip::{ClipDescriptor, RegionOp};
use crate::foundation::core::{Affine, Color};
use crate::paint::Paint;
use crate::processor::{FragmentProcessor, FragmentStage, SimpleTextureEffect, TextureParams};
use crate::stencil::StencilSettings;
use crate::target::{RenderTarget, Texture};
use crate::xfer::{
    Caps, CoverageSetOpXPFactory, DisableColorXPFactory, PorterDuffXPFactory, XPFactory,
    xp_factory_for_mode,
};

pub use guard::{ScopedEffectGuard, ScopedStencilGuard};
pub use state::{DrawFace, StateBits};

type FragmentStageArray = SmallVec<[FragmentStage; 4]>;

#[derive(Debug)]
pub struct PipelineBuilder {
    render_target: Option<Rc<RenderTarget>>,
    flags: StateBits,
    stencil: StencilSettings,
    draw_face: DrawFace,
    xp_factory: OnceCell<Rc<dyn XPFactory>>,
    color_stages: FragmentStageArray,
    coverage_stages: FragmentStageArray,
    clip: ClipDescriptor,
    color: Color,

    color_cache: InvariantCache,
    coverage_cache: InvariantCache,

    // Guards assume stages are only appended while they are bound.
    #[cfg(debug_assertions)]
    effect_guard_depth: usize,
    #[cfg(debug_assertions)]
    stencil_guard_depth: usize,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// No stages, stencil disabled, both faces drawn, flags clear, wide-open clip.
    pub fn new() -> Self {
        Self {
            render_target: None,
            flags: StateBits::empty(),
            stencil: StencilSettings::disabled(),
            draw_face: DrawFace::Both,
            xp_factory: OnceCell::new(),
            color_stages: FragmentStageArray::new(),
            coverage_stages: FragmentStageArray::new(),
            clip: ClipDescriptor::WideOpen,
            color: Color::WHITE,
            color_cache: InvariantCache::new(),
            coverage_cache: InvariantCache::new(),
            #[cfg(debug_assertions)]
            effect_guard_depth: 0,
            #[cfg(debug_assertions)]
            stencil_guard_depth: 0,
        }
    }

    /// Initializes the builder from a paint, render target and clip.
    ///
    /// Stages are replaced by what the paint describes, the transfer factory by the paint's blend
    /// mode, and face culling and flags reset before the paint's dither / antialias hints are
    /// applied. Stencil settings are left as they were.
    pub fn set_from_paint(
        &mut self,
        paint: &Paint,
        render_target: Option<Rc<RenderTarget>>,
        clip: &ClipDescriptor,
    ) {
        self.assert_no_effect_guard("set_from_paint");

        self.color_stages.clear();
        self.coverage_stages.clear();
        self.color_cache.invalidate();
        self.coverage_cache.invalidate();

        self.color = paint.premul_color();
        if let Some(shader) = &paint.shader {
            match shader.as_fragment_processor(self.color) {
                Some(fp) => {
                    self.add_color_processor(fp);
                }
                None => tracing::debug!(?shader, "paint shader produced no fragment processor"),
            }
        }

        self.xp_factory = OnceCell::from(xp_factory_for_mode(paint.blend_mode));
        self.render_target = render_target;
        self.clip = clip.clone();

        self.draw_face = DrawFace::Both;
        self.flags = StateBits::empty();
        self.set_state(StateBits::DITHER, paint.dither);
        self.set_state(StateBits::HW_ANTIALIAS, paint.anti_alias);

        tracing::debug!(
            blend_mode = ?paint.blend_mode,
            color_stages = self.color_stages.len(),
            has_target = self.render_target.is_some(),
            "pipeline builder initialized from paint"
        );
    }

    /// Premultiplied source color recorded by the last [`PipelineBuilder::set_from_paint`].
    pub fn color(&self) -> Color {
        self.color
    }

    // ---------------------------------------------------------------------------------------
    // Stages

    pub fn num_color_stages(&self) -> usize {
        self.color_stages.len()
    }

    pub fn num_coverage_stages(&self) -> usize {
        self.coverage_stages.len()
    }

    pub fn num_fragment_stages(&self) -> usize {
        self.num_color_stages() + self.num_coverage_stages()
    }

    pub fn color_stage(&self, idx: usize) -> &FragmentStage {
        &self.color_stages[idx]
    }

    pub fn coverage_stage(&self, idx: usize) -> &FragmentStage {
        &self.coverage_stages[idx]
    }

    pub fn color_stages(&self) -> &[FragmentStage] {
        &self.color_stages
    }

    pub fn coverage_stages(&self) -> &[FragmentStage] {
        &self.coverage_stages
    }

    /// Appends to the color chain. The caller keeps its own reference.
    pub fn add_color_processor(
        &mut self,
        processor: Rc<dyn FragmentProcessor>,
    ) -> Rc<dyn FragmentProcessor> {
        self.color_stages.push(FragmentStage::new(Rc::clone(&processor)));
        self.color_cache.invalidate();
        processor
    }

    /// Appends to the coverage chain. The caller keeps its own reference.
    pub fn add_coverage_processor(
        &mut self,
        processor: Rc<dyn FragmentProcessor>,
    ) -> Rc<dyn FragmentProcessor> {
        self.coverage_stages.push(FragmentStage::new(Rc::clone(&processor)));
        self.coverage_cache.invalidate();
        processor
    }

    /// Samples `texture` at local coordinates mapped through `matrix`.
    pub fn add_color_texture_processor(&mut self, texture: Rc<Texture>, matrix: Affine) {
        self.add_color_processor(SimpleTextureEffect::new(texture, matrix));
    }

    pub fn add_color_texture_processor_with_params(
        &mut self,
        texture: Rc<Texture>,
        matrix: Affine,
        params: TextureParams,
    ) {
        self.add_color_processor(SimpleTextureEffect::with_params(texture, matrix, params));
    }

    pub fn add_coverage_texture_processor(&mut self, texture: Rc<Texture>, matrix: Affine) {
        self.add_coverage_processor(SimpleTextureEffect::new(texture, matrix));
    }

    pub fn add_coverage_texture_processor_with_params(
        &mut self,
        texture: Rc<Texture>,
        matrix: Affine,
        params: TextureParams,
    ) {
        self.add_coverage_processor(SimpleTextureEffect::with_params(texture, matrix, params));
    }

    // ---------------------------------------------------------------------------------------
    // Transfer factory

    /// The installed transfer factory, materializing the src-over default on first use.
    pub fn xp_factory(&self) -> &Rc<dyn XPFactory> {
        self.xp_factory.get_or_init(|| {
            tracing::trace!("materializing default src-over xp factory");
            let default: Rc<dyn XPFactory> = PorterDuffXPFactory::src_over();
            default
        })
    }

    pub fn set_xp_factory(&mut self, factory: Rc<dyn XPFactory>) -> Rc<dyn XPFactory> {
        tracing::debug!(factory = factory.name(), "installing xp factory");
        self.xp_factory = OnceCell::from(Rc::clone(&factory));
        factory
    }

    /// Installs a factory that writes coverage combined with dst by `op`.
    pub fn set_coverage_set_op_xp_factory(&mut self, op: RegionOp, invert_coverage: bool) {
        self.set_xp_factory(CoverageSetOpXPFactory::new(op, invert_coverage));
    }

    /// Installs a factory that disables color writes.
    pub fn set_disable_color_xp_factory(&mut self) {
        self.set_xp_factory(DisableColorXPFactory::new());
    }

    // ---------------------------------------------------------------------------------------
    // Blending

    /// Whether the backend must copy destination pixels before drawing. Pure: `color` and
    /// `coverage` must already be resolved by the caller.
    pub fn will_xp_need_dst_copy(
        &self,
        caps: &Caps,
        color: &ProcOptInfo,
        coverage: &ProcOptInfo,
    ) -> bool {
        self.xp_factory().will_need_dst_copy(caps, color, coverage)
    }

    /// Whether multiplying the color by fractional coverage before the blend gives the same
    /// result as applying coverage after it. In general it does not.
    pub fn can_tweak_alpha_for_coverage(&self) -> bool {
        self.xp_factory().can_tweak_alpha_for_coverage()
    }

    /// Whether destination pixels will be read for blending when drawing `source`.
    pub fn will_blend_with_dst(&mut self, source: &dyn SeedSource) -> bool {
        let factory = Rc::clone(self.xp_factory());
        let color = self
            .color_cache
            .get_or_compute(&self.color_stages, source.color_seed());
        let coverage = self
            .coverage_cache
            .get_or_compute(&self.coverage_stages, source.coverage_seed());
        factory.will_blend_with_dst(color, coverage)
    }

    // ---------------------------------------------------------------------------------------
    // Invariant analysis

    /// Analysis of the color chain seeded by `seed`, reusing the cached result when the chain is
    /// unchanged and the seed matches.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn calc_color_invariant_output(&mut self, seed: AnalysisSeed) -> &ProcOptInfo {
        self.color_cache.get_or_compute(&self.color_stages, seed)
    }

    /// Coverage-chain counterpart of [`PipelineBuilder::calc_color_invariant_output`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn calc_coverage_invariant_output(&mut self, seed: AnalysisSeed) -> &ProcOptInfo {
        self.coverage_cache.get_or_compute(&self.coverage_stages, seed)
    }

    /// Color analysis seeded by a batch or primitive that has not resolved a literal color.
    pub fn calc_color_invariant_output_for(&mut self, source: &dyn SeedSource) -> &ProcOptInfo {
        self.calc_color_invariant_output(source.color_seed())
    }

    pub fn calc_coverage_invariant_output_for(
        &mut self,
        source: &dyn SeedSource,
    ) -> &ProcOptInfo {
        self.calc_coverage_invariant_output(source.coverage_seed())
    }

    /// Last computed color analysis, if still valid for the current chain.
    pub fn cached_color_proc_info(&self) -> Option<&ProcOptInfo> {
        self.color_cache.result()
    }

    pub fn cached_coverage_proc_info(&self) -> Option<&ProcOptInfo> {
        self.coverage_cache.result()
    }

    pub fn color_cache(&self) -> &InvariantCache {
        &self.color_cache
    }

    pub fn coverage_cache(&self) -> &InvariantCache {
        &self.coverage_cache
    }

    // ---------------------------------------------------------------------------------------
    // Render target

    pub fn render_target(&self) -> Option<&Rc<RenderTarget>> {
        self.render_target.as_ref()
    }

    pub fn set_render_target(&mut self, target: Option<Rc<RenderTarget>>) {
        self.render_target = target;
    }

    // ---------------------------------------------------------------------------------------
    // Stencil

    pub fn stencil(&self) -> &StencilSettings {
        &self.stencil
    }

    /// Changing the clip may zero the client stencil bits, so multipass stencil algorithms must
    /// keep the clip fixed between passes.
    pub fn set_stencil(&mut self, settings: StencilSettings) {
        self.stencil = settings;
    }

    pub fn disable_stencil(&mut self) {
        self.stencil.set_disabled();
    }

    pub fn stencil_mut(&mut self) -> &mut StencilSettings {
        &mut self.stencil
    }

    // ---------------------------------------------------------------------------------------
    // State flags

    pub fn flags(&self) -> StateBits {
        self.flags
    }

    pub fn is_dither(&self) -> bool {
        self.flags.contains(StateBits::DITHER)
    }

    pub fn is_hw_antialias(&self) -> bool {
        self.flags.contains(StateBits::HW_ANTIALIAS)
    }

    pub fn enable_state(&mut self, bits: StateBits) {
        self.flags.insert(bits);
    }

    pub fn disable_state(&mut self, bits: StateBits) {
        self.flags.remove(bits);
    }

    pub fn set_state(&mut self, bits: StateBits, enable: bool) {
        if enable {
            self.enable_state(bits);
        } else {
            self.disable_state(bits);
        }
    }

    // ---------------------------------------------------------------------------------------
    // Face culling

    pub fn draw_face(&self) -> DrawFace {
        self.draw_face
    }

    /// # Panics
    /// If `face` is [`DrawFace::Invalid`].
    pub fn set_draw_face(&mut self, face: DrawFace) {
        assert!(face != DrawFace::Invalid, "DrawFace::Invalid is not a drawable face");
        self.draw_face = face;
    }

    // ---------------------------------------------------------------------------------------
    // Clip

    pub fn clip(&self) -> &ClipDescriptor {
        &self.clip
    }

    pub fn set_clip(&mut self, clip: ClipDescriptor) {
        self.clip = clip;
    }

    // ---------------------------------------------------------------------------------------

    /// Copies `other` into `self`. The render target and transfer factory are shared; everything
    /// else is copied. Analysis caches start out invalid.
    pub fn assign_from(&mut self, other: &PipelineBuilder) {
        self.assert_no_effect_guard("assign_from");
        self.render_target = other.render_target.clone();
        self.flags = other.flags;
        self.stencil = other.stencil;
        self.draw_face = other.draw_face;
        self.xp_factory = OnceCell::from(Rc::clone(other.xp_factory()));
        self.color_stages = other.color_stages.clone();
        self.coverage_stages = other.coverage_stages.clone();
        self.clip = other.clip.clone();
        self.color = other.color;
        self.color_cache.invalidate();
        self.coverage_cache.invalidate();
    }

    pub(crate) fn begin_effect_scope(&mut self) -> (usize, usize) {
        #[cfg(debug_assertions)]
        {
            self.effect_guard_depth += 1;
        }
        (self.color_stages.len(), self.coverage_stages.len())
    }

    /// Drops every stage appended since the matching [`Self::begin_effect_scope`].
    pub(crate) fn end_effect_scope(&mut self, color_count: usize, coverage_count: usize) {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.effect_guard_depth > 0,
                "effect guard released without a matching bind"
            );
            self.effect_guard_depth -= 1;
        }
        debug_assert!(
            self.color_stages.len() >= color_count,
            "color stages were removed while an effect guard was bound"
        );
        debug_assert!(
            self.coverage_stages.len() >= coverage_count,
            "coverage stages were removed while an effect guard was bound"
        );

        if self.color_stages.len() > color_count {
            self.color_stages.truncate(color_count);
            self.color_cache.invalidate();
        }
        if self.coverage_stages.len() > coverage_count {
            self.coverage_stages.truncate(coverage_count);
            self.coverage_cache.invalidate();
        }
        tracing::trace!(color_count, coverage_count, "effect scope released");
    }

    pub(crate) fn begin_stencil_scope(&mut self) -> StencilSettings {
        #[cfg(debug_assertions)]
        {
            self.stencil_guard_depth += 1;
        }
        self.stencil
    }

    pub(crate) fn end_stencil_scope(&mut self, saved: StencilSettings) {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.stencil_guard_depth > 0,
                "stencil guard released without a matching bind"
            );
            self.stencil_guard_depth -= 1;
        }
        self.stencil = saved;
    }

    #[cfg(all(test, debug_assertions))]
    pub(crate) fn effect_guard_depth(&self) -> usize {
        self.effect_guard_depth
    }

    fn assert_no_effect_guard(&self, _op: &str) {
        #[cfg(debug_assertions)]
        assert_eq!(
            self.effect_guard_depth, 0,
            "{_op} would remove stages while an effect guard is bound"
        );
    }
}

impl Clone for PipelineBuilder {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        out.assign_from(self);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builder/pipeline.rs"]
mod tests;
