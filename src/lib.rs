//! drawstate assembles the render state of a single GPU draw.
//!
//! A [`PipelineBuilder`] sits between a "what to draw" description (a [`Paint`] plus geometry)
//! and a hardware backend. It accumulates the render target, the [`ClipDescriptor`], stencil and
//! face-culling state, the color and coverage [`FragmentStage`] chains, and the transfer
//! ([`XPFactory`]) that blends the result into the destination.
//!
//! # Flow
//!
//! 1. **Configure**: [`PipelineBuilder::set_from_paint`] or individual setters.
//! 2. **Scope**: wrap temporary stages in a [`ScopedEffectGuard`] and temporary stencil changes
//!    in a [`ScopedStencilGuard`]; both restore on drop.
//! 3. **Query**: [`PipelineBuilder::calc_color_invariant_output`] and friends memoize what each
//!    chain is statically known to produce; [`PipelineBuilder::will_xp_need_dst_copy`] and
//!    [`PipelineBuilder::can_tweak_alpha_for_coverage`] answer blend questions from those results.
//! 4. **Freeze**: the backend reads the accumulated state and asks the factory for an
//!    [`XferProcessor`].
//!
//! Everything here is single-threaded: shared resources are `Rc`, and contract violations
//! (wrong clip variant access, the invalid draw face, crossed guard scopes) panic.
#![forbid(unsafe_code)]

mod foundation;

pub mod analysis;
pub mod builder;
pub mod clip;
pub mod paint;
pub mod processor;
pub mod stencil;
pub mod target;
pub mod xfer;

pub use crate::foundation::core::{
    Affine, BezPath, Color, ColorComponents, IPoint, IRect, Point, Rect,
};
pub use crate::foundation::error::{DrawStateError, DrawStateResult};

pub use crate::analysis::{
    AnalysisSeed, BatchSeed, InvariantCache, InvariantOutput, ProcOptInfo, SeedSource,
};
pub use crate::builder::{
    DrawFace, PipelineBuilder, ScopedEffectGuard, ScopedStencilGuard, StateBits,
};
pub use crate::clip::{ClipDescriptor, ClipElement, ClipKind, ClipShape, ClipStack, RegionOp};
pub use crate::paint::{Paint, Shader};
pub use crate::processor::{
    ConstColorMode, ConstColorProcessor, FilterMode, FragmentProcessor, FragmentStage,
    SimpleTextureEffect, TextureParams, TileMode,
};
pub use crate::stencil::{StencilFace, StencilFunc, StencilOp, StencilSettings};
pub use crate::target::{PixelConfig, RenderTarget, SurfaceId, Texture};
pub use crate::xfer::{
    BlendCoeff, BlendEquation, BlendFormula, BlendMode, Caps, CoverageSetOpXPFactory,
    CustomXPFactory, DisableColorXPFactory, PorterDuffXPFactory, XPFactory, XferProcessor,
    xp_factory_for_mode,
};
