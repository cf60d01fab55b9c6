use std::rc::Rc;

use drawstate::{
    Affine, AnalysisSeed, BlendMode, Caps, ClipDescriptor, ClipStack, IPoint, Paint,
    PipelineBuilder, PixelConfig, Rect, RegionOp, RenderTarget, ScopedEffectGuard, SurfaceId,
    Texture,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let caps = Caps::from_json(r#"{"dual_source_blending": true}"#)?;
    let target = RenderTarget::new(SurfaceId(1), 640, 480);

    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(20.0, 20.0, 600.0, 400.0), RegionOp::Intersect, false);
    stack.push_rect(Rect::new(100.0, 100.0, 140.0, 140.0), RegionOp::Difference, true);
    let clip = ClipDescriptor::from_stack(Rc::new(stack), Some(IPoint::new(0, 8)));

    for name in ["src-over", "multiply", "hue", "plus"] {
        let paint = Paint::new()
            .with_color(40, 90, 200)
            .with_alpha(200)
            .with_blend_mode(BlendMode::parse(name)?);

        let mut builder = PipelineBuilder::new();
        builder.set_from_paint(&paint, Some(Rc::clone(&target)), &clip);

        let glyphs = Texture::new(SurfaceId(2), 256, 256, PixelConfig::Alpha8);
        let mut guard = ScopedEffectGuard::new(&mut builder);
        guard.add_coverage_texture_processor(glyphs, Affine::scale(0.25));

        let color = guard
            .calc_color_invariant_output(AnalysisSeed::from_color(paint.premul_color()))
            .clone();
        let coverage = guard
            .calc_coverage_invariant_output(AnalysisSeed::full_coverage())
            .clone();
        let (bounds, exact) = guard.clip().conservative_bounds_for(&target);

        println!(
            "{name}: factory={} dst_copy={} tweak_alpha={} clip={:?} exact={exact}",
            guard.xp_factory().name(),
            guard.will_xp_need_dst_copy(&caps, &color, &coverage),
            guard.can_tweak_alpha_for_coverage(),
            bounds,
        );
    }

    Ok(())
}
