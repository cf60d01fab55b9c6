use std::rc::Rc;

use super::*;
use crate::analysis::AnalysisSeed;
use crate::foundation::core::Color;
use crate::processor::{ConstColorMode, ConstColorProcessor, FragmentProcessor};
use crate::stencil::{StencilFace, StencilOp};

fn fp(a: u8) -> Rc<dyn FragmentProcessor> {
    ConstColorProcessor::new(Color::splat(a), ConstColorMode::ModulateA)
}

fn replace_stencil() -> StencilSettings {
    StencilSettings::new_same(StencilFace {
        pass_op: StencilOp::Replace,
        ..StencilFace::default()
    })
}

#[test]
fn guard_restores_stage_counts() {
    let mut builder = PipelineBuilder::new();
    builder.add_color_processor(fp(1));
    builder.add_color_processor(fp(2));
    {
        let mut guard = ScopedEffectGuard::new(&mut builder);
        assert_eq!(guard.saved_counts(), (2, 0));
        guard.add_color_processor(fp(3));
        guard.add_color_processor(fp(4));
        guard.add_coverage_processor(fp(5));
        assert_eq!(guard.num_color_stages(), 4);
    }
    assert_eq!(builder.num_color_stages(), 2);
    assert_eq!(builder.num_coverage_stages(), 0);
    #[cfg(debug_assertions)]
    assert_eq!(builder.effect_guard_depth(), 0);
}

#[test]
fn guard_release_invalidates_analysis() {
    let mut builder = PipelineBuilder::new();
    let seed = AnalysisSeed::from_color(Color::WHITE);
    {
        let mut guard = ScopedEffectGuard::new(&mut builder);
        guard.add_color_processor(fp(0));
        assert!(guard.calc_color_invariant_output(seed).is_constant());
    }
    assert!(builder.cached_color_proc_info().is_none());
    assert!(builder.calc_color_invariant_output(seed).is_solid_white());
}

#[test]
fn nested_guards_release_innermost_first() {
    let mut builder = PipelineBuilder::new();
    {
        let mut outer = ScopedEffectGuard::new(&mut builder);
        outer.add_color_processor(fp(1));
        {
            let mut inner = ScopedEffectGuard::new(&mut outer);
            inner.add_color_processor(fp(2));
            assert_eq!(inner.saved_counts(), (1, 0));
            #[cfg(debug_assertions)]
            assert_eq!(inner.effect_guard_depth(), 2);
        }
        assert_eq!(outer.num_color_stages(), 1);
    }
    assert_eq!(builder.num_color_stages(), 0);
}

#[test]
fn unbound_guard_is_inert() {
    let guard = ScopedEffectGuard::unbound();
    assert!(!guard.is_bound());
    drop(guard);

    let stencil = ScopedStencilGuard::unbound();
    assert!(!stencil.is_bound());
}

#[test]
fn rebinding_releases_previous_builder() {
    let mut first = PipelineBuilder::new();
    let mut second = PipelineBuilder::new();
    second.add_coverage_processor(fp(9));
    {
        let mut guard = ScopedEffectGuard::new(&mut first);
        guard.add_color_processor(fp(1));
        guard.bind(Some(&mut second));
        assert_eq!(guard.saved_counts(), (0, 1));
        guard.add_coverage_processor(fp(2));
        guard.bind(None);
        assert!(!guard.is_bound());
    }
    assert_eq!(first.num_color_stages(), 0);
    assert_eq!(second.num_coverage_stages(), 1);
}

#[test]
#[should_panic(expected = "not bound")]
fn deref_of_unbound_guard_panics() {
    let guard = ScopedEffectGuard::unbound();
    let _ = guard.num_color_stages();
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "while an effect guard is bound")]
fn set_from_paint_inside_effect_guard_panics_in_debug() {
    let mut builder = PipelineBuilder::new();
    let mut guard = ScopedEffectGuard::new(&mut builder);
    guard.set_from_paint(
        &crate::paint::Paint::default(),
        None,
        &crate::clip::ClipDescriptor::wide_open(),
    );
}

#[test]
fn stencil_guard_restores_settings() {
    let mut builder = PipelineBuilder::new();
    {
        let mut guard = ScopedStencilGuard::new(&mut builder);
        assert!(guard.saved().is_disabled());
        guard.set_stencil(replace_stencil());
        assert!(guard.stencil().does_write());
    }
    assert!(builder.stencil().is_disabled());

    builder.set_stencil(replace_stencil());
    {
        let mut guard = ScopedStencilGuard::new(&mut builder);
        guard.disable_stencil();
        let mut effects = ScopedEffectGuard::new(&mut guard);
        effects.add_color_processor(fp(1));
    }
    assert_eq!(*builder.stencil(), replace_stencil());
    assert_eq!(builder.num_color_stages(), 0);
}
