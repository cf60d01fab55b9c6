use std::rc::Rc;

use super::*;
use crate::processor::{ConstColorMode, ConstColorProcessor, FragmentProcessor, SimpleTextureEffect};
use crate::target::{PixelConfig, SurfaceId, Texture};
use kurbo::Affine;

#[derive(Debug)]
struct DstReader;

impl FragmentProcessor for DstReader {
    fn name(&self) -> &'static str {
        "dst_reader"
    }

    fn compute_invariant_output(&self, inout: &mut InvariantOutput) {
        inout.set_to_unknown(true);
    }

    fn will_read_dst(&self) -> bool {
        true
    }

    fn will_read_fragment_position(&self) -> bool {
        true
    }
}

fn stage(fp: Rc<dyn FragmentProcessor>) -> FragmentStage {
    FragmentStage::new(fp)
}

fn texture(config: PixelConfig) -> FragmentStage {
    stage(SimpleTextureEffect::new(
        Texture::new(SurfaceId(7), 16, 16, config),
        Affine::IDENTITY,
    ))
}

#[test]
fn empty_chain_passes_seed_through() {
    let info = ProcOptInfo::calc_with_seed(&[], AnalysisSeed::from_color(Color::WHITE));
    assert!(info.is_solid_white());
    assert_eq!(info.first_effective_stage(), 0);
    assert_eq!(info.num_stages(), 0);
    assert!(info.input_color_is_used());
}

#[test]
fn opaque_seed_through_alpha_texture_is_not_constant() {
    let stages = [texture(PixelConfig::Alpha8)];
    let info = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::from_color(Color::WHITE));
    assert!(!info.is_constant());
    assert!(!info.is_opaque());
    assert_eq!(info.first_effective_stage(), 0);
}

#[test]
fn opaque_texture_keeps_opacity() {
    let stages = [texture(PixelConfig::Rgb8Opaque)];
    let info = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::from_color(Color::WHITE));
    assert!(info.is_opaque());
    assert!(!info.is_constant());
    assert_eq!(info.first_effective_stage(), 0);
}

#[test]
fn black_through_opaque_texture_folds_to_constant() {
    let stages = [texture(PixelConfig::Rgb8Opaque)];
    let info = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::from_color(Color::BLACK));
    assert!(info.is_constant());
    assert_eq!(info.color(), Color::BLACK);
    assert_eq!(info.first_effective_stage(), 1);
    assert_eq!(info.input_color(), Color::BLACK);
}

#[test]
fn input_ignoring_stage_folds_upstream() {
    let red = Color::new(255, 0, 0, 255);
    let stages = [
        texture(PixelConfig::Rgba8),
        stage(ConstColorProcessor::new(red, ConstColorMode::Ignore)),
        texture(PixelConfig::Rgba8),
    ];
    let info = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::unknown_color());
    assert_eq!(info.first_effective_stage(), 2);
    assert_eq!(info.input_color(), red);
    assert!(info.input_color_is_used());
    assert!(!info.is_constant());
    assert_eq!(info.num_stages(), 3);
}

#[test]
fn constant_output_after_last_stage_skips_whole_chain() {
    let stages = [
        stage(ConstColorProcessor::new(Color::WHITE, ConstColorMode::ModulateA)),
        stage(ConstColorProcessor::new(Color::splat(128), ConstColorMode::ModulateA)),
    ];
    let info = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::from_color(Color::WHITE));
    assert!(info.is_constant());
    assert_eq!(info.first_effective_stage(), 2);
    assert_eq!(info.input_color(), Color::splat(128));
    assert!(!info.is_four_channel_output());
}

#[test]
fn dst_reads_are_reported_and_cleared_by_later_folds() {
    let reading = [stage(Rc::new(DstReader))];
    let info = ProcOptInfo::calc_with_seed(&reading, AnalysisSeed::unknown_color());
    assert!(info.reads_dst());
    assert!(info.reads_fragment_position());

    let folded = [
        stage(Rc::new(DstReader)),
        stage(ConstColorProcessor::new(Color::BLACK, ConstColorMode::Ignore)),
    ];
    let info = ProcOptInfo::calc_with_seed(&folded, AnalysisSeed::unknown_color());
    assert!(!info.reads_dst());
    assert!(!info.reads_fragment_position());
}

#[test]
fn lcd_coverage_is_four_channel() {
    let info = ProcOptInfo::calc_with_seed(&[], AnalysisSeed::lcd_coverage());
    assert!(info.is_lcd_coverage());
    assert!(info.is_four_channel_output());

    let scalar = ProcOptInfo::calc_with_seed(&[], AnalysisSeed::unknown_coverage());
    assert!(!scalar.is_four_channel_output());
}

#[test]
fn equal_inputs_give_equal_results() {
    let stages = [texture(PixelConfig::Rgba8)];
    let a = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::unknown_color());
    let b = ProcOptInfo::calc_with_seed(&stages, AnalysisSeed::unknown_color());
    assert_eq!(a, b);
}
