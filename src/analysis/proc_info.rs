use super::{AnalysisSeed, InvariantOutput};
use crate::foundation::core::{Color, ColorComponents};
use crate::processor::FragmentStage;

/// Result of walking one stage chain from a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcOptInfo {
    output: InvariantOutput,
    /// Stages before this index can be skipped; their combined effect is `input_color`.
    first_effective_stage: usize,
    input_color: Color,
    input_color_is_used: bool,
    reads_dst: bool,
    reads_fragment_position: bool,
    num_stages: usize,
}

impl ProcOptInfo {
    pub fn calc_with_seed(stages: &[FragmentStage], seed: AnalysisSeed) -> Self {
        let mut info = Self {
            output: InvariantOutput::from_seed(&seed),
            first_effective_stage: 0,
            input_color: seed.color,
            input_color_is_used: true,
            reads_dst: false,
            reads_fragment_position: false,
            num_stages: stages.len(),
        };

        for (idx, stage) in stages.iter().enumerate() {
            let processor = stage.processor();
            info.output.reset_will_use_input();
            processor.compute_invariant_output(&mut info.output);

            if !info.output.will_use_input() {
                // Everything upstream is dead.
                info.first_effective_stage = idx;
                info.input_color_is_used = false;
                info.reads_dst = false;
                info.reads_fragment_position = false;
            }
            if processor.will_read_dst() {
                info.reads_dst = true;
            }
            if processor.will_read_fragment_position() {
                info.reads_fragment_position = true;
            }
            if info.output.is_constant() {
                // Fold stages 0..=idx into a constant input for the next stage.
                info.first_effective_stage = idx + 1;
                info.input_color = info.output.color();
                info.input_color_is_used = true;
                info.reads_dst = false;
                info.reads_fragment_position = false;
            }
        }

        info
    }

    pub fn output(&self) -> &InvariantOutput {
        &self.output
    }

    pub fn color(&self) -> Color {
        self.output.color()
    }

    pub fn valid_flags(&self) -> ColorComponents {
        self.output.valid_flags()
    }

    pub fn is_opaque(&self) -> bool {
        self.output.is_opaque()
    }

    pub fn is_solid_white(&self) -> bool {
        self.output.is_solid_white()
    }

    pub fn is_constant(&self) -> bool {
        self.output.is_constant()
    }

    /// Output differs per channel (e.g. LCD coverage or a color texture), so it cannot be folded
    /// into a single alpha value.
    pub fn is_four_channel_output(&self) -> bool {
        !self.output.is_single_component() && !self.is_constant_single_channel()
    }

    pub fn is_lcd_coverage(&self) -> bool {
        self.output.is_lcd_coverage()
    }

    pub fn first_effective_stage(&self) -> usize {
        self.first_effective_stage
    }

    pub fn input_color(&self) -> Color {
        self.input_color
    }

    pub fn input_color_is_used(&self) -> bool {
        self.input_color_is_used
    }

    pub fn reads_dst(&self) -> bool {
        self.reads_dst
    }

    pub fn reads_fragment_position(&self) -> bool {
        self.reads_fragment_position
    }

    pub fn num_stages(&self) -> usize {
        self.num_stages
    }

    fn is_constant_single_channel(&self) -> bool {
        let c = self.output.color();
        self.is_constant() && c.r == c.g && c.g == c.b && c.b == c.a
    }
}

impl Default for ProcOptInfo {
    fn default() -> Self {
        Self::calc_with_seed(&[], AnalysisSeed::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/proc_info.rs"]
mod tests;
