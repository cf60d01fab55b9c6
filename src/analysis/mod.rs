//! Static analysis of what a fragment-stage chain produces.
//!
//! Each channel of the running descriptor is either known (with a value) or unknown. Stages are
//! visited front to back and each one rewrites the descriptor according to its own declared
//! contract. Modulating a known zero by anything keeps it a known zero; any other product with an
//! unknown value is unknown. A stage that ignores its input replaces the descriptor outright.

pub mod cache;
pub mod proc_info;

use crate::foundation::core::{Color, ColorComponents, component_flag};
use crate::foundation::math::mul_div255_u8;

pub use cache::InvariantCache;
pub use proc_info::ProcOptInfo;

/// Starting descriptor for an analysis pass, and the key of an [`InvariantCache`] slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnalysisSeed {
    pub color: Color,
    pub valid: ColorComponents,
    /// All four channels carry the same value (coverage).
    pub single_component: bool,
    /// Per-channel (subpixel) coverage.
    pub lcd_coverage: bool,
}

impl AnalysisSeed {
    /// A literal constant color.
    pub fn from_color(color: Color) -> Self {
        Self {
            color,
            valid: ColorComponents::RGBA,
            single_component: false,
            lcd_coverage: false,
        }
    }

    /// A literal constant coverage value.
    pub fn from_coverage(coverage: u8) -> Self {
        Self {
            color: Color::splat(coverage),
            valid: ColorComponents::RGBA,
            single_component: true,
            lcd_coverage: false,
        }
    }

    /// Full coverage, the usual seed for the coverage chain.
    pub fn full_coverage() -> Self {
        Self::from_coverage(255)
    }

    /// Per-vertex or otherwise varying color.
    pub fn unknown_color() -> Self {
        Self {
            color: Color::TRANSPARENT,
            valid: ColorComponents::empty(),
            single_component: false,
            lcd_coverage: false,
        }
    }

    /// Per-vertex or otherwise varying scalar coverage.
    pub fn unknown_coverage() -> Self {
        Self {
            single_component: true,
            ..Self::unknown_color()
        }
    }

    /// Varying per-channel coverage from subpixel text.
    pub fn lcd_coverage() -> Self {
        Self {
            lcd_coverage: true,
            ..Self::unknown_color()
        }
    }
}

impl Default for AnalysisSeed {
    fn default() -> Self {
        Self::unknown_color()
    }
}

/// An opaque batch or primitive description that has not resolved a literal color yet.
pub trait SeedSource {
    fn color_seed(&self) -> AnalysisSeed;

    fn coverage_seed(&self) -> AnalysisSeed;
}

/// Straightforward [`SeedSource`] for geometry batches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSeed {
    /// `None` when colors vary per vertex.
    pub color: Option<Color>,
    /// `None` when coverage varies per vertex (e.g. analytic AA edges).
    pub coverage: Option<u8>,
    pub lcd_text: bool,
}

impl SeedSource for BatchSeed {
    fn color_seed(&self) -> AnalysisSeed {
        self.color
            .map_or_else(AnalysisSeed::unknown_color, AnalysisSeed::from_color)
    }

    fn coverage_seed(&self) -> AnalysisSeed {
        if self.lcd_text {
            return AnalysisSeed::lcd_coverage();
        }
        self.coverage
            .map_or_else(AnalysisSeed::unknown_coverage, AnalysisSeed::from_coverage)
    }
}

/// Running descriptor threaded through a stage chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvariantOutput {
    color: Color,
    valid: ColorComponents,
    single_component: bool,
    lcd_coverage: bool,
    will_use_input: bool,
}

impl InvariantOutput {
    pub fn from_seed(seed: &AnalysisSeed) -> Self {
        let mut out = Self {
            color: seed.color,
            valid: seed.valid,
            single_component: seed.single_component,
            lcd_coverage: seed.lcd_coverage,
            will_use_input: true,
        };
        out.scrub_unknown();
        out
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn valid_flags(&self) -> ColorComponents {
        self.valid
    }

    pub fn is_single_component(&self) -> bool {
        self.single_component
    }

    pub fn is_lcd_coverage(&self) -> bool {
        self.lcd_coverage
    }

    /// False once the most recent stage declared that it ignores its input.
    pub fn will_use_input(&self) -> bool {
        self.will_use_input
    }

    pub(crate) fn reset_will_use_input(&mut self) {
        self.will_use_input = true;
    }

    pub fn is_constant(&self) -> bool {
        self.valid == ColorComponents::RGBA
    }

    pub fn is_opaque(&self) -> bool {
        self.valid.contains(ColorComponents::A) && self.color.a == 255
    }

    pub fn has_zero_alpha(&self) -> bool {
        self.valid.contains(ColorComponents::A) && self.color.a == 0
    }

    pub fn is_solid_white(&self) -> bool {
        self.is_constant() && self.color == Color::WHITE
    }

    /// The stage replaces its input with `color`, of which only `valid` channels are known.
    pub fn set_to_other(&mut self, valid: ColorComponents, color: Color, reads_input: bool) {
        self.color = color;
        self.valid = valid;
        self.single_component = false;
        self.lcd_coverage = false;
        if !reads_input {
            self.will_use_input = false;
        }
        self.scrub_unknown();
    }

    /// The stage produces something not statically known.
    pub fn set_to_unknown(&mut self, reads_input: bool) {
        self.set_to_other(ColorComponents::empty(), Color::TRANSPARENT, reads_input);
    }

    /// Multiply every channel by an unknown per-channel value.
    pub fn mul_by_unknown_four_components(&mut self) {
        if self.has_zero_alpha() {
            self.set_transparent_black();
            return;
        }
        self.keep_only_known_zeros(ColorComponents::RGBA);
        self.single_component = false;
    }

    /// Like [`Self::mul_by_unknown_four_components`] but the unknown value is opaque, so alpha
    /// passes through unchanged.
    pub fn mul_by_unknown_opaque_four_components(&mut self) {
        if self.has_zero_alpha() {
            self.set_transparent_black();
            return;
        }
        self.keep_only_known_zeros(ColorComponents::RGB);
        self.single_component = false;
    }

    /// Multiply every channel by the same unknown scalar.
    pub fn mul_by_unknown_single_component(&mut self) {
        if self.has_zero_alpha() {
            self.set_transparent_black();
            return;
        }
        self.keep_only_known_zeros(ColorComponents::RGBA);
    }

    /// Multiply every channel by a known scalar.
    pub fn mul_by_known_single_component(&mut self, value: u8) {
        if value == 0 {
            self.set_transparent_black();
            return;
        }
        self.color = self.color.scale(value);
        self.scrub_unknown();
    }

    /// Multiply channel-wise by a known color.
    pub fn mul_by_known_four_components(&mut self, value: Color) {
        if value.a == 0 {
            self.set_transparent_black();
            return;
        }
        for idx in 0..4 {
            let factor = value.channel(idx);
            let ch = self.color.channel_mut(idx);
            if factor == 0 {
                *ch = 0;
                self.valid |= component_flag(idx);
            } else {
                *ch = mul_div255_u8(u16::from(*ch), u16::from(factor));
            }
        }
        if value.r != value.g || value.g != value.b || value.b != value.a {
            self.single_component = false;
        }
        self.scrub_unknown();
    }

    /// Forget the listed channels.
    pub fn invalidate_components(&mut self, which: ColorComponents) {
        self.valid.remove(which);
        self.scrub_unknown();
    }

    fn set_transparent_black(&mut self) {
        self.color = Color::TRANSPARENT;
        self.valid = ColorComponents::RGBA;
        self.single_component = true;
    }

    fn keep_only_known_zeros(&mut self, which: ColorComponents) {
        for idx in 0..4 {
            let flag = component_flag(idx);
            if which.contains(flag) && self.color.channel(idx) != 0 {
                self.valid.remove(flag);
            }
        }
        self.scrub_unknown();
    }

    /// Unknown channels always carry zero so equal descriptors compare equal.
    fn scrub_unknown(&mut self) {
        for idx in 0..4 {
            if !self.valid.contains(component_flag(idx)) {
                *self.color.channel_mut(idx) = 0;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/invariant.rs"]
mod tests;
