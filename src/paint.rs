//! Paint-like draw description consumed by [`crate::PipelineBuilder::set_from_paint`].

use std::fmt;
use std::rc::Rc;

use crate::foundation::core::Color;
use crate::processor::FragmentProcessor;
use crate::xfer::BlendMode;

/// Externally implemented shader attached to a paint.
pub trait Shader: fmt::Debug {
    /// Fragment processor computing the shader's color, already modulated by `paint_color` where
    /// the shader wants that. `None` when the shader cannot be expressed on this backend.
    fn as_fragment_processor(&self, paint_color: Color) -> Option<Rc<dyn FragmentProcessor>>;
}

/// Fill color, alpha, blend mode and hints for one draw.
#[derive(Clone, Debug)]
pub struct Paint {
    /// Straight (non-premultiplied) RGB.
    pub color: [u8; 3],
    pub alpha: u8,
    pub blend_mode: BlendMode,
    pub anti_alias: bool,
    pub dither: bool,
    pub shader: Option<Rc<dyn Shader>>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            alpha: 255,
            blend_mode: BlendMode::SrcOver,
            anti_alias: false,
            dither: false,
            shader: None,
        }
    }
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = [r, g, b];
        self
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn with_anti_alias(mut self, aa: bool) -> Self {
        self.anti_alias = aa;
        self
    }

    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    pub fn with_shader(mut self, shader: Rc<dyn Shader>) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Paint color with alpha applied, premultiplied.
    pub fn premul_color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::from_straight_rgba(r, g, b, self.alpha)
    }
}
