use std::rc::Rc;

use super::FragmentProcessor;
use crate::analysis::InvariantOutput;
use crate::foundation::core::{Affine, Color, ColorComponents};
use crate::target::{PixelConfig, Texture};

/// How a [`ConstColorProcessor`] combines its color with the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstColorMode {
    /// Output is the constant; the input is not read.
    Ignore,
    ModulateRgba,
    ModulateA,
}

/// Emits (or modulates by) a literal color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstColorProcessor {
    pub color: Color,
    pub mode: ConstColorMode,
}

impl ConstColorProcessor {
    pub fn new(color: Color, mode: ConstColorMode) -> Rc<Self> {
        Rc::new(Self { color, mode })
    }
}

impl FragmentProcessor for ConstColorProcessor {
    fn name(&self) -> &'static str {
        "const_color"
    }

    fn compute_invariant_output(&self, inout: &mut InvariantOutput) {
        match self.mode {
            ConstColorMode::Ignore => inout.set_to_other(ColorComponents::RGBA, self.color, false),
            ConstColorMode::ModulateRgba => inout.mul_by_known_four_components(self.color),
            ConstColorMode::ModulateA => inout.mul_by_known_single_component(self.color.a),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    #[default]
    Nearest,
    Bilinear,
    MipMap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileMode {
    #[default]
    Clamp,
    Repeat,
    Mirror,
}

/// Sampling parameters for a texture stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextureParams {
    pub filter: FilterMode,
    pub tile_x: TileMode,
    pub tile_y: TileMode,
}

/// Samples a texture at local coordinates mapped through `matrix` and modulates the input by the
/// sampled value.
#[derive(Clone, Debug)]
pub struct SimpleTextureEffect {
    pub texture: Rc<Texture>,
    pub matrix: Affine,
    pub params: TextureParams,
}

impl SimpleTextureEffect {
    pub fn new(texture: Rc<Texture>, matrix: Affine) -> Rc<Self> {
        Self::with_params(texture, matrix, TextureParams::default())
    }

    pub fn with_params(texture: Rc<Texture>, matrix: Affine, params: TextureParams) -> Rc<Self> {
        Rc::new(Self {
            texture,
            matrix,
            params,
        })
    }
}

impl FragmentProcessor for SimpleTextureEffect {
    fn name(&self) -> &'static str {
        "simple_texture"
    }

    fn compute_invariant_output(&self, inout: &mut InvariantOutput) {
        match self.texture.config {
            PixelConfig::Alpha8 => inout.mul_by_unknown_single_component(),
            PixelConfig::Rgb8Opaque => inout.mul_by_unknown_opaque_four_components(),
            PixelConfig::Rgba8 => inout.mul_by_unknown_four_components(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/processor/effects.rs"]
mod tests;
