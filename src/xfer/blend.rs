use crate::foundation::error::{DrawStateError, DrawStateResult};

/// Paint blend mode: how a draw's color combines with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    #[serde(rename = "src-atop")]
    SrcATop,
    #[serde(rename = "dst-atop")]
    DstATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    // Advanced modes below have no fixed-function coefficient form.
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const ALL: [BlendMode; 29] = [
        Self::Clear,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcATop,
        Self::DstATop,
        Self::Xor,
        Self::Plus,
        Self::Modulate,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Multiply,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Parses kebab-case names such as `"src-over"` or `"color-dodge"`.
    pub fn parse(name: &str) -> DrawStateResult<Self> {
        let quoted = format!("\"{}\"", name.trim().to_ascii_lowercase());
        serde_json::from_str(&quoted)
            .map_err(|_| DrawStateError::validation(format!("unknown blend mode '{name}'")))
    }

    /// Fixed-function `(src, dst)` coefficients, for Porter-Duff style modes only.
    pub fn coefficients(self) -> Option<(BlendCoeff, BlendCoeff)> {
        use BlendCoeff::*;
        Some(match self {
            Self::Clear => (Zero, Zero),
            Self::Src => (One, Zero),
            Self::Dst => (Zero, One),
            Self::SrcOver => (One, InvSrcAlpha),
            Self::DstOver => (InvDstAlpha, One),
            Self::SrcIn => (DstAlpha, Zero),
            Self::DstIn => (Zero, SrcAlpha),
            Self::SrcOut => (InvDstAlpha, Zero),
            Self::DstOut => (Zero, InvSrcAlpha),
            Self::SrcATop => (DstAlpha, InvSrcAlpha),
            Self::DstATop => (InvDstAlpha, SrcAlpha),
            Self::Xor => (InvDstAlpha, InvSrcAlpha),
            Self::Plus => (One, One),
            Self::Modulate => (Zero, SrcColor),
            Self::Screen => (One, InvSrcColor),
            _ => return None,
        })
    }

    pub fn is_coeff_mode(self) -> bool {
        self.coefficients().is_some()
    }

    /// Non-separable modes mix channels (hue, saturation...) and need the whole dst pixel.
    pub fn is_separable(self) -> bool {
        !matches!(
            self,
            Self::Hue | Self::Saturation | Self::Color | Self::Luminosity
        )
    }
}

/// Fixed-function blend coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendCoeff {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    DstColor,
    InvDstColor,
    SrcAlpha,
    InvSrcAlpha,
    DstAlpha,
    InvDstAlpha,
    /// Secondary output of dual-source blending.
    Src2Color,
    InvSrc2Color,
}

impl BlendCoeff {
    /// Whether the coefficient reads the destination.
    pub fn references_dst(self) -> bool {
        matches!(self, Self::DstColor | Self::InvDstColor | Self::DstAlpha | Self::InvDstAlpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    Add,
    Subtract,
    ReverseSubtract,
    /// Hardware advanced blend equation for the given mode.
    Advanced(BlendMode),
}

/// Blend state a frozen transfer processor programs into the hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlendFormula {
    pub equation: BlendEquation,
    pub src_coeff: BlendCoeff,
    pub dst_coeff: BlendCoeff,
}

impl BlendFormula {
    pub const fn add(src_coeff: BlendCoeff, dst_coeff: BlendCoeff) -> Self {
        Self {
            equation: BlendEquation::Add,
            src_coeff,
            dst_coeff,
        }
    }

    /// Src replaces dst; used when the shader already computed the final color.
    pub const REPLACE: Self = Self::add(BlendCoeff::One, BlendCoeff::Zero);

    /// Dst is left untouched.
    pub const NO_OP: Self = Self::add(BlendCoeff::Zero, BlendCoeff::One);

    pub fn references_dst(&self) -> bool {
        self.src_coeff.references_dst()
            || self.dst_coeff != BlendCoeff::Zero
            || matches!(self.equation, BlendEquation::Advanced(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/xfer/blend.rs"]
mod tests;
