//! Per-draw stencil configuration.

use crate::foundation::error::{DrawStateError, DrawStateResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    IncWrap,
    IncClamp,
    DecWrap,
    DecClamp,
    Invert,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StencilFunc {
    #[default]
    Always,
    Never,
    Greater,
    GEqual,
    Less,
    LEqual,
    Equal,
    NotEqual,
}

/// Test and update rules for one polygon face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StencilFace {
    pub pass_op: StencilOp,
    pub fail_op: StencilOp,
    pub func: StencilFunc,
    pub func_mask: u16,
    pub func_ref: u16,
    pub write_mask: u16,
}

impl Default for StencilFace {
    fn default() -> Self {
        Self {
            pass_op: StencilOp::Keep,
            fail_op: StencilOp::Keep,
            func: StencilFunc::Always,
            func_mask: 0xffff,
            func_ref: 0,
            write_mask: 0xffff,
        }
    }
}

impl StencilFace {
    /// True when this face leaves stencil untouched and never rejects a fragment.
    pub fn is_no_op(&self) -> bool {
        self.pass_op == StencilOp::Keep
            && self.fail_op == StencilOp::Keep
            && self.func == StencilFunc::Always
    }

    pub fn does_write(&self) -> bool {
        if self.write_mask == 0 {
            return false;
        }
        let pass_runs = self.func != StencilFunc::Never;
        let fail_runs = self.func != StencilFunc::Always;
        (pass_runs && self.pass_op != StencilOp::Keep)
            || (fail_runs && self.fail_op != StencilOp::Keep)
    }
}

/// Stencil state for a draw. Disabled settings ignore both face descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StencilSettings {
    pub front: StencilFace,
    pub back: StencilFace,
    pub disabled: bool,
}

impl Default for StencilSettings {
    fn default() -> Self {
        Self::disabled()
    }
}

impl StencilSettings {
    pub fn disabled() -> Self {
        Self {
            front: StencilFace::default(),
            back: StencilFace::default(),
            disabled: true,
        }
    }

    /// Same rules on both faces.
    pub fn new_same(face: StencilFace) -> Self {
        Self {
            front: face,
            back: face,
            disabled: face.is_no_op(),
        }
    }

    pub fn new_two_sided(front: StencilFace, back: StencilFace) -> Self {
        Self {
            front,
            back,
            disabled: front.is_no_op() && back.is_no_op(),
        }
    }

    pub fn from_json(text: &str) -> DrawStateResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        if settings.disabled && !(settings.front.is_no_op() && settings.back.is_no_op()) {
            return Err(DrawStateError::config(
                "stencil settings marked disabled but carry face operations",
            ));
        }
        Ok(settings)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self) {
        *self = Self::disabled();
    }

    pub fn is_two_sided(&self) -> bool {
        self.front != self.back
    }

    pub fn does_write(&self) -> bool {
        !self.disabled && (self.front.does_write() || self.back.does_write())
    }
}

#[cfg(test)]
#[path = "../tests/unit/stencil.rs"]
mod tests;
