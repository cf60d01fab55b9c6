use crate::foundation::error::{DrawStateError, DrawStateResult};

bitflags::bitflags! {
    /// Render state toggles. All default to disabled.
    ///
    /// Bits outside the named flags are kept as-is rather than rejected.
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
    )]
    pub struct StateBits: u32 {
        const DITHER = 0x01;
        /// Hardware multisample AA, or smooth lines when drawing line primitives.
        const HW_ANTIALIAS = 0x02;
    }
}

/// Which polygon faces are rasterized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawFace {
    /// Sentinel; never a valid builder state.
    Invalid,
    #[default]
    Both,
    Ccw,
    Cw,
}

impl TryFrom<i32> for DrawFace {
    type Error = DrawStateError;

    fn try_from(raw: i32) -> DrawStateResult<Self> {
        match raw {
            -1 => Ok(Self::Invalid),
            0 => Ok(Self::Both),
            1 => Ok(Self::Ccw),
            2 => Ok(Self::Cw),
            other => Err(DrawStateError::validation(format!(
                "draw face out of range: {other}"
            ))),
        }
    }
}
