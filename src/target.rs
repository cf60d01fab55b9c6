//! Opaque GPU surface handles.
//!
//! The builder stores and shares these; it never inspects pixel contents. Handles are shared with
//! [`Rc`], so they must stay on the thread that created them.

use std::rc::Rc;

use crate::foundation::core::IRect;

/// Identifier assigned by the backend that owns the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// A surface draws are rendered into.
#[derive(Debug, PartialEq, Eq)]
pub struct RenderTarget {
    pub id: SurfaceId,
    pub width: u32,
    pub height: u32,
    pub sample_count: u32,
}

impl RenderTarget {
    pub fn new(id: SurfaceId, width: u32, height: u32) -> Rc<Self> {
        Rc::new(Self {
            id,
            width,
            height,
            sample_count: 1,
        })
    }

    pub fn with_samples(id: SurfaceId, width: u32, height: u32, sample_count: u32) -> Rc<Self> {
        Rc::new(Self {
            id,
            width,
            height,
            sample_count: sample_count.max(1),
        })
    }

    /// Full device rect of the surface.
    pub fn bounds(&self) -> IRect {
        IRect::from_wh(clamp_dim(self.width), clamp_dim(self.height))
    }
}

/// Texel layout of a [`Texture`]; drives what a sampling stage can promise about its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelConfig {
    Rgba8,
    /// RGB data with an implied opaque alpha.
    Rgb8Opaque,
    /// Single alpha channel; color channels read as the alpha value.
    Alpha8,
}

/// A sampled image.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: SurfaceId,
    pub width: u32,
    pub height: u32,
    pub config: PixelConfig,
}

impl Texture {
    pub fn new(id: SurfaceId, width: u32, height: u32, config: PixelConfig) -> Rc<Self> {
        Rc::new(Self {
            id,
            width,
            height,
            config,
        })
    }
}

fn clamp_dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
