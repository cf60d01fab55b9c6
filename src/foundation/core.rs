use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, BezPath, Point, Rect};

/// Integer 2D offset in device space.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IPoint {
    pub x: i32,
    pub y: i32,
}

impl IPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle, half-open on the right and bottom edges.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IRect {
    pub left: i32,
    pub top: i32,
    pub right: i32, // exclusive
    pub bottom: i32, // exclusive
}

impl IRect {
    pub const EMPTY: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::from_ltrb(x, y, x.saturating_add(w), y.saturating_add(h))
    }

    pub fn from_wh(w: i32, h: i32) -> Self {
        Self::from_xywh(0, 0, w, h)
    }

    pub fn width(self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// True if `other` is non-empty and lies entirely inside `self`.
    pub fn contains(self, other: &IRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Float variant of [`IRect::contains`].
    pub fn contains_rect(self, other: &Rect) -> bool {
        let other_empty = other.x0 >= other.x1 || other.y0 >= other.y1;
        !self.is_empty()
            && !other_empty
            && f64::from(self.left) <= other.x0
            && f64::from(self.top) <= other.y0
            && f64::from(self.right) >= other.x1
            && f64::from(self.bottom) >= other.y1
    }

    pub fn intersect(self, other: &IRect) -> Option<IRect> {
        let r = IRect::from_ltrb(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }

    /// Smallest rect containing both. Empty operands are ignored.
    pub fn join(self, other: &IRect) -> IRect {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return *other;
        }
        IRect::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn offset(self, by: IPoint) -> IRect {
        IRect::from_ltrb(
            self.left.saturating_add(by.x),
            self.top.saturating_add(by.y),
            self.right.saturating_add(by.x),
            self.bottom.saturating_add(by.y),
        )
    }

    /// Rounds a float rect outwards.
    pub fn round_out(r: &Rect) -> IRect {
        IRect::from_ltrb(
            r.x0.floor() as i32,
            r.y0.floor() as i32,
            r.x1.ceil() as i32,
            r.y1.ceil() as i32,
        )
    }
}

bitflags::bitflags! {
    /// Which channels of a [`Color`] are statically known.
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
    )]
    pub struct ColorComponents: u8 {
        const R = 1 << 0;
        const G = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
        const RGB = Self::R.bits() | Self::G.bits() | Self::B.bits();
        const RGBA = Self::RGB.bits() | Self::A.bits();
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Builds a color from already-premultiplied channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: mul_div255_u8(u16::from(r), a16),
            g: mul_div255_u8(u16::from(g), a16),
            b: mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// All four channels set to `v`.
    pub const fn splat(v: u8) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn channel(self, idx: usize) -> u8 {
        match idx {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => panic!("color channel index out of range: {idx}"),
        }
    }

    pub fn channel_mut(&mut self, idx: usize) -> &mut u8 {
        match idx {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            3 => &mut self.a,
            _ => panic!("color channel index out of range: {idx}"),
        }
    }

    /// Per-channel product, rounding like the CPU compositor.
    pub fn modulate(self, other: Color) -> Color {
        Color::new(
            mul_div255_u8(u16::from(self.r), u16::from(other.r)),
            mul_div255_u8(u16::from(self.g), u16::from(other.g)),
            mul_div255_u8(u16::from(self.b), u16::from(other.b)),
            mul_div255_u8(u16::from(self.a), u16::from(other.a)),
        )
    }

    pub fn scale(self, by: u8) -> Color {
        self.modulate(Color::splat(by))
    }
}

/// Channel flag for the `idx`th channel of a [`Color`].
pub(crate) fn component_flag(idx: usize) -> ColorComponents {
    match idx {
        0 => ColorComponents::R,
        1 => ColorComponents::G,
        2 => ColorComponents::B,
        _ => ColorComponents::A,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
