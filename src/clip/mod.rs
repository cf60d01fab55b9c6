//! Clip descriptors attached to a single draw.
//!
//! A [`ClipDescriptor`] is either wide open, a device-space integer rect, or a shared
//! [`ClipStack`] plus the origin that positions it relative to the device. Only the stack
//! variant carries a non-zero origin; this lets a layer device reuse the clip stack of its root
//! device.

pub mod stack;

use std::rc::Rc;

use crate::foundation::core::{IPoint, IRect, Rect};
use crate::target::RenderTarget;

pub use stack::{ClipElement, ClipShape, ClipStack, RegionOp};

/// Discriminant of a [`ClipDescriptor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipKind {
    WideOpen,
    Rect,
    Stack,
}

/// The active clip for one draw.
#[derive(Clone, Debug, Default)]
pub enum ClipDescriptor {
    #[default]
    WideOpen,
    Rect(IRect),
    /// Never holds a stack that reports itself wide open; see [`ClipDescriptor::from_stack`].
    Stack { stack: Rc<ClipStack>, origin: IPoint },
}

impl ClipDescriptor {
    pub fn wide_open() -> Self {
        Self::WideOpen
    }

    pub fn from_rect(bounds: IRect) -> Self {
        Self::Rect(bounds)
    }

    /// Shares `stack`, collapsing to [`ClipDescriptor::WideOpen`] when it restricts nothing.
    pub fn from_stack(stack: Rc<ClipStack>, origin: Option<IPoint>) -> Self {
        if stack.is_wide_open() {
            Self::WideOpen
        } else {
            Self::Stack {
                stack,
                origin: origin.unwrap_or(IPoint::ZERO),
            }
        }
    }

    /// Replaces the clip with `stack`, releasing any previously held stack first.
    pub fn set_stack(&mut self, stack: Rc<ClipStack>, origin: Option<IPoint>) {
        *self = Self::from_stack(stack, origin);
    }

    /// Releases any held stack and becomes wide open.
    pub fn reset(&mut self) {
        *self = Self::WideOpen;
    }

    pub fn kind(&self) -> ClipKind {
        match self {
            Self::WideOpen => ClipKind::WideOpen,
            Self::Rect(_) => ClipKind::Rect,
            Self::Stack { .. } => ClipKind::Stack,
        }
    }

    /// Bounds of a rect clip.
    ///
    /// # Panics
    /// If the clip is not [`ClipKind::Rect`]; check [`ClipDescriptor::kind`] first.
    pub fn irect(&self) -> &IRect {
        match self {
            Self::Rect(r) => r,
            other => panic!("irect() called on {:?} clip", other.kind()),
        }
    }

    /// The shared stack of a stack clip.
    ///
    /// # Panics
    /// If the clip is not [`ClipKind::Stack`].
    pub fn clip_stack(&self) -> &Rc<ClipStack> {
        match self {
            Self::Stack { stack, .. } => stack,
            other => panic!("clip_stack() called on {:?} clip", other.kind()),
        }
    }

    /// Translation of the stack in device space; zero for every other variant.
    pub fn origin(&self) -> IPoint {
        match self {
            Self::Stack { origin, .. } => *origin,
            Self::WideOpen | Self::Rect(_) => IPoint::ZERO,
        }
    }

    pub fn is_wide_open(&self) -> bool {
        match self {
            Self::WideOpen => true,
            Self::Stack { stack, .. } => stack.is_wide_open(),
            Self::Rect(_) => false,
        }
    }

    /// True if drawing inside `area` would not be restricted by this clip.
    pub fn is_wide_open_for(&self, area: &IRect) -> bool {
        match self {
            Self::Rect(r) => r.contains(area),
            _ => self.is_wide_open(),
        }
    }

    /// Float-rect variant of [`ClipDescriptor::is_wide_open_for`].
    pub fn is_wide_open_for_rect(&self, area: &Rect) -> bool {
        match self {
            Self::Rect(r) => r.contains_rect(area),
            _ => self.is_wide_open(),
        }
    }

    /// Returns a device-space rect guaranteed to contain the clipped area of a `width` x `height`
    /// device, and whether that rect is exactly the clip.
    pub fn conservative_bounds(&self, width: i32, height: i32) -> (IRect, bool) {
        let device = IRect::from_wh(width, height);
        match self {
            Self::WideOpen => (device, true),
            Self::Rect(r) => (r.intersect(&device).unwrap_or(IRect::EMPTY), true),
            Self::Stack { stack, origin } => stack.conservative_bounds(*origin, width, height),
        }
    }

    /// [`ClipDescriptor::conservative_bounds`] for the dimensions of `target`.
    pub fn conservative_bounds_for(&self, target: &RenderTarget) -> (IRect, bool) {
        let b = target.bounds();
        self.conservative_bounds(b.width(), b.height())
    }
}

impl PartialEq for ClipDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::WideOpen, Self::WideOpen) => true,
            (Self::Rect(a), Self::Rect(b)) => a == b,
            (
                Self::Stack {
                    stack: a,
                    origin: oa,
                },
                Self::Stack {
                    stack: b,
                    origin: ob,
                },
            ) => oa == ob && (Rc::ptr_eq(a, b) || **a == **b),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/descriptor.rs"]
mod tests;
