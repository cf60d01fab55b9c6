use kurbo::Shape;

use crate::foundation::core::{BezPath, IPoint, IRect, Rect};
use crate::foundation::error::{DrawStateError, DrawStateResult};

/// Boolean operator combining a new clip element (or coverage) with what came before.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionOp {
    Difference,
    Intersect,
    Union,
    Xor,
    ReverseDifference,
    Replace,
}

impl RegionOp {
    pub fn parse(name: &str) -> DrawStateResult<Self> {
        Ok(match name.trim().to_ascii_lowercase().as_str() {
            "difference" => Self::Difference,
            "intersect" => Self::Intersect,
            "union" => Self::Union,
            "xor" => Self::Xor,
            "reverse-difference" => Self::ReverseDifference,
            "replace" => Self::Replace,
            other => {
                return Err(DrawStateError::validation(format!(
                    "unknown region op '{other}'"
                )));
            }
        })
    }
}

/// Geometry of one clip element, in the stack's own (pre-origin) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    Rect(Rect),
    Path(BezPath),
}

impl ClipShape {
    pub fn bounds(&self) -> Rect {
        match self {
            ClipShape::Rect(r) => *r,
            ClipShape::Path(p) => p.bounding_box(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipElement {
    pub shape: ClipShape,
    pub op: RegionOp,
    pub anti_alias: bool,
}

impl ClipElement {
    /// Whether this element contributes pixel-exact rect bounds.
    fn is_exact_rect(&self) -> bool {
        matches!(self.shape, ClipShape::Rect(_))
            && !self.anti_alias
            && matches!(self.op, RegionOp::Intersect | RegionOp::Replace)
    }
}

/// Ordered sequence of clip operations, shared into a [`super::ClipDescriptor`] by `Rc`.
///
/// Only conservative bounds are derived here. Building exact clip masks from the element list is
/// the clip-mask backend's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipStack {
    elements: Vec<ClipElement>,
}

impl ClipStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rect(&mut self, rect: Rect, op: RegionOp, anti_alias: bool) {
        self.elements.push(ClipElement {
            shape: ClipShape::Rect(rect),
            op,
            anti_alias,
        });
    }

    pub fn push_path(&mut self, path: BezPath, op: RegionOp, anti_alias: bool) {
        self.elements.push(ClipElement {
            shape: ClipShape::Path(path),
            op,
            anti_alias,
        });
    }

    pub fn elements(&self) -> &[ClipElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// A stack with no elements restricts nothing.
    pub fn is_wide_open(&self) -> bool {
        self.elements.is_empty()
    }

    /// Device-space bound of the clipped area for a `width` x `height` device, with the stack
    /// translated by `origin`. The flag is true when the bound is the exact clip.
    pub fn conservative_bounds(&self, origin: IPoint, width: i32, height: i32) -> (IRect, bool) {
        let device = IRect::from_wh(width, height);
        // `None` means "everything so far".
        let mut bound: Option<IRect> = None;
        let mut exact = true;

        for element in &self.elements {
            let shape = IRect::round_out(&element.shape.bounds()).offset(origin);
            exact &= element.is_exact_rect();
            bound = match element.op {
                RegionOp::Intersect => Some(match bound {
                    None => shape,
                    Some(b) => b.intersect(&shape).unwrap_or(IRect::EMPTY),
                }),
                RegionOp::Replace => Some(shape),
                RegionOp::Union | RegionOp::Xor | RegionOp::ReverseDifference => {
                    bound.map(|b| b.join(&shape))
                }
                RegionOp::Difference => bound,
            };
        }

        let out = match bound {
            None => device,
            Some(b) => b.intersect(&device).unwrap_or(IRect::EMPTY),
        };
        (out, exact)
    }

    /// Outline of every element, for debug visuals and path-based clip rendering.
    pub fn as_path(&self) -> BezPath {
        let mut out = BezPath::new();
        for element in &self.elements {
            match &element.shape {
                ClipShape::Rect(r) => out.extend(r.path_elements(0.1)),
                ClipShape::Path(p) => out.extend(p.elements().iter().copied()),
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/stack.rs"]
mod tests;
