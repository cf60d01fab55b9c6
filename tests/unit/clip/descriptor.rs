use super::*;

fn rect_stack(r: Rect) -> Rc<ClipStack> {
    let mut stack = ClipStack::new();
    stack.push_rect(r, RegionOp::Intersect, false);
    Rc::new(stack)
}

#[test]
fn default_is_wide_open() {
    let clip = ClipDescriptor::default();
    assert_eq!(clip.kind(), ClipKind::WideOpen);
    assert!(clip.is_wide_open());
    assert!(clip.is_wide_open_for(&IRect::from_wh(1000, 1000)));
    assert_eq!(clip.origin(), IPoint::ZERO);
}

#[test]
fn wide_open_stack_collapses() {
    let clip = ClipDescriptor::from_stack(Rc::new(ClipStack::new()), Some(IPoint::new(3, 4)));
    assert_eq!(clip.kind(), ClipKind::WideOpen);
    assert_eq!(clip, ClipDescriptor::wide_open());
    assert_eq!(clip.origin(), IPoint::ZERO);
}

#[test]
fn set_stack_collapses_and_releases_previous() {
    let held = rect_stack(Rect::new(0.0, 0.0, 5.0, 5.0));
    let mut clip = ClipDescriptor::from_stack(held.clone(), None);
    assert_eq!(Rc::strong_count(&held), 2);

    clip.set_stack(Rc::new(ClipStack::new()), None);
    assert_eq!(clip.kind(), ClipKind::WideOpen);
    assert_eq!(Rc::strong_count(&held), 1);
}

#[test]
fn clone_shares_stack_and_drop_releases() {
    let held = rect_stack(Rect::new(0.0, 0.0, 5.0, 5.0));
    let a = ClipDescriptor::from_stack(held.clone(), Some(IPoint::new(1, 1)));
    let b = a.clone();
    assert_eq!(Rc::strong_count(&held), 3);
    assert!(Rc::ptr_eq(a.clip_stack(), b.clip_stack()));
    assert_eq!(b.origin(), IPoint::new(1, 1));
    drop(a);
    drop(b);
    assert_eq!(Rc::strong_count(&held), 1);
}

#[test]
fn rect_clips_compare_by_bounds() {
    let a = ClipDescriptor::from_rect(IRect::from_ltrb(0, 0, 10, 10));
    let b = ClipDescriptor::from_rect(IRect::from_ltrb(0, 0, 10, 10));
    let c = ClipDescriptor::from_rect(IRect::from_ltrb(0, 0, 10, 11));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, ClipDescriptor::wide_open());
}

#[test]
fn stack_clips_compare_by_origin_and_contents() {
    let r = Rect::new(0.0, 0.0, 8.0, 8.0);
    let a = ClipDescriptor::from_stack(rect_stack(r), Some(IPoint::new(2, 2)));
    let b = ClipDescriptor::from_stack(rect_stack(r), Some(IPoint::new(2, 2)));
    let moved = ClipDescriptor::from_stack(rect_stack(r), Some(IPoint::new(0, 2)));
    let other = ClipDescriptor::from_stack(rect_stack(Rect::new(0.0, 0.0, 9.0, 8.0)), None);
    assert_eq!(a, b);
    assert_ne!(a, moved);
    assert_ne!(a, other);
    // Same region expressed as a rect clip is a different variant.
    assert_ne!(
        ClipDescriptor::from_stack(rect_stack(r), None),
        ClipDescriptor::from_rect(IRect::from_wh(8, 8))
    );
}

#[test]
fn equality_is_symmetric_and_transitive() {
    let r = Rect::new(1.0, 1.0, 4.0, 4.0);
    let clips = [
        ClipDescriptor::wide_open(),
        ClipDescriptor::from_stack(Rc::new(ClipStack::new()), None),
        ClipDescriptor::from_rect(IRect::from_wh(4, 4)),
        ClipDescriptor::from_rect(IRect::from_wh(4, 4)),
        ClipDescriptor::from_stack(rect_stack(r), None),
        ClipDescriptor::from_stack(rect_stack(r), None),
    ];
    for a in &clips {
        assert_eq!(a, a);
        for b in &clips {
            assert_eq!(a == b, b == a);
            for c in &clips {
                if a == b && b == c {
                    assert_eq!(a, c);
                }
            }
        }
    }
}

#[test]
fn rect_clip_is_wide_open_only_for_contained_areas() {
    let clip = ClipDescriptor::from_rect(IRect::from_ltrb(0, 0, 10, 10));
    assert!(!clip.is_wide_open());
    assert!(clip.is_wide_open_for(&IRect::from_ltrb(1, 1, 9, 9)));
    assert!(!clip.is_wide_open_for(&IRect::from_ltrb(1, 1, 11, 9)));
    assert!(clip.is_wide_open_for_rect(&Rect::new(0.5, 0.5, 9.5, 9.5)));
    assert!(!clip.is_wide_open_for_rect(&Rect::new(-0.5, 0.5, 9.5, 9.5)));
}

#[test]
fn stack_clip_is_not_wide_open() {
    let clip = ClipDescriptor::from_stack(rect_stack(Rect::new(0.0, 0.0, 5.0, 5.0)), None);
    assert!(!clip.is_wide_open());
    assert!(!clip.is_wide_open_for(&IRect::from_wh(1, 1)));
}

#[test]
fn conservative_bounds_per_variant() {
    assert_eq!(
        ClipDescriptor::wide_open().conservative_bounds(20, 10),
        (IRect::from_wh(20, 10), true)
    );
    assert_eq!(
        ClipDescriptor::from_rect(IRect::from_ltrb(-5, 2, 8, 40)).conservative_bounds(20, 10),
        (IRect::from_ltrb(0, 2, 8, 10), true)
    );

    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 4.0, 4.0), RegionOp::Intersect, true);
    let clip = ClipDescriptor::from_stack(Rc::new(stack), Some(IPoint::new(3, 3)));
    assert_eq!(
        clip.conservative_bounds(20, 10),
        (IRect::from_ltrb(3, 3, 7, 7), false)
    );
}

#[test]
fn conservative_bounds_for_target_uses_its_size() {
    use crate::target::{RenderTarget, SurfaceId};
    let rt = RenderTarget::new(SurfaceId(1), 32, 16);
    assert_eq!(
        ClipDescriptor::wide_open().conservative_bounds_for(&rt),
        (IRect::from_wh(32, 16), true)
    );
}

#[test]
#[should_panic(expected = "irect() called on")]
fn irect_on_wrong_variant_panics() {
    let _ = ClipDescriptor::wide_open().irect();
}

#[test]
#[should_panic(expected = "clip_stack() called on")]
fn clip_stack_on_wrong_variant_panics() {
    let _ = ClipDescriptor::from_rect(IRect::from_wh(1, 1)).clip_stack();
}
