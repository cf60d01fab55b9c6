use super::*;
use kurbo::Circle;

#[test]
fn empty_stack_is_wide_open_with_device_bounds() {
    let stack = ClipStack::new();
    assert!(stack.is_wide_open());
    assert_eq!(
        stack.conservative_bounds(IPoint::ZERO, 100, 50),
        (IRect::from_wh(100, 50), true)
    );
}

#[test]
fn intersected_rects_are_exact() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 40.0, 40.0), RegionOp::Intersect, false);
    stack.push_rect(Rect::new(10.0, 10.0, 60.0, 60.0), RegionOp::Intersect, false);
    assert!(!stack.is_wide_open());
    assert_eq!(
        stack.conservative_bounds(IPoint::ZERO, 100, 100),
        (IRect::from_ltrb(10, 10, 40, 40), true)
    );
}

#[test]
fn origin_translates_bounds() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RegionOp::Intersect, false);
    let (bounds, exact) = stack.conservative_bounds(IPoint::new(5, 7), 100, 100);
    assert_eq!(bounds, IRect::from_ltrb(5, 7, 15, 17));
    assert!(exact);
}

#[test]
fn aa_and_path_elements_are_not_exact() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RegionOp::Intersect, true);
    assert!(!stack.conservative_bounds(IPoint::ZERO, 100, 100).1);

    let mut stack = ClipStack::new();
    stack.push_path(
        Circle::new((20.0, 20.0), 5.0).to_path(0.1),
        RegionOp::Intersect,
        false,
    );
    let (bounds, exact) = stack.conservative_bounds(IPoint::ZERO, 100, 100);
    assert!(!exact);
    assert!(bounds.contains(&IRect::from_ltrb(15, 15, 25, 25)));
}

#[test]
fn difference_keeps_prior_bound_and_union_widens() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RegionOp::Intersect, false);
    stack.push_rect(Rect::new(2.0, 2.0, 4.0, 4.0), RegionOp::Difference, false);
    assert_eq!(
        stack.conservative_bounds(IPoint::ZERO, 100, 100),
        (IRect::from_ltrb(0, 0, 10, 10), false)
    );

    stack.push_rect(Rect::new(20.0, 20.0, 30.0, 30.0), RegionOp::Union, false);
    assert_eq!(
        stack.conservative_bounds(IPoint::ZERO, 100, 100).0,
        IRect::from_ltrb(0, 0, 30, 30)
    );
}

#[test]
fn bounds_are_clamped_to_device() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(-10.0, -10.0, 500.0, 500.0), RegionOp::Replace, false);
    assert_eq!(
        stack.conservative_bounds(IPoint::ZERO, 64, 32).0,
        IRect::from_wh(64, 32)
    );
}

#[test]
fn region_op_parse_accepts_kebab_names() {
    assert_eq!(
        RegionOp::parse("reverse-difference").unwrap(),
        RegionOp::ReverseDifference
    );
    assert_eq!(RegionOp::parse(" Union ").unwrap(), RegionOp::Union);
    assert!(RegionOp::parse("nand").is_err());
}

#[test]
fn as_path_covers_every_element() {
    let mut stack = ClipStack::new();
    stack.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RegionOp::Intersect, false);
    stack.push_rect(Rect::new(20.0, 0.0, 30.0, 10.0), RegionOp::Union, false);
    let bbox = stack.as_path().bounding_box();
    assert_eq!(bbox, Rect::new(0.0, 0.0, 30.0, 10.0));
}
