use super::*;
use crate::foundation::core::Color;

#[test]
fn stage_shares_processor_with_caller() {
    let fp: Rc<dyn FragmentProcessor> =
        ConstColorProcessor::new(Color::WHITE, ConstColorMode::ModulateRgba);
    let stage = FragmentStage::new(Rc::clone(&fp));
    assert!(Rc::ptr_eq(stage.processor(), &fp));
    assert_eq!(Rc::strong_count(&fp), 2);

    let copy = stage.clone();
    assert_eq!(Rc::strong_count(&fp), 3);
    drop(stage);
    drop(copy);
    assert_eq!(Rc::strong_count(&fp), 1);
}

#[test]
fn stage_reports_processor_name() {
    let stage = FragmentStage::new(ConstColorProcessor::new(
        Color::BLACK,
        ConstColorMode::Ignore,
    ));
    assert_eq!(stage.name(), "const_color");
    assert!(!stage.processor().will_read_dst());
    assert!(!stage.processor().will_read_fragment_position());
}
