use super::*;

#[test]
fn parse_accepts_kebab_case_names() {
    assert_eq!(BlendMode::parse("src-over").unwrap(), BlendMode::SrcOver);
    assert_eq!(BlendMode::parse(" Color-Dodge ").unwrap(), BlendMode::ColorDodge);
    assert_eq!(BlendMode::parse("src-atop").unwrap(), BlendMode::SrcATop);
    assert!(BlendMode::parse("sourceover").is_err());
}

#[test]
fn every_mode_round_trips_through_its_name() {
    for mode in BlendMode::ALL {
        let name = serde_json::to_string(&mode).unwrap();
        assert_eq!(BlendMode::parse(name.trim_matches('"')).unwrap(), mode);
    }
}

#[test]
fn coefficient_modes_stop_at_screen() {
    let coeff_modes = BlendMode::ALL
        .iter()
        .take_while(|m| m.is_coeff_mode())
        .count();
    assert_eq!(coeff_modes, 15);
    assert!(BlendMode::ALL[15..].iter().all(|m| !m.is_coeff_mode()));
}

#[test]
fn src_over_coefficients() {
    assert_eq!(
        BlendMode::SrcOver.coefficients(),
        Some((BlendCoeff::One, BlendCoeff::InvSrcAlpha))
    );
    assert_eq!(BlendMode::Multiply.coefficients(), None);
}

#[test]
fn non_separable_modes() {
    assert!(!BlendMode::Hue.is_separable());
    assert!(!BlendMode::Luminosity.is_separable());
    assert!(BlendMode::Multiply.is_separable());
}

#[test]
fn formula_dst_references() {
    assert!(!BlendFormula::REPLACE.references_dst());
    assert!(BlendFormula::NO_OP.references_dst());
    assert!(BlendFormula::add(BlendCoeff::DstAlpha, BlendCoeff::Zero).references_dst());

    let advanced = BlendFormula {
        equation: BlendEquation::Advanced(BlendMode::Overlay),
        src_coeff: BlendCoeff::One,
        dst_coeff: BlendCoeff::Zero,
    };
    assert!(advanced.references_dst());
}

#[test]
fn coefficient_classification() {
    assert!(BlendCoeff::InvDstColor.references_dst());
    assert!(BlendCoeff::DstAlpha.references_dst());
    assert!(!BlendCoeff::SrcAlpha.references_dst());
    assert!(!BlendCoeff::Src2Color.references_dst());
}
