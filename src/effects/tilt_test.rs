use super::*;

const CARD: CardRect = CardRect {
    left: 100.0,
    top: 50.0,
    width: 200.0,
    height: 100.0,
};

#[test]
fn centre_of_card_is_zero_offset() {
    assert_eq!(pointer_offset(CARD, 200.0, 100.0), Some((0.0, 0.0)));
}

#[test]
fn corners_are_half_offsets() {
    assert_eq!(pointer_offset(CARD, 100.0, 50.0), Some((-0.5, -0.5)));
    assert_eq!(pointer_offset(CARD, 300.0, 150.0), Some((0.5, 0.5)));
}

#[test]
fn collapsed_card_has_no_offset() {
    let rect = CardRect { width: 0.0, ..CARD };
    assert_eq!(pointer_offset(rect, 10.0, 10.0), None);
}

#[test]
fn tilt_leans_toward_pointer() {
    assert_eq!(
        tilt_transform(0.5, -0.5, 10.0),
        "perspective(800px) rotateY(5deg) rotateX(5deg) scale(1.02)"
    );
    assert_eq!(
        tilt_transform(-0.25, 0.5, 10.0),
        "perspective(800px) rotateY(-2.5deg) rotateX(-5deg) scale(1.02)"
    );
}

#[test]
fn default_factor_leans_at_most_five_degrees() {
    let factor = crate::config::SiteConfig::default().tilt_factor_deg;
    let (x, y) = pointer_offset(CARD, 300.0, 50.0).expect("inside card");
    assert_eq!(
        tilt_transform(x, y, factor),
        "perspective(800px) rotateY(5deg) rotateX(5deg) scale(1.02)"
    );
}
