use super::*;

#[test]
fn normalize_angle_lands_in_unit_turn() {
    assert_eq!(normalize_angle(0.0), 0.0);
    assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
    assert!(normalize_angle(-1e-18) < TAU);
}

#[test]
fn wrapping_range_covers_zero() {
    let r = AngleRange::from_degrees(350.0, 10.0);
    assert!(r.contains(0.0));
    assert!(r.contains(deg_to_rad(355.0)));
    assert!(r.contains(deg_to_rad(5.0)));
    assert!(!r.contains(deg_to_rad(180.0)));
}

#[test]
fn plain_range_is_inclusive() {
    let r = AngleRange::from_degrees(0.0, 90.0);
    assert!(r.contains(0.0));
    assert!(r.contains(deg_to_rad(90.0)));
    assert!(!r.contains(deg_to_rad(91.0)));
    // y-down: (0, 1) points at 90 degrees.
    assert!(r.contains_vector(0.0, 1.0));
    assert!(!r.contains_vector(0.0, -1.0));
}

#[test]
fn full_turn_contains_everything() {
    let r = AngleRange::from_degrees(0.0, 360.0);
    assert!(r.is_full());
    for deg in [0.0, 45.0, 181.0, 359.0] {
        assert!(r.contains(deg_to_rad(deg)));
    }
}

#[test]
fn integral_detection_uses_epsilon() {
    assert!(is_integral(3.0));
    assert!(is_integral(3.0 + 1e-9));
    assert!(!is_integral(3.5));
    assert_eq!(round_px(2.5), 3);
    assert_eq!(round_px(-2.5), -2);
    assert_eq!(round_px(-2.6), -3);
}
