use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn desktop_uses_smaller_viewport_side() {
    let p = ScalePolicy::default();
    let s = p.scale_for(Size::new(8.0, 4.0), 1920.0);
    assert!(approx(s, 1.15));
}

#[test]
fn breakpoints_shrink_small_screens() {
    let p = ScalePolicy::default();
    let vp = Size::new(4.0, 6.0);
    assert!(approx(p.scale_for(vp, 320.0), 0.7 * 1.15));
    assert!(approx(p.scale_for(vp, 600.0), 0.8 * 1.15));
    assert!(approx(p.scale_for(vp, 900.0), 0.9 * 1.15));
    assert!(approx(p.scale_for(vp, 1024.0), 1.15));
}

#[test]
fn result_is_clamped() {
    let p = ScalePolicy::default();
    assert_eq!(p.scale_for(Size::new(100.0, 100.0), 1920.0), 1.8);
    assert_eq!(p.scale_for(Size::new(0.1, 0.1), 320.0), 0.4);
}

#[test]
fn unsorted_breakpoints_still_pick_narrowest_match() {
    let mut p = ScalePolicy::default();
    p.breakpoints.reverse();
    assert!(approx(p.scale_for(Size::new(4.0, 4.0), 320.0), 0.7 * 1.15));
}

#[test]
fn invalid_bounds_are_rejected() {
    let p = ScalePolicy {
        min: 2.0,
        max: 1.0,
        ..ScalePolicy::default()
    };
    assert!(p.validate().is_err());
    ScalePolicy::default().validate().unwrap();
}
