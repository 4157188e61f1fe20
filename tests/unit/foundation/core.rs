use super::*;
use std::f64::consts::FRAC_PI_2;

#[test]
fn millis_since_saturates() {
    assert_eq!(Millis(700).since(Millis(200)), 500);
    assert_eq!(Millis(200).since(Millis(700)), 0);
    assert_eq!(Millis(u64::MAX).saturating_add(5), Millis(u64::MAX));
}

#[test]
fn millis_from_duration_truncates_sub_ms() {
    let d = std::time::Duration::from_micros(16_667);
    assert_eq!(Millis::from_duration(d), 16);
}

#[test]
fn transform_default_is_identity_scale() {
    let t = Transform3D::default();
    assert_eq!(t.position, DVec3::ZERO);
    assert_eq!(t.rotation, Euler::ZERO);
    assert_eq!(t.scale, DVec3::ONE);

    let t = Transform3D::at(DVec3::new(0.0, 0.0, -1.0), Euler::from_y(0.5)).with_uniform_scale(2.0);
    assert_eq!(t.scale, DVec3::splat(2.0));
    assert_eq!(t.position.z, -1.0);
    assert_eq!(t.rotation.y, 0.5);
}

#[test]
fn euler_applies_x_then_y_then_z() {
    assert!(Euler::ZERO.to_quat().abs_diff_eq(DQuat::IDENTITY, 1e-12));

    // Intrinsic XYZ: the X turn is outermost, so Z acts on the vector first.
    let e = Euler::new(FRAC_PI_2, 0.0, FRAC_PI_2);
    let v = e.to_quat() * DVec3::X;
    assert!(v.abs_diff_eq(DVec3::Z, 1e-12));

    let v = Euler::from_y(FRAC_PI_2).to_quat() * DVec3::X;
    assert!(v.abs_diff_eq(DVec3::NEG_Z, 1e-12));
}

#[test]
fn transform_matrix_scales_rotates_then_translates() {
    let t = Transform3D::at(DVec3::new(1.0, 2.0, 3.0), Euler::from_y(FRAC_PI_2))
        .with_uniform_scale(2.0);
    let p = t.to_matrix().transform_point3(DVec3::X);
    assert!(p.abs_diff_eq(DVec3::new(1.0, 2.0, 1.0), 1e-12));
    assert!(
        Transform3D::default()
            .to_matrix()
            .abs_diff_eq(DMat4::IDENTITY, 0.0)
    );
}
