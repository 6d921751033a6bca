//! Vector utilities.

use vek::*;


/// Normalize `v`, or return the zero vector if `v` has no length to normalize.
///
/// Directions derived from player input or camera state go through this rather than
/// `Vec3::normalized`, which divides by zero and poisons state with NaN on a zero vector.
pub fn normalized_or_zero(v: Vec3<f32>) -> Vec3<f32> {
    let mag = v.magnitude();
    if mag > 0.0 && mag.is_finite() {
        v / mag
    } else {
        Vec3::zero()
    }
}

/// 2D version of `normalized_or_zero`.
pub fn normalized_or_zero_2d(v: Vec2<f32>) -> Vec2<f32> {
    let mag = v.magnitude();
    if mag > 0.0 && mag.is_finite() {
        v / mag
    } else {
        Vec2::zero()
    }
}


#[test]
fn test_normalize_zero_guard() {
    assert_eq!(normalized_or_zero(Vec3::zero()), Vec3::zero());
    assert_eq!(normalized_or_zero_2d(Vec2::zero()), Vec2::zero());
    assert!(normalized_or_zero(Vec3::zero()).into_iter().all(f32::is_finite));

    let n = normalized_or_zero(Vec3::new(3.0, 0.0, 4.0));
    assert!((n.magnitude() - 1.0).abs() < 1e-6);
    assert!((n.x - 0.6).abs() < 1e-6);
    assert!((n.z - 0.8).abs() < 1e-6);

    let n = normalized_or_zero_2d(Vec2::new(1.0, 1.0));
    assert!((n.magnitude() - 1.0).abs() < 1e-6);
}
