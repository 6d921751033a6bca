//! Cosmetic squash-and-stretch animation.

use crate::body::Body;
use vek::*;


/// Advance a body's squash phase by `dt` seconds and rederive its scale.
///
/// Stretching on Y is twice the squashing on X and Z. This only affects how the body is drawn;
/// collision always uses the fixed unit extent.
pub fn animate(body: &mut Body, dt: f32) {
    body.squash.phase += dt * body.squash.speed;
    let factor = body.squash.phase.sin() * body.squash.amount;
    body.scale = Vec3::new(
        1.0 - factor,
        1.0 + factor * 2.0,
        1.0 - factor,
    );
}


#[test]
fn test_squash_scale() {
    use crate::body::Squash;
    use rand::SeedableRng;

    let mut body = Body::new(Vec3::zero(), &mut rand_pcg::Pcg64Mcg::seed_from_u64(0));
    body.squash = Squash {
        phase: 0.0,
        speed: 1.0,
        amount: 0.2,
    };
    animate(&mut body, std::f32::consts::FRAC_PI_2);
    assert!((body.scale - Vec3::new(0.8, 1.4, 0.8)).magnitude() < 1e-5);

    // scale stays positive across the whole cycle
    for _ in 0..100 {
        animate(&mut body, 0.1);
        assert!(body.scale.into_iter().all(|n| n > 0.0));
    }
}
