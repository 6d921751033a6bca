//! Damping of residual jitter for bodies resting on the floor.

use crate::{
    body::{
        Body,
        HALF_EXTENT,
    },
    config::PhysicsConfig,
};


/// If the body is resting on the floor with near-zero vertical speed, damp its horizontal
/// velocity and its spin. Returns whether it was damped.
///
/// Must run after collision resolution, so that it sees the tick's final position.
pub fn stabilize(body: &mut Body, cfg: &PhysicsConfig) -> bool {
    let resting =
        body.vel.y.abs() < cfg.rest_speed
        && body.pos.y <= HALF_EXTENT + cfg.rest_tolerance;
    if resting {
        body.vel.x *= cfg.rest_damping;
        body.vel.z *= cfg.rest_damping;
        body.ang_vel *= cfg.angular_drag;
    }
    resting
}


#[test]
fn test_stabilize_resting_only() {
    use rand::SeedableRng;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);

    let mut resting = Body::new(Vec3::new(0.0, 0.505, 0.0), &mut rng);
    resting.vel = Vec3::new(1.0, 0.05, -2.0);
    resting.ang_vel = Vec3::new(1.0, 1.0, 1.0);
    assert!(stabilize(&mut resting, &cfg));
    assert!((resting.vel - Vec3::new(0.92, 0.05, -1.84)).magnitude() < 1e-6);
    assert!((resting.ang_vel - Vec3::from(0.98)).magnitude() < 1e-6);

    let mut falling = Body::new(Vec3::new(0.0, 0.5, 0.0), &mut rng);
    falling.vel = Vec3::new(1.0, -0.5, 0.0);
    assert!(!stabilize(&mut falling, &cfg));
    assert_eq!(falling.vel, Vec3::new(1.0, -0.5, 0.0));

    let mut stacked = Body::new(Vec3::new(0.0, 1.5, 0.0), &mut rng);
    stacked.vel = Vec3::new(1.0, 0.0, 0.0);
    assert!(!stabilize(&mut stacked, &cfg));
}
