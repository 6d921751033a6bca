//! Numeric integration of a body's motion.

use crate::{
    body::Body,
    config::PhysicsConfig,
};


/// Advance a body's position and rotation by `dt` seconds, applying gravity and rotational
/// damping.
///
/// Rotational damping is exponential in `dt`, so it decays at the same rate per second
/// regardless of how a second is divided into steps.
pub fn integrate(body: &mut Body, dt: f32, cfg: &PhysicsConfig) {
    body.vel.y += cfg.gravity * dt;
    body.pos += body.vel * dt;
    body.rot += body.ang_vel * dt;
    body.ang_vel *= cfg.rotational_damping.powf(dt);
}


#[test]
fn test_gravity_then_position() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut b = Body::new(Vec3::new(0.0, 5.0, 0.0), &mut Pcg64Mcg::seed_from_u64(1));
    b.vel = Vec3::new(1.0, 0.0, -2.0);
    integrate(&mut b, 0.5, &cfg);
    // velocity is updated before position
    assert!((b.vel.y - -4.9).abs() < 1e-5);
    assert!((b.pos.y - (5.0 - 4.9 * 0.5)).abs() < 1e-5);
    assert!((b.pos.x - 0.5).abs() < 1e-5);
    assert!((b.pos.z - -1.0).abs() < 1e-5);
}

#[test]
fn test_rotational_damping_is_step_independent() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut one_step = Body::new(Vec3::new(0.0, 5.0, 0.0), &mut Pcg64Mcg::seed_from_u64(1));
    let mut two_steps = Body::new(Vec3::new(0.0, 5.0, 0.0), &mut Pcg64Mcg::seed_from_u64(1));
    one_step.ang_vel = Vec3::new(2.0, -1.0, 4.0);
    two_steps.ang_vel = one_step.ang_vel;

    integrate(&mut one_step, 0.1, &cfg);
    integrate(&mut two_steps, 0.05, &cfg);
    integrate(&mut two_steps, 0.05, &cfg);

    for i in 0..3 {
        assert!((one_step.ang_vel[i] - two_steps.ang_vel[i]).abs() < 1e-5);
    }
    assert!((one_step.ang_vel.x - 2.0 * 0.95f32.powf(0.1)).abs() < 1e-6);
}

#[test]
fn test_rotation_accumulates() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut b = Body::new(Vec3::new(0.0, 5.0, 0.0), &mut Pcg64Mcg::seed_from_u64(1));
    b.ang_vel = Vec3::new(1.0, 2.0, 3.0);
    integrate(&mut b, 0.1, &cfg);
    assert!((b.rot - Vec3::new(0.1, 0.2, 0.3)).magnitude() < 1e-6);
}
