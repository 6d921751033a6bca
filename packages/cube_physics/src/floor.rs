//! Collision of bodies with the ground plane.

use crate::{
    body::{
        Body,
        HALF_EXTENT,
    },
    config::PhysicsConfig,
};
use rand::Rng;


/// Push a body out of the floor, and bounce it if it was moving into the floor.
///
/// A bounce reflects and scales down vertical velocity by restitution, applies ground friction
/// horizontally, and adds a random spin about X and Z proportional to the resulting speed.
/// Returns whether the body bounced.
pub fn resolve_floor<R: Rng>(body: &mut Body, cfg: &PhysicsConfig, rng: &mut R) -> bool {
    if body.pos.y >= HALF_EXTENT {
        return false;
    }

    body.pos.y = HALF_EXTENT;
    if body.vel.y >= 0.0 {
        return false;
    }

    let impact = body.vel.y;
    body.vel.y = -body.vel.y * cfg.restitution;
    body.vel.x *= cfg.ground_friction;
    body.vel.z *= cfg.ground_friction;

    let spin = body.vel.magnitude() * cfg.floor_spin;
    body.ang_vel.x += (rng.gen::<f32>() - 0.5) * spin;
    body.ang_vel.z += (rng.gen::<f32>() - 0.5) * spin;

    trace!(%impact, bounce = %body.vel.y, "floor bounce");
    true
}


#[test]
fn test_bounce_uses_restitution_and_friction() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(3);
    let mut b = Body::new(Vec3::new(0.0, 0.3, 0.0), &mut rng);
    b.vel = Vec3::new(2.0, -4.0, -1.0);

    assert!(resolve_floor(&mut b, &cfg, &mut rng));
    assert_eq!(b.pos.y, HALF_EXTENT);
    assert!((b.vel.y - 1.2).abs() < 1e-6);
    assert!((b.vel.x - 1.4).abs() < 1e-6);
    assert!((b.vel.z - -0.7).abs() < 1e-6);
    assert_eq!(b.ang_vel.y, 0.0);

    let max_spin = b.vel.magnitude() * cfg.floor_spin * 0.5;
    assert!(b.ang_vel.x.abs() <= max_spin);
    assert!(b.ang_vel.z.abs() <= max_spin);
}

#[test]
fn test_rising_body_is_clamped_silently() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(3);
    let mut b = Body::new(Vec3::new(0.0, 0.2, 0.0), &mut rng);
    b.vel = Vec3::new(1.0, 0.5, 0.0);

    assert!(!resolve_floor(&mut b, &cfg, &mut rng));
    assert_eq!(b.pos.y, HALF_EXTENT);
    assert_eq!(b.vel, Vec3::new(1.0, 0.5, 0.0));
    assert_eq!(b.ang_vel, Vec3::zero());
}

#[test]
fn test_airborne_body_is_untouched() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use vek::*;

    let cfg = PhysicsConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(3);
    let mut b = Body::new(Vec3::new(0.0, 0.5, 0.0), &mut rng);
    b.vel = Vec3::new(0.0, -3.0, 0.0);
    let before = b.clone();

    assert!(!resolve_floor(&mut b, &cfg, &mut rng));
    assert_eq!(b, before);
}
