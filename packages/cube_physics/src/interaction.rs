//! Player interaction with bodies: spawning, throwing, picking up, and carrying.
//!
//! These only mutate bodies through `BodyRegistry` methods. Which body is held is tracked by the
//! registry, not here.

use crate::{
    body::BodyId,
    config::InteractionConfig,
    raycast::RayHit,
    registry::BodyRegistry,
    util_vec::normalized_or_zero,
};
use rand::Rng;
use vek::*;


/// Where the viewer is and which way they're facing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewpoint {
    pub pos: Vec3<f32>,
    /// Unit facing direction, or zero if the facing direction is degenerate.
    pub dir: Vec3<f32>,
}

impl Viewpoint {
    /// Construct, normalizing `dir`.
    pub fn new(pos: Vec3<f32>, dir: Vec3<f32>) -> Self {
        Viewpoint {
            pos,
            dir: normalized_or_zero(dir),
        }
    }

    /// The point `dist` units ahead of the viewer.
    pub fn ahead(&self, dist: f32) -> Vec3<f32> {
        self.pos + self.dir * dist
    }
}

/// Velocity and spin to give a body thrown in `dir`, which should be normalized.
pub fn throw_motion<R: Rng>(
    dir: Vec3<f32>,
    cfg: &InteractionConfig,
    rng: &mut R,
) -> (Vec3<f32>, Vec3<f32>) {
    let vel = dir * cfg.throw_speed;
    let ang_vel = Vec3::new(
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
    ) * cfg.throw_spin;
    (vel, ang_vel)
}

/// Spawn a body ahead of the viewer and throw it the way they're facing.
///
/// Does nothing and returns `None` if the viewer has no facing direction.
pub fn spawn_and_throw<R: Rng>(
    registry: &mut BodyRegistry,
    view: &Viewpoint,
    cfg: &InteractionConfig,
    rng: &mut R,
) -> Option<BodyId> {
    if view.dir == Vec3::zero() {
        warn!("not spawning cube, viewer has no facing direction");
        return None;
    }
    let id = registry.spawn(view.ahead(cfg.spawn_distance), rng);
    let (vel, ang_vel) = throw_motion(view.dir, cfg, rng);
    registry.set_motion(id, vel, ang_vel);
    debug!(?id, "spawned and threw cube");
    Some(id)
}

/// Pick up the first body in `hits` that is pickable and not already held, stopping it dead.
///
/// `hits` should be ordered nearest first, as `RayQuery` returns them. Does nothing if a body is
/// already held.
pub fn pick_up(registry: &mut BodyRegistry, hits: &[RayHit]) -> Option<BodyId> {
    if registry.held().is_some() {
        return None;
    }
    let id = hits
        .iter()
        .map(|hit| hit.body)
        .find(|&id| {
            let body = registry.get(id);
            body.pickable && !body.is_held()
        })?;
    registry.set_held(id, true);
    registry.set_motion(id, Vec3::zero(), Vec3::zero());
    debug!(?id, "picked up cube");
    Some(id)
}

/// Move the held body, if any, a fixed fraction of the way toward the point it's carried at.
pub fn carry(registry: &mut BodyRegistry, view: &Viewpoint, cfg: &InteractionConfig) {
    let Some(id) = registry.held() else { return };
    if view.dir == Vec3::zero() {
        return;
    }
    let target = view.ahead(cfg.hold_distance);
    let body = registry.get_mut(id);
    body.pos += (target - body.pos) * cfg.carry_blend;
}

/// Release the held body, if any, and throw it the way the viewer is facing.
///
/// If the viewer has no facing direction the body is dropped with only spin.
pub fn release_and_throw<R: Rng>(
    registry: &mut BodyRegistry,
    view: &Viewpoint,
    cfg: &InteractionConfig,
    rng: &mut R,
) -> Option<BodyId> {
    let id = registry.held()?;
    registry.set_held(id, false);
    let (vel, ang_vel) = throw_motion(view.dir, cfg, rng);
    registry.set_motion(id, vel, ang_vel);
    debug!(?id, "released and threw cube");
    Some(id)
}


#[test]
fn test_spawn_and_throw_ahead_of_viewer() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let cfg = InteractionConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(4);
    let mut reg = BodyRegistry::new();
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0));

    let id = spawn_and_throw(&mut reg, &view, &cfg, &mut rng).unwrap();
    let body = reg.get(id);
    assert!((body.pos - Vec3::new(0.0, 2.0, -3.0)).magnitude() < 1e-6);
    assert!((body.vel - Vec3::new(0.0, 0.0, -5.0)).magnitude() < 1e-6);
    assert!(body.ang_vel.into_iter().all(|n| (-2.5..=2.5).contains(&n)));
}

#[test]
fn test_degenerate_facing_spawns_nothing() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let cfg = InteractionConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(4);
    let mut reg = BodyRegistry::new();
    let view = Viewpoint::new(Vec3::zero(), Vec3::zero());
    assert_eq!(view.dir, Vec3::zero());
    assert_eq!(spawn_and_throw(&mut reg, &view, &cfg, &mut rng), None);
    assert!(reg.is_empty());
}

#[test]
fn test_pick_up_nearest_then_release() {
    use crate::raycast::RayQuery;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let cfg = InteractionConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(4);
    let mut reg = BodyRegistry::new();
    let far = reg.spawn(Vec3::new(0.0, 2.0, -8.0), &mut rng);
    let near = reg.spawn(Vec3::new(0.0, 2.0, -4.0), &mut rng);
    reg.set_motion(near, Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 0.0, 0.0));

    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0));
    let hits = reg.ray_hits(view.pos, view.dir);
    assert_eq!(pick_up(&mut reg, &hits), Some(near));
    assert_eq!(reg.held(), Some(near));
    assert_eq!(reg.get(near).vel, Vec3::zero());
    assert_eq!(reg.get(near).ang_vel, Vec3::zero());

    // only one body can be held at once
    let hits = reg.ray_hits(view.pos, view.dir);
    assert_eq!(hits.len(), 2);
    assert_eq!(pick_up(&mut reg, &hits), None);
    assert!(!reg.get(far).is_held());

    let released = release_and_throw(&mut reg, &view, &cfg, &mut rng);
    assert_eq!(released, Some(near));
    assert_eq!(reg.held(), None);
    assert!(!reg.get(near).is_held());
    assert!((reg.get(near).vel - Vec3::new(0.0, 0.0, -5.0)).magnitude() < 1e-6);
}

#[test]
fn test_pick_up_skips_held_and_unpickable() {
    use crate::raycast::RayQuery;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let mut rng = Pcg64Mcg::seed_from_u64(4);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::new(0.0, 2.0, -4.0), &mut rng);
    let b = reg.spawn(Vec3::new(0.0, 2.0, -6.0), &mut rng);
    reg.get_mut(a).pickable = false;

    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0));
    let hits = reg.ray_hits(view.pos, view.dir);
    assert_eq!(pick_up(&mut reg, &hits), Some(b));
    assert_eq!(pick_up(&mut reg, &hits), None);
}

#[test]
fn test_carry_blends_toward_hold_point() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let cfg = InteractionConfig::default();
    let mut rng = Pcg64Mcg::seed_from_u64(4);
    let mut reg = BodyRegistry::new();
    let id = reg.spawn(Vec3::new(10.0, 2.0, -3.0), &mut rng);
    reg.set_held(id, true);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0));

    carry(&mut reg, &view, &cfg);
    assert!((reg.get(id).pos - Vec3::new(9.0, 2.0, -3.0)).magnitude() < 1e-5);

    for _ in 0..200 {
        carry(&mut reg, &view, &cfg);
    }
    assert!((reg.get(id).pos - Vec3::new(0.0, 2.0, -3.0)).magnitude() < 1e-4);
}
