//! The cube simulation as a whole.

use crate::{
    body::{
        BodyId,
        BodyTransform,
        HALF_EXTENT,
    },
    config::{
        PhysicsConfig,
        InteractionConfig,
    },
    registry::BodyRegistry,
    raycast::{
        RayQuery,
        RayHit,
    },
    interaction::{
        self,
        Viewpoint,
    },
    integrate::integrate,
    squash::animate,
    floor::resolve_floor,
    pairwise::resolve_pairs,
    stabilize::stabilize,
};
use rand::{
    Rng,
    SeedableRng,
};
use rand_pcg::Pcg64Mcg;
use vek::*;


/// Bodies, the constants they're simulated with, and the randomness they're simulated with.
#[derive(Debug, Clone)]
pub struct CubeWorld {
    pub registry: BodyRegistry,
    pub physics: PhysicsConfig,
    pub interaction: InteractionConfig,
    rng: Pcg64Mcg,
}

/// What happened during a `CubeWorld::simulate` call.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Time step actually simulated, after clamping.
    pub dt: f32,
    /// Number of bodies that bounced off the floor.
    pub floor_bounces: usize,
    /// Number of cube-cube contacts resolved, counting each side of a pair.
    pub contacts: usize,
    /// Number of bodies damped as resting.
    pub resting: usize,
}

/// Outcome of `CubeWorld::pick_up_or_release`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickUpOrRelease {
    PickedUp(BodyId),
    Released(BodyId),
    /// Nothing was held and nothing pickable was being looked at.
    Nothing,
}

impl CubeWorld {
    /// Empty world whose randomness is seeded from `seed`.
    pub fn new(physics: PhysicsConfig, interaction: InteractionConfig, seed: u64) -> Self {
        CubeWorld {
            registry: BodyRegistry::new(),
            physics,
            interaction,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Spawn a body at rest at `pos`.
    pub fn spawn(&mut self, pos: Vec3<f32>) -> BodyId {
        self.registry.spawn(pos, &mut self.rng)
    }

    /// Spawn `count` bodies at rest at positions uniformly distributed between `min` and `max`.
    ///
    /// The bounds may be equal on some axis, to scatter across a plane, or given in either order.
    pub fn spawn_scattered(&mut self, count: usize, min: Vec3<f32>, max: Vec3<f32>) {
        for _ in 0..count {
            let t = Vec3::new(self.rng.gen::<f32>(), self.rng.gen(), self.rng.gen());
            self.spawn(min + (max - min) * t);
        }
        debug!(%count, "scattered cubes");
    }

    /// Do one tick: simulate the bodies that aren't held, then carry the held body toward the
    /// viewer's hold point.
    pub fn step(&mut self, dt: f32, view: &Viewpoint) -> StepReport {
        let report = self.simulate(dt);
        interaction::carry(&mut self.registry, view, &self.interaction);
        report
    }

    /// Simulate the bodies that aren't held forward by `dt` seconds, clamped to the configured
    /// maximum step.
    pub fn simulate(&mut self, dt: f32) -> StepReport {
        let dt = f32::min(dt, self.physics.max_step);
        let cfg = &self.physics;
        let rng = &mut self.rng;
        let mut report = StepReport {
            dt,
            ..StepReport::default()
        };

        self.registry.for_each_active(|_, body| integrate(body, dt, cfg));
        self.registry.for_each_active(|_, body| animate(body, dt));
        self.registry.for_each_active(|_, body| {
            if resolve_floor(body, cfg, rng) {
                report.floor_bounces += 1;
            }
        });
        report.contacts = resolve_pairs(&mut self.registry, cfg, rng);
        // contacts may push bodies back into the floor
        self.registry.for_each_active(|_, body| {
            body.pos.y = f32::max(body.pos.y, HALF_EXTENT);
        });
        self.registry.for_each_active(|_, body| {
            if stabilize(body, cfg) {
                report.resting += 1;
            }
        });

        report
    }

    /// Spawn a body ahead of the viewer and throw it.
    pub fn spawn_and_throw(&mut self, view: &Viewpoint) -> Option<BodyId> {
        interaction::spawn_and_throw(&mut self.registry, view, &self.interaction, &mut self.rng)
    }

    /// Throw the held body if there is one, otherwise pick up what the viewer is looking at,
    /// hit-testing against the bodies' own collision boxes.
    pub fn pick_up_or_release(&mut self, view: &Viewpoint) -> PickUpOrRelease {
        let hits = self.registry.ray_hits(view.pos, view.dir);
        self.pick_up_or_release_hits(view, &hits)
    }

    /// Version of `pick_up_or_release` which hit-tests with some external ray query.
    pub fn pick_up_or_release_with<Q: RayQuery>(
        &mut self,
        view: &Viewpoint,
        query: &Q,
    ) -> PickUpOrRelease {
        let hits = query.ray_hits(view.pos, view.dir);
        self.pick_up_or_release_hits(view, &hits)
    }

    fn pick_up_or_release_hits(
        &mut self,
        view: &Viewpoint,
        hits: &[RayHit],
    ) -> PickUpOrRelease {
        if self.registry.held().is_some() {
            interaction::release_and_throw(
                &mut self.registry,
                view,
                &self.interaction,
                &mut self.rng,
            )
                .map(PickUpOrRelease::Released)
                .unwrap_or(PickUpOrRelease::Nothing)
        } else {
            interaction::pick_up(&mut self.registry, hits)
                .map(PickUpOrRelease::PickedUp)
                .unwrap_or(PickUpOrRelease::Nothing)
        }
    }

    /// Transform of every body, for the presentation layer.
    pub fn transforms(&self) -> impl Iterator<Item=(BodyId, BodyTransform)> + '_ {
        self.registry.iter().map(|(id, body)| (id, body.transform()))
    }
}


#[test]
fn test_fall_and_bounce_from_height() {
    let dt = 1.0 / 60.0;
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let id = world.spawn(Vec3::new(0.0, 5.0, 0.0));

    let mut bounced = false;
    for _ in 0..1000 {
        let before = world.registry.get(id).clone();
        let impact = before.vel.y + world.physics.gravity * dt;
        let landing = before.pos.y + impact * dt < HALF_EXTENT;

        let report = world.simulate(dt);
        let after = world.registry.get(id);
        assert!(after.pos.y >= HALF_EXTENT);

        if landing {
            assert_eq!(report.floor_bounces, 1);
            assert_eq!(after.pos.y, HALF_EXTENT);
            assert!((after.vel.y - -impact * 0.3).abs() < 1e-5);
            assert_eq!(after.pos.x, 0.0);
            assert_eq!(after.pos.z, 0.0);
            bounced = true;
            break;
        } else {
            assert_eq!(report.floor_bounces, 0);
        }
    }
    assert!(bounced);
}

#[test]
fn test_floor_clamp_holds_for_a_pile() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    world.spawn_scattered(30, Vec3::new(-2.0, 1.0, -2.0), Vec3::new(2.0, 6.0, 2.0));
    for _ in 0..600 {
        world.step(1.0 / 60.0, &view);
        for (_, body) in world.registry.iter() {
            assert!(body.pos.y >= HALF_EXTENT);
            assert!(body.pos.into_iter().all(f32::is_finite));
            assert!(body.scale.into_iter().all(|n| n > 0.0));
        }
    }
}

#[test]
fn test_scatter_on_a_plane() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    world.spawn_scattered(5, Vec3::new(-2.0, 1.0, -2.0), Vec3::new(2.0, 1.0, 2.0));
    assert_eq!(world.registry.len(), 5);
    for (_, body) in world.registry.iter() {
        assert_eq!(body.pos.y, 1.0);
        assert!(body.pos.x >= -2.0 && body.pos.x <= 2.0);
        assert!(body.pos.z >= -2.0 && body.pos.z <= 2.0);
    }

    // bounds given backwards
    world.spawn_scattered(5, Vec3::new(3.0, 4.0, 3.0), Vec3::new(1.0, 2.0, 1.0));
    assert_eq!(world.registry.len(), 10);
    for (_, body) in world.registry.iter().skip(5) {
        assert!(body.pos.x >= 1.0 && body.pos.x <= 3.0);
        assert!(body.pos.y >= 2.0 && body.pos.y <= 4.0);
        assert!(body.pos.z >= 1.0 && body.pos.z <= 3.0);
    }

    // a single point
    let p = Vec3::new(7.0, 0.5, -7.0);
    world.spawn_scattered(2, p, p);
    assert_eq!(world.registry.get(BodyId(10)).pos, p);
    assert_eq!(world.registry.get(BodyId(11)).pos, p);
}

#[test]
fn test_held_body_keeps_its_velocity() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    let id = world.spawn(Vec3::new(0.0, 4.0, -3.0));
    world.registry.set_held(id, true);
    world.registry.set_motion(id, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 0.0));
    let scale = world.registry.get(id).scale;
    let squash = world.registry.get(id).squash;

    // another body overlapping it
    world.spawn(Vec3::new(0.2, 4.0, -3.0));

    for _ in 0..120 {
        world.step(1.0 / 60.0, &view);
        let body = world.registry.get(id);
        assert_eq!(body.vel, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.ang_vel, Vec3::new(-1.0, 0.5, 0.0));
        assert_eq!(body.scale, scale);
        assert_eq!(body.squash, squash);
    }
    // carried toward the hold point instead
    assert!((world.registry.get(id).pos - Vec3::new(0.0, 2.0, -3.0)).magnitude() < 1e-3);
}

#[test]
fn test_resting_body_settles() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let id = world.spawn(Vec3::new(0.0, HALF_EXTENT, 0.0));
    world.registry.set_motion(id, Vec3::new(1.0, 0.0, -0.5), Vec3::zero());

    let mut prev = world.registry.get(id).vel;
    for _ in 0..60 {
        let report = world.simulate(1.0 / 60.0);
        assert_eq!(report.resting, 1);

        let body = world.registry.get(id);
        // never visibly bounces
        assert!(body.vel.y.abs() < world.physics.rest_speed);
        assert!(body.vel.x.abs() < prev.x.abs());
        assert!(body.vel.z.abs() < prev.z.abs());
        assert!(body.vel.x.abs() <= prev.x.abs() * 0.92 + 1e-7);
        prev = body.vel;
    }
    assert!(prev.x.abs() < 1e-6);
}

#[test]
fn test_step_is_clamped() {
    let mut a = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let mut b = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    a.spawn(Vec3::new(0.0, 50.0, 0.0));
    b.spawn(Vec3::new(0.0, 50.0, 0.0));

    assert_eq!(a.simulate(5.0).dt, 0.1);
    b.simulate(0.1);
    assert_eq!(a.registry.get(BodyId(0)).pos, b.registry.get(BodyId(0)).pos);
}

#[test]
fn test_pick_up_carry_and_throw() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    let id = world.spawn(Vec3::new(0.0, 2.0, -6.0));

    assert_eq!(world.pick_up_or_release(&view), PickUpOrRelease::PickedUp(id));
    for _ in 0..10 {
        world.step(1.0 / 60.0, &view);
    }
    assert!(world.registry.get(id).pos.z > -6.0);

    assert_eq!(world.pick_up_or_release(&view), PickUpOrRelease::Released(id));
    assert!((world.registry.get(id).vel - Vec3::new(0.0, 0.0, -5.0)).magnitude() < 1e-6);

    // looking at the sky
    let up = Viewpoint::new(view.pos, Vec3::unit_y());
    assert_eq!(world.pick_up_or_release(&up), PickUpOrRelease::Nothing);
}

#[test]
fn test_pick_up_with_scene_ray_query() {
    // stands in for a presentation layer scene which orders hits its own way
    struct Scene(Vec<BodyId>);

    impl RayQuery for Scene {
        fn ray_hits(&self, start: Vec3<f32>, dir: Vec3<f32>) -> Vec<RayHit> {
            self.0
                .iter()
                .enumerate()
                .map(|(i, &body)| RayHit {
                    body,
                    dist: i as f32,
                    pos: start + dir * i as f32,
                })
                .collect()
        }
    }

    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    let near = world.spawn(Vec3::new(0.0, 2.0, -4.0));
    let far = world.spawn(Vec3::new(0.0, 2.0, -8.0));
    let aside = world.spawn(Vec3::new(20.0, 0.5, 20.0));
    assert_eq!(world.registry.ray_hits(view.pos, view.dir)[0].body, near);

    // the scene's first hit wins, even where the bodies' own boxes disagree
    let scene = Scene(vec![far, near]);
    assert_eq!(world.pick_up_or_release_with(&view, &scene), PickUpOrRelease::PickedUp(far));
    assert_eq!(world.registry.held(), Some(far));
    assert_eq!(world.pick_up_or_release_with(&view, &scene), PickUpOrRelease::Released(far));

    world.registry.get_mut(near).pickable = false;
    let scene = Scene(vec![near, aside]);
    assert_eq!(world.pick_up_or_release_with(&view, &scene), PickUpOrRelease::PickedUp(aside));
    assert_eq!(world.pick_up_or_release(&view), PickUpOrRelease::Released(aside));

    assert_eq!(world.pick_up_or_release_with(&view, &Scene(Vec::new())), PickUpOrRelease::Nothing);
}

#[test]
fn test_transforms_cover_every_body() {
    let mut world = CubeWorld::new(PhysicsConfig::default(), InteractionConfig::default(), 42);
    let view = Viewpoint::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    world.spawn_and_throw(&view).unwrap();
    world.spawn(Vec3::new(5.0, 1.0, 5.0));
    world.step(1.0 / 60.0, &view);
    let transforms = world.transforms().collect::<Vec<_>>();
    assert_eq!(transforms.len(), 2);
    assert_eq!(transforms[1].1.pos, world.registry.get(BodyId(1)).pos);
}
