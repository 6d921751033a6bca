//! Owner of all simulated bodies.

use crate::body::{
    Body,
    BodyId,
};
use slab::Slab;
use rand::Rng;
use vek::*;


/// Owns every `Body` and its kinematic state.
///
/// Bodies live in a slab and are addressed by `BodyId`. Nothing despawns bodies, so ids stay
/// valid for the registry's lifetime. Passing an id this registry never handed out is a
/// programming error and panics.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Slab<Body>,
    held: Option<BodyId>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a body at rest at `pos` with randomized squash parameters and colour.
    pub fn spawn<R: Rng>(&mut self, pos: Vec3<f32>, rng: &mut R) -> BodyId {
        let id = BodyId(self.bodies.insert(Body::new(pos, rng)));
        trace!(?id, ?pos, "spawned body");
        id
    }

    /// Get a body.
    pub fn get(&self, id: BodyId) -> &Body {
        self.bodies
            .get(id.0)
            .unwrap_or_else(|| panic!("invalid body id {:?}", id))
    }

    /// Mutably get a body. Its held flag can only be changed through `set_held`.
    pub fn get_mut(&mut self, id: BodyId) -> &mut Body {
        self.bodies
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("invalid body id {:?}", id))
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ids of all bodies, held or not, in spawn order.
    pub fn all(&self) -> impl Iterator<Item=BodyId> + '_ {
        self.bodies.iter().map(|(i, _)| BodyId(i))
    }

    /// All bodies, held or not, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item=(BodyId, &Body)> + '_ {
        self.bodies.iter().map(|(i, body)| (BodyId(i), body))
    }

    /// Call `f` on every body that isn't held, in spawn order.
    pub fn for_each_active<F>(&mut self, mut f: F)
    where
        F: FnMut(BodyId, &mut Body),
    {
        for (i, body) in self.bodies.iter_mut() {
            if !body.is_held() {
                f(BodyId(i), body);
            }
        }
    }

    /// The body currently held, if any.
    pub fn held(&self) -> Option<BodyId> {
        self.held
    }

    /// Mark a body as held or not held.
    ///
    /// At most one body may be held at a time. Holding a second body while another is held
    /// panics.
    pub fn set_held(&mut self, id: BodyId, held: bool) {
        if held {
            assert!(
                self.held.is_none() || self.held == Some(id),
                "cannot hold {:?} while already holding {:?}", id, self.held,
            );
        }
        self.get_mut(id).held = held;
        if held {
            self.held = Some(id);
        } else if self.held == Some(id) {
            self.held = None;
        }
    }

    /// Overwrite a body's linear and angular velocity.
    pub fn set_motion(&mut self, id: BodyId, vel: Vec3<f32>, ang_vel: Vec3<f32>) {
        let body = self.get_mut(id);
        body.vel = vel;
        body.ang_vel = ang_vel;
    }
}


#[test]
fn test_spawn_starts_at_rest() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    let id = reg.spawn(Vec3::new(1.0, 2.0, 3.0), &mut rng);
    let body = reg.get(id);
    assert_eq!(body.pos, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(body.vel, Vec3::zero());
    assert_eq!(body.ang_vel, Vec3::zero());
    assert!(body.pickable);
    assert!(!body.is_held());
    assert!(body.squash.amount >= 0.1 && body.squash.amount < 0.3);
    assert!(body.squash.speed >= 0.5 && body.squash.speed < 2.0);
}

#[test]
fn test_held_bodies_are_not_active() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::zero(), &mut rng);
    let b = reg.spawn(Vec3::zero(), &mut rng);
    reg.set_held(a, true);
    assert_eq!(reg.held(), Some(a));

    let mut active = Vec::new();
    reg.for_each_active(|id, _| active.push(id));
    assert_eq!(active, vec![b]);
    assert_eq!(reg.all().collect::<Vec<_>>(), vec![a, b]);

    reg.set_held(a, false);
    assert_eq!(reg.held(), None);
}

#[test]
fn test_held_flag_follows_registry() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::zero(), &mut rng);
    let b = reg.spawn(Vec3::zero(), &mut rng);

    // moving a body through get_mut leaves it unheld
    reg.get_mut(b).pos = Vec3::new(0.0, 3.0, 0.0);
    assert!(!reg.get(b).is_held());

    reg.set_held(b, true);
    assert!(reg.get(b).is_held());
    assert!(!reg.get(a).is_held());
    let held = reg.iter().filter(|(_, body)| body.is_held()).map(|(id, _)| id).collect::<Vec<_>>();
    assert_eq!(held, reg.held().into_iter().collect::<Vec<_>>());

    reg.set_held(b, false);
    assert!(!reg.get(b).is_held());
    assert_eq!(reg.iter().filter(|(_, body)| body.is_held()).count(), 0);
}

#[test]
#[should_panic]
fn test_holding_two_bodies_panics() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::zero(), &mut rng);
    let b = reg.spawn(Vec3::zero(), &mut rng);
    reg.set_held(a, true);
    reg.set_held(b, true);
}

#[test]
#[should_panic]
fn test_invalid_id_panics() {
    let reg = BodyRegistry::new();
    reg.get(BodyId(7));
}
