//! Collision of bodies with each other.
//!
//! Narrow phase only: every active body is tested against every other active body, with no
//! spatial acceleration structure. That's fine for tens of bodies. A broad phase could be
//! layered in front of `resolve_contact` without changing it.
//!
//! Each body resolves its own contacts, moving only itself, against where the other bodies were
//! at the start of the pass. So both bodies of an overlapping pair each move half the
//! penetration away from each other, and a body overlapping several others is pushed by each
//! of them in turn, which can over-correct. That's a known approximation and stacking behavior
//! depends on it.

use crate::{
    axis::PerAxis,
    body::{
        Body,
        BodyId,
        CUBE_SIZE,
    },
    config::PhysicsConfig,
    registry::BodyRegistry,
};
use rand::Rng;
use vek::*;


/// Contact resolved by `resolve_contact`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Contact {
    /// Unit normal, pointing from the other body toward this body.
    pub normal: Vec3<f32>,
    /// Overlap along the normal before resolution.
    pub penetration: f32,
    /// Whether the body was moving into the other body, and so bounced.
    pub bounced: bool,
}

/// Resolve every overlapping pair of bodies that aren't held. Returns the number of contacts
/// resolved, counting each pair once from each side.
pub fn resolve_pairs<R: Rng>(
    registry: &mut BodyRegistry,
    cfg: &PhysicsConfig,
    rng: &mut R,
) -> usize {
    let others = registry
        .iter()
        .filter(|(_, body)| !body.is_held())
        .map(|(id, body)| (id, body.pos))
        .collect::<Vec<_>>();

    let mut contacts = 0;
    registry.for_each_active(|id, body| {
        for &(other_id, other_pos) in &others {
            if other_id == id {
                continue;
            }
            if let Some(contact) = resolve_contact(body, id, other_pos, other_id, cfg, rng) {
                trace!(?id, ?other_id, ?contact, "cube contact");
                contacts += 1;
            }
        }
    });
    contacts
}

/// Resolve `body` against one other body centered at `other_pos`, moving only `body`.
///
/// The bodies overlap if their centers are less than a cube apart on every axis. The contact
/// normal is along the axis of least penetration, which is the axis the centers are furthest
/// apart on, with ties going to X, then Y, then Z. If the centers coincide on that axis, the
/// body with the greater id is the one on the positive side.
pub fn resolve_contact<R: Rng>(
    body: &mut Body,
    id: BodyId,
    other_pos: Vec3<f32>,
    other_id: BodyId,
    cfg: &PhysicsConfig,
    rng: &mut R,
) -> Option<Contact> {
    let diff = body.pos - other_pos;
    let sep = PerAxis::from(diff.map(f32::abs));
    if !sep.into_iter().all(|d| d < CUBE_SIZE) {
        return None;
    }

    let axis = sep.max_axis();
    let sign =
        if diff[axis as usize] > 0.0 || (diff[axis as usize] == 0.0 && id > other_id) {
            1.0
        } else {
            -1.0
        };
    let normal = axis.to_vec() * sign;

    // push apart
    let penetration = CUBE_SIZE - sep.max_value();
    body.pos += normal * penetration * 0.5;

    // bounce, if approaching
    let dot = body.vel.dot(normal);
    let bounced = dot < 0.0;
    if bounced {
        body.vel -= normal * 2.0 * dot;
        body.vel *= cfg.damping;

        let spin = body.vel.magnitude() * cfg.contact_spin;
        body.ang_vel += Vec3::new(
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
        ) * spin;

        // tangential friction
        let along = normal * body.vel.dot(normal);
        let lateral = body.vel - along;
        body.vel = lateral * cfg.friction + along;
    }

    Some(Contact {
        normal,
        penetration,
        bounced,
    })
}


#[test]
fn test_overlapping_pair_separates_along_x() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(9);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::new(0.0, 1.0, 0.0), &mut rng);
    let b = reg.spawn(Vec3::new(0.5, 1.0, 0.0), &mut rng);
    let cfg = PhysicsConfig::default();

    let contacts = resolve_pairs(&mut reg, &cfg, &mut rng);
    assert_eq!(contacts, 2);

    let pa = reg.get(a).pos;
    let pb = reg.get(b).pos;
    assert!((pb.x - pa.x) - 0.5 >= 0.5 - 1e-6);
    assert_eq!(pa.y, 1.0);
    assert_eq!(pb.y, 1.0);
    assert_eq!(pa.z, 0.0);
    assert_eq!(pb.z, 0.0);
    // at rest, so only pushed
    assert_eq!(reg.get(a).vel, Vec3::zero());
    assert_eq!(reg.get(b).vel, Vec3::zero());
}

#[test]
fn test_middle_of_a_row_is_pushed_by_both_neighbors() {
    use rand::SeedableRng;

    // Known approximation: each body resolves against every neighbor from where they started,
    // so one pass over-corrects a body squeezed between two others, and the outer bodies move
    // further apart than their overlaps alone call for.
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(9);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::new(0.0, 1.0, 0.0), &mut rng);
    let b = reg.spawn(Vec3::new(0.4, 1.0, 0.0), &mut rng);
    let c = reg.spawn(Vec3::new(0.8, 1.0, 0.0), &mut rng);

    let contacts = resolve_pairs(&mut reg, &PhysicsConfig::default(), &mut rng);
    // a is already clear of c by the time it's tested against it
    assert_eq!(contacts, 5);

    assert!((reg.get(a).pos.x - -0.3).abs() < 1e-5);
    // pushed +0.3 by a then -0.45 by c
    assert!((reg.get(b).pos.x - 0.25).abs() < 1e-5);
    // pushed +0.1 by a then +0.25 by b
    assert!((reg.get(c).pos.x - 1.15).abs() < 1e-5);

    // b and c no longer sit a cube apart, and a and c are pushed wider than a row of cubes
    assert!(reg.get(c).pos.x - reg.get(b).pos.x < 1.0);
    assert!(reg.get(c).pos.x - reg.get(a).pos.x > 1.4);
    for id in [a, b, c] {
        assert_eq!(reg.get(id).pos.y, 1.0);
        assert_eq!(reg.get(id).pos.z, 0.0);
    }
}

#[test]
fn test_normal_is_axis_of_least_penetration() {
    use rand::SeedableRng;

    let cfg = PhysicsConfig::default();
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let cases = [
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.3, 0.6, 0.1), Vec3::new(0.0, -1.0, 0.0)),
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.2, -0.1, -0.7), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(-0.4, 0.4, 0.4), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -0.4, 0.4), Vec3::new(0.0, 1.0, 0.0)),
    ];
    for (pos, other, expected) in cases {
        let mut body = Body::new(pos, &mut rng);
        let contact =
            resolve_contact(&mut body, BodyId(0), other, BodyId(1), &cfg, &mut rng).unwrap();
        assert_eq!(contact.normal, expected);

        // the separation on the normal's axis grew
        let axis = (0..3).find(|&i| expected[i] != 0.0).unwrap();
        assert!((body.pos[axis] - other[axis]).abs() > (pos[axis] - other[axis]).abs());
    }
}

#[test]
fn test_distant_bodies_do_not_touch() {
    use rand::SeedableRng;

    let cfg = PhysicsConfig::default();
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut body = Body::new(Vec3::zero(), &mut rng);
    let other = Vec3::new(0.2, 1.0, 0.2);
    assert_eq!(resolve_contact(&mut body, BodyId(0), other, BodyId(1), &cfg, &mut rng), None);
    assert_eq!(body.pos, Vec3::zero());
}

#[test]
fn test_approaching_body_bounces_with_damping_and_friction() {
    use rand::SeedableRng;

    let cfg = PhysicsConfig::default();
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut body = Body::new(Vec3::new(0.0, 1.0, 0.0), &mut rng);
    body.vel = Vec3::new(2.0, 0.0, 1.0);

    let other = Vec3::new(0.5, 1.0, 0.0);
    let contact =
        resolve_contact(&mut body, BodyId(0), other, BodyId(1), &cfg, &mut rng).unwrap();
    assert!(contact.bounced);
    assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));
    assert!((body.vel - Vec3::new(-0.6, 0.0, 0.24)).magnitude() < 1e-5);
    assert!((body.pos.x - -0.25).abs() < 1e-6);
}

#[test]
fn test_separating_body_keeps_velocity() {
    use rand::SeedableRng;

    let cfg = PhysicsConfig::default();
    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(0);
    let mut body = Body::new(Vec3::new(0.0, 1.0, 0.0), &mut rng);
    body.vel = Vec3::new(-1.0, 0.5, 0.0);

    let other = Vec3::new(0.5, 1.0, 0.0);
    let contact =
        resolve_contact(&mut body, BodyId(0), other, BodyId(1), &cfg, &mut rng).unwrap();
    assert!(!contact.bounced);
    assert_eq!(body.vel, Vec3::new(-1.0, 0.5, 0.0));
    assert_eq!(body.ang_vel, Vec3::zero());
}

#[test]
fn test_coincident_bodies_split_apart() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(9);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::new(3.0, 2.0, 3.0), &mut rng);
    let b = reg.spawn(Vec3::new(3.0, 2.0, 3.0), &mut rng);
    resolve_pairs(&mut reg, &PhysicsConfig::default(), &mut rng);
    assert!(reg.get(b).pos.x - reg.get(a).pos.x >= 1.0 - 1e-6);
}

#[test]
fn test_held_bodies_are_ignored() {
    use rand::SeedableRng;

    let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(9);
    let mut reg = BodyRegistry::new();
    let a = reg.spawn(Vec3::new(0.0, 1.0, 0.0), &mut rng);
    let b = reg.spawn(Vec3::new(0.5, 1.0, 0.0), &mut rng);
    reg.set_held(b, true);
    assert_eq!(resolve_pairs(&mut reg, &PhysicsConfig::default(), &mut rng), 0);
    assert_eq!(reg.get(a).pos, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(reg.get(b).pos, Vec3::new(0.5, 1.0, 0.0));
}
