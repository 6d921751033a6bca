//! Ray-intersection queries against bodies.

use crate::{
    aa_box::AaBox,
    body::{
        BodyId,
        HALF_EXTENT,
    },
    registry::BodyRegistry,
    util_vec::normalized_or_zero,
};
use std::cmp::Ordering;
use vek::*;


/// Something bodies can be hit-tested against with a ray.
///
/// Normally the presentation layer's scene answers this, but `BodyRegistry` implements it
/// directly on the bodies' collision boxes.
pub trait RayQuery {
    /// Every body the ray from `start` in direction `dir` hits, nearest first.
    fn ray_hits(&self, start: Vec3<f32>, dir: Vec3<f32>) -> Vec<RayHit>;
}

/// A body hit by a ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Body that was hit.
    pub body: BodyId,
    /// Distance from the ray start to where it enters the body. Zero if it starts inside.
    pub dist: f32,
    /// Exact position where the ray enters the body.
    pub pos: Vec3<f32>,
}

impl RayQuery for BodyRegistry {
    fn ray_hits(&self, start: Vec3<f32>, dir: Vec3<f32>) -> Vec<RayHit> {
        let dir = normalized_or_zero(dir);
        if dir == Vec3::zero() {
            return Vec::new();
        }

        let mut hits = self
            .iter()
            .filter_map(|(id, body)| AaBox::centered(body.pos, HALF_EXTENT)
                .ray_entry(start, dir)
                .map(|dist| RayHit {
                    body: id,
                    dist,
                    pos: start + dir * dist,
                }))
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| a.dist.partial_cmp(&b.dist).unwrap_or(Ordering::Equal));
        hits
    }
}


#[test]
fn test_hits_are_nearest_first() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let mut rng = Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    let far = reg.spawn(Vec3::new(0.0, 2.0, -10.0), &mut rng);
    let _beside = reg.spawn(Vec3::new(3.0, 2.0, -5.0), &mut rng);
    let near = reg.spawn(Vec3::new(0.2, 2.0, -4.0), &mut rng);

    let hits = reg.ray_hits(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(hits.iter().map(|hit| hit.body).collect::<Vec<_>>(), vec![near, far]);
    assert!((hits[0].dist - 3.5).abs() < 1e-5);
    assert!((hits[1].pos - Vec3::new(0.0, 2.0, -9.5)).magnitude() < 1e-5);
}

#[test]
fn test_zero_direction_hits_nothing() {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    let mut rng = Pcg64Mcg::seed_from_u64(0);
    let mut reg = BodyRegistry::new();
    reg.spawn(Vec3::new(0.0, 0.5, 0.0), &mut rng);
    assert!(reg.ray_hits(Vec3::new(0.0, 0.5, 0.0), Vec3::zero()).is_empty());
}
