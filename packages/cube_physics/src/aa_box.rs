//! Axis-aligned box.

use vek::*;


/// Axis-aligned box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaBox {
    /// Box minimum corner position.
    pub pos: Vec3<f32>,
    /// Box extent from `pos`. Assumed to be non-negative.
    pub ext: Extent3<f32>,
}

impl AaBox {
    /// Cube centered on `center` which extends `half_extent` in each direction on each axis.
    pub fn centered(center: Vec3<f32>, half_extent: f32) -> Self {
        AaBox {
            pos: center - Vec3::from(half_extent),
            ext: Extent3::from(half_extent * 2.0),
        }
    }

    /// Box maximum corner position.
    pub fn max(self) -> Vec3<f32> {
        self.pos + self.ext
    }

    /// Distance along the ray from `start` in direction `dir` at which the ray enters self, if it
    /// does so at a non-negative distance. Zero if `start` is inside self.
    ///
    /// Slab method: intersect the parameter intervals within which the ray lies between each
    /// pair of parallel faces.
    pub fn ray_entry(self, start: Vec3<f32>, dir: Vec3<f32>) -> Option<f32> {
        let max = self.max();
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for i in 0..3 {
            if dir[i] == 0.0 {
                // parallel to this pair of faces, so it's either always or never between them
                if start[i] < self.pos[i] || start[i] > max[i] {
                    return None;
                }
            } else {
                let mut t0 = (self.pos[i] - start[i]) / dir[i];
                let mut t1 = (max[i] - start[i]) / dir[i];
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = f32::max(t_min, t0);
                t_max = f32::min(t_max, t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(t_min)
    }
}


#[test]
fn test_centered_box() {
    let a = AaBox::centered(Vec3::new(0.0, 1.0, 0.0), 0.5);
    assert_eq!(a.pos, Vec3::new(-0.5, 0.5, -0.5));
    assert_eq!(a.max(), Vec3::new(0.5, 1.5, 0.5));
}

#[test]
fn test_ray_entry() {
    let b = AaBox::centered(Vec3::new(5.0, 0.0, 0.0), 0.5);

    // straight on
    let t = b.ray_entry(Vec3::zero(), Vec3::unit_x()).unwrap();
    assert!((t - 4.5).abs() < 1e-5);

    // pointing away
    assert_eq!(b.ray_entry(Vec3::zero(), -Vec3::unit_x()), None);

    // parallel and beside it
    assert_eq!(b.ray_entry(Vec3::new(0.0, 2.0, 0.0), Vec3::unit_x()), None);

    // starting inside
    assert_eq!(b.ray_entry(Vec3::new(5.0, 0.0, 0.0), Vec3::unit_y()), Some(0.0));
}
