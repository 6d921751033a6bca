//! Axis enum and per-axis storage.

use std::ops::Index;
use vek::*;


/// One of the three world axes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Axis {
    X,
    Y,
    Z,
}

pub const NUM_AXES: usize = 3;

/// All axes, in tie-break order.
pub const AXES: PerAxis<Axis> = PerAxis([Axis::X, Axis::Y, Axis::Z]);

impl Axis {
    /// Unit vector pointing in the positive direction of this axis.
    pub fn to_vec(self) -> Vec3<f32> {
        let mut v = Vec3::zero();
        v[self as usize] = 1.0;
        v
    }
}

/// A value for each axis, indexable by `Axis`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PerAxis<T>(pub [T; NUM_AXES]);

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, i: Axis) -> &Self::Output {
        &self.0[i as usize]
    }
}

impl<T: Copy> From<Vec3<T>> for PerAxis<T> {
    fn from(v: Vec3<T>) -> Self {
        PerAxis([v.x, v.y, v.z])
    }
}

impl PerAxis<f32> {
    /// The axis with the greatest value. Ties go to whichever axis comes first in `AXES`.
    pub fn max_axis(&self) -> Axis {
        let mut best = Axis::X;
        for axis in AXES.0 {
            if self[axis] > self[best] {
                best = axis;
            }
        }
        best
    }

    /// The greatest value.
    pub fn max_value(&self) -> f32 {
        self[self.max_axis()]
    }
}

impl<T> IntoIterator for PerAxis<T> {
    type Item = T;
    type IntoIter = <[T; NUM_AXES] as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}


#[test]
fn test_max_axis_tie_break() {
    assert_eq!(PerAxis([0.5, 0.0, 0.0]).max_axis(), Axis::X);
    assert_eq!(PerAxis([0.2, 0.7, 0.1]).max_axis(), Axis::Y);
    assert_eq!(PerAxis([0.3, 0.3, 0.3]).max_axis(), Axis::X);
    assert_eq!(PerAxis([0.1, 0.3, 0.3]).max_axis(), Axis::Y);
    assert_eq!(PerAxis([0.1, 0.2, 0.3]).max_axis(), Axis::Z);
}
