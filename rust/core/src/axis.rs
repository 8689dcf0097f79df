// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid axes and the canonical clique frame.
//!
//! Clique tests are written once, in a canonical frame where the clique
//! axis is local `y` and the clique plane is spanned by local `x` (`u`) and
//! local `z` (`v`). Each [`Axis`] carries the cyclic rotation that maps this
//! frame onto world coordinates, so the K1/K2 detectors and the K2 mask
//! lookup share one formula instead of three sign-flipped copies.
//!
//! | axis | local `(a, b, c)` → world `(x, y, z)` |
//! |------|---------------------------------------|
//! | `Y`  | `(a, b, c)` |
//! | `X`  | `(b, c, a)` |
//! | `Z`  | `(c, a, b)` |

use crate::error::Error;
use crate::voxel::VoxelCoord;

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit step along the axis, in world coordinates.
    pub fn unit(self) -> VoxelCoord {
        self.to_world(VoxelCoord::new(0, 1, 0))
    }

    /// The two in-plane unit vectors `(u, v)` of the plane normal to this axis.
    pub fn in_plane(self) -> (VoxelCoord, VoxelCoord) {
        (
            self.to_world(VoxelCoord::new(1, 0, 0)),
            self.to_world(VoxelCoord::new(0, 0, 1)),
        )
    }

    /// Rotates an offset from the canonical frame into world coordinates.
    pub fn to_world(self, local: VoxelCoord) -> VoxelCoord {
        let VoxelCoord { x: a, y: b, z: c } = local;
        match self {
            Axis::Y => VoxelCoord::new(a, b, c),
            Axis::X => VoxelCoord::new(b, c, a),
            Axis::Z => VoxelCoord::new(c, a, b),
        }
    }

    /// Inverse of [`to_world`](Self::to_world).
    pub fn to_local(self, world: VoxelCoord) -> VoxelCoord {
        let VoxelCoord { x, y, z } = world;
        match self {
            Axis::Y => VoxelCoord::new(x, y, z),
            Axis::X => VoxelCoord::new(z, x, y),
            Axis::Z => VoxelCoord::new(y, z, x),
        }
    }

    /// Returns the axis along which `delta` is non-zero, if it is non-zero
    /// along exactly one axis.
    pub fn of_delta(delta: VoxelCoord) -> Option<Axis> {
        match (delta.x != 0, delta.y != 0, delta.z != 0) {
            (true, false, false) => Some(Axis::X),
            (false, true, false) => Some(Axis::Y),
            (false, false, true) => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the axis name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => {
                tracing::warn!(index = other, "Rejected axis index");
                Err(Error::InvalidAxis(other))
            }
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: VoxelCoord, b: VoxelCoord) -> i32 {
        a.x * b.x + a.y * b.y + a.z * b.z
    }

    #[test]
    fn units_match_axes() {
        assert_eq!(Axis::X.unit(), VoxelCoord::new(1, 0, 0));
        assert_eq!(Axis::Y.unit(), VoxelCoord::new(0, 1, 0));
        assert_eq!(Axis::Z.unit(), VoxelCoord::new(0, 0, 1));
    }

    #[test]
    fn plane_vectors_are_orthogonal_to_axis() {
        for axis in Axis::ALL {
            let (u, v) = axis.in_plane();
            let n = axis.unit();
            assert_eq!(dot(u, n), 0, "{axis}");
            assert_eq!(dot(v, n), 0, "{axis}");
            assert_eq!(dot(u, v), 0, "{axis}");
            assert_eq!(u.nonzero_count(), 1);
            assert_eq!(v.nonzero_count(), 1);
        }
    }

    #[test]
    fn rotation_round_trips() {
        for axis in Axis::ALL {
            for x in -1..=1 {
                for y in -1..=1 {
                    for z in -1..=1 {
                        let c = VoxelCoord::new(x, y, z);
                        assert_eq!(axis.to_local(axis.to_world(c)), c);
                        assert_eq!(axis.to_world(axis.to_local(c)), c);
                    }
                }
            }
        }
    }

    #[test]
    fn rotations_are_proper() {
        // Cyclic permutations preserve handedness: u x axis == v.
        for axis in Axis::ALL {
            let (u, v) = axis.in_plane();
            let n = axis.unit();
            let cross = VoxelCoord::new(
                u.y * n.z - u.z * n.y,
                u.z * n.x - u.x * n.z,
                u.x * n.y - u.y * n.x,
            );
            assert_eq!(cross, v, "{axis}");
        }
    }

    #[test]
    fn axis_of_delta() {
        assert_eq!(Axis::of_delta(VoxelCoord::new(0, -1, 0)), Some(Axis::Y));
        assert_eq!(Axis::of_delta(VoxelCoord::new(0, 0, 2)), Some(Axis::Z));
        assert_eq!(Axis::of_delta(VoxelCoord::new(1, 1, 0)), None);
        assert_eq!(Axis::of_delta(VoxelCoord::ORIGIN), None);
    }

    #[test]
    fn raw_axis_indices() {
        assert_eq!(Axis::try_from(0u8), Ok(Axis::X));
        assert_eq!(Axis::try_from(2u8), Ok(Axis::Z));
        assert_eq!(Axis::try_from(3u8), Err(Error::InvalidAxis(3)));
    }
}
