// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Voxel state, topological class tags and integer coordinates.

use std::ops::{Add, Neg, Sub};

/// Linear index of a voxel in the padded storage of a [`crate::VoxelGrid`].
pub type VoxelId = usize;

/// Topological class of a foreground voxel.
///
/// Only [`Interior`](TopologicalClass::Interior) and
/// [`Border`](TopologicalClass::Border) are ever computed; the curve and
/// surface classes exist so callers can tag voxels themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TopologicalClass {
    #[default]
    Unclassified,
    Interior,
    Isolated,
    Border,
    CurvePoint,
    CurveJunction,
    SurfaceCurveJunction,
    SurfaceJunction,
}

impl TopologicalClass {
    /// Returns the class name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologicalClass::Unclassified => "Unclassified",
            TopologicalClass::Interior => "Interior",
            TopologicalClass::Isolated => "Isolated",
            TopologicalClass::Border => "Border",
            TopologicalClass::CurvePoint => "CurvePoint",
            TopologicalClass::CurveJunction => "CurveJunction",
            TopologicalClass::SurfaceCurveJunction => "SurfaceCurveJunction",
            TopologicalClass::SurfaceJunction => "SurfaceJunction",
        }
    }
}

impl std::fmt::Display for TopologicalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a single voxel.
///
/// `Voxel::default()` is what out-of-range reads return: off and
/// unclassified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voxel {
    pub on: bool,
    pub class: TopologicalClass,
    /// Transient marker for external tooling; ignored by every algorithm here.
    pub selected: bool,
}

/// Signed logical coordinates of a voxel.
///
/// Logical coordinates run from `0` to `dim - 1`; the ghost border sits at
/// `-1` and `dim`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const ORIGIN: VoxelCoord = VoxelCoord::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns `self` shifted by `(dx, dy, dz)`.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Number of non-zero components.
    pub fn nonzero_count(self) -> usize {
        [self.x, self.y, self.z].iter().filter(|c| **c != 0).count()
    }

    /// Largest absolute component (Chebyshev norm).
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    pub fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for VoxelCoord {
    type Output = VoxelCoord;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for VoxelCoord {
    type Output = VoxelCoord;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for VoxelCoord {
    type Output = VoxelCoord;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
