// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-grid critical-clique extraction.
//!
//! Every on voxel is visited once, in true-voxel order, and used as the
//! anchor for a fixed set of candidate cliques. Anchors are chosen so that
//! each critical clique in the grid is reported exactly once:
//!
//! - 2-cliques are anchored at the lower voxel of the pair.
//! - 1-cliques are anchored at the `(-u, -v)` corner of the square when it
//!   is on, otherwise at the `(-u, +v)` corner.
//! - 0-cliques are reported by their smallest on member id.

use smallvec::smallvec;

use crate::axis::Axis;
use crate::cliques::{CliqueMembers, Cube, Square};
use crate::grid::VoxelGrid;
use crate::voxel::VoxelId;

/// In-plane sign pairs of the four cubes anchored at a voxel. Each cube
/// extends towards `+z`.
const CUBE_SIGNS: [[i32; 3]; 4] = [[1, 1, 1], [-1, 1, 1], [1, -1, 1], [-1, -1, 1]];

/// Clique dimension, from a single voxel (3) down to a unit cube (0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CliqueDimension {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl CliqueDimension {
    /// Highest dimension first, matching the order of extraction.
    pub const ALL: [CliqueDimension; 4] = [
        CliqueDimension::Three,
        CliqueDimension::Two,
        CliqueDimension::One,
        CliqueDimension::Zero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CliqueDimension::Zero => "K0",
            CliqueDimension::One => "K1",
            CliqueDimension::Two => "K2",
            CliqueDimension::Three => "K3",
        }
    }
}

impl std::fmt::Display for CliqueDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Critical cliques of a grid, grouped by dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalCliques {
    /// Non-simple voxels.
    pub three: Vec<CliqueMembers>,
    /// Critical face-adjacent pairs.
    pub two: Vec<CliqueMembers>,
    /// Critical unit squares (on corners only).
    pub one: Vec<CliqueMembers>,
    /// Critical unit cubes (on corners only).
    pub zero: Vec<CliqueMembers>,
}

impl CriticalCliques {
    pub fn of_dimension(&self, dimension: CliqueDimension) -> &[CliqueMembers] {
        match dimension {
            CliqueDimension::Three => &self.three,
            CliqueDimension::Two => &self.two,
            CliqueDimension::One => &self.one,
            CliqueDimension::Zero => &self.zero,
        }
    }

    /// Counts as `[K3, K2, K1, K0]`.
    pub fn counts(&self) -> [usize; 4] {
        [
            self.three.len(),
            self.two.len(),
            self.one.len(),
            self.zero.len(),
        ]
    }

    pub fn total(&self) -> usize {
        self.counts().iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl VoxelGrid {
    /// Finds every critical clique in the grid.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_kernels_core::VoxelGrid;
    ///
    /// let mut grid = VoxelGrid::new(3, 3, 3).unwrap();
    /// grid.set_at(1, 1, 1, true).unwrap();
    ///
    /// let cliques = grid.extract_all_cliques();
    /// assert_eq!(cliques.counts(), [1, 0, 0, 0]);
    /// ```
    pub fn extract_all_cliques(&self) -> CriticalCliques {
        let mut cliques = CriticalCliques::default();

        for &id in &self.true_voxels {
            let Some(a) = self.id_to_coordinates(id) else {
                continue;
            };

            if !self.is_simple_coord(a) {
                cliques.three.push(smallvec![id]);
            }

            for axis in Axis::ALL {
                if self.is_critical_2_clique_coord(a, axis) {
                    if let Some(b) = self.on_id(a + axis.unit()) {
                        cliques.two.push(smallvec![id, b]);
                    }
                }
            }

            for axis in Axis::ALL {
                let standard = Square::standard(a, axis);
                if self.is_critical_1_clique(&standard, axis) {
                    cliques.one.push(self.on_members(&standard.corners()));
                }

                let (_, v) = axis.in_plane();
                if self.is_on_coord(a - v) {
                    continue;
                }
                let rotated = Square::rotated(a, axis);
                if self.is_critical_1_clique(&rotated, axis) {
                    cliques.one.push(self.on_members(&rotated.corners()));
                }
            }

            for signs in CUBE_SIGNS {
                let cube = Cube::from_anchor(a, signs);
                if !self.is_critical_0_clique(&cube) {
                    continue;
                }
                let members = self.on_members(cube.corners());
                if min_member(&members) == Some(id) {
                    cliques.zero.push(members);
                }
            }
        }

        let [k3, k2, k1, k0] = cliques.counts();
        tracing::debug!(
            on = self.true_voxels.len(),
            k3,
            k2,
            k1,
            k0,
            "Extracted critical cliques"
        );

        cliques
    }
}

fn min_member(members: &CliqueMembers) -> Option<VoxelId> {
    members.iter().copied().min()
}
