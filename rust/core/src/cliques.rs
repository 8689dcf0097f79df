// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Critical-clique detectors.
//!
//! A clique is a set of mutually 0-adjacent voxel positions: a single voxel
//! (dimension 3), two face neighbours (2), a unit square (1) or a unit cube
//! (0). A clique is *critical* when the configuration around it matches the
//! corresponding mask K3..K0; critical cliques must not be fully removed by
//! a topology-preserving thinning step.
//!
//! K3 is the negation of the simple-point test and lives in
//! [`crate::simple`]. The K2 and K1 tests are written in the canonical
//! frame of [`Axis`] and rotated onto the requested axis.

use smallvec::SmallVec;

use crate::adjacency::AdjacencyKind;
use crate::axis::Axis;
use crate::grid::VoxelGrid;
use crate::voxel::{VoxelCoord, VoxelId};

/// On-voxel ids of a clique, at most eight.
pub type CliqueMembers = SmallVec<[VoxelId; 8]>;

/// In-plane ring around a voxel, as canonical `(a, c)` offsets.
const PLANE_RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The four cardinal in-plane directions, as canonical `(a, c)` offsets.
const CARDINALS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

fn in_plane(axis: Axis, a: i32, c: i32) -> VoxelCoord {
    axis.to_world(VoxelCoord::new(a, 0, c))
}

/// Four voxel positions forming a unit square.
///
/// `d` is the corner opposite `a`, so `d == b + c - a`; the opposite pairs
/// are `(a, d)` and `(b, c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub a: VoxelCoord,
    pub b: VoxelCoord,
    pub c: VoxelCoord,
    pub d: VoxelCoord,
}

impl Square {
    pub fn new(a: VoxelCoord, b: VoxelCoord, c: VoxelCoord, d: VoxelCoord) -> Self {
        Self { a, b, c, d }
    }

    /// The square `a, a+u, a+v, a+u+v` in the plane normal to `axis`.
    pub fn standard(anchor: VoxelCoord, axis: Axis) -> Self {
        let (u, v) = axis.in_plane();
        Self::new(anchor, anchor + u, anchor + v, anchor + u + v)
    }

    /// The square `a, a+u, a-v, a+u-v` in the plane normal to `axis`.
    pub fn rotated(anchor: VoxelCoord, axis: Axis) -> Self {
        let (u, v) = axis.in_plane();
        Self::new(anchor, anchor + u, anchor - v, anchor + u - v)
    }

    pub fn corners(&self) -> [VoxelCoord; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns `true` if the corners form a unit square lying in a plane
    /// normal to `axis`, with `d` opposite `a`.
    pub fn is_unit_square(&self, axis: Axis) -> bool {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let normal = axis.unit();
        let in_plane_unit = |e: VoxelCoord| {
            e.nonzero_count() == 1
                && e.chebyshev() == 1
                && e.x * normal.x + e.y * normal.y + e.z * normal.z == 0
        };
        in_plane_unit(ab)
            && in_plane_unit(ac)
            && Axis::of_delta(ab) != Axis::of_delta(ac)
            && self.d == self.b + self.c - self.a
    }
}

/// The eight corners of a unit cube.
///
/// Corner `i` is opposite corner `7 - i`: with corners named A..H the
/// opposite pairs are (A, H), (B, G), (C, F) and (D, E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    corners: [VoxelCoord; 8],
}

impl Cube {
    pub fn new(corners: [VoxelCoord; 8]) -> Self {
        Self { corners }
    }

    /// The cube spanned from `anchor` by steps of `signs[k]` (±1) along
    /// each axis. Bit `k` of the corner index selects the step along axis `k`.
    pub fn from_anchor(anchor: VoxelCoord, signs: [i32; 3]) -> Self {
        let corners = std::array::from_fn(|i| {
            let bit = |k: usize| ((i >> k) & 1) as i32;
            anchor.offset(signs[0] * bit(0), signs[1] * bit(1), signs[2] * bit(2))
        });
        Self { corners }
    }

    pub fn corners(&self) -> &[VoxelCoord; 8] {
        &self.corners
    }

    /// The four opposite-corner pairs.
    pub fn opposite_pairs(&self) -> [(VoxelCoord, VoxelCoord); 4] {
        std::array::from_fn(|i| (self.corners[i], self.corners[7 - i]))
    }

    /// Returns `true` if the corners are laid out as [`Cube::from_anchor`]
    /// would lay them out.
    pub fn is_unit_cube(&self) -> bool {
        let span = self.corners[7] - self.corners[0];
        if span.x.abs() != 1 || span.y.abs() != 1 || span.z.abs() != 1 {
            return false;
        }
        *self == Cube::from_anchor(self.corners[0], span.as_array())
    }
}

impl VoxelGrid {
    /// Ids of the on voxels among `positions`, in order.
    pub fn on_members(&self, positions: &[VoxelCoord]) -> CliqueMembers {
        positions.iter().filter_map(|&p| self.on_id(p)).collect()
    }

    // --- K2 ---

    /// Tests the 2-clique formed by `(x, y, z)` and its neighbour one step
    /// along `axis`.
    pub fn is_critical_2_clique(&self, x: i32, y: i32, z: i32, axis: Axis) -> bool {
        self.is_critical_2_clique_coord(VoxelCoord::new(x, y, z), axis)
    }

    /// Tests the 2-clique formed by voxels `a` and `b`.
    ///
    /// Returns `false` if they are not 2-adjacent.
    pub fn is_critical_2_clique_between(&self, a: VoxelId, b: VoxelId) -> bool {
        if !self.are_2adjacent(a, b) {
            return false;
        }
        let (Some(pa), Some(pb)) = (self.id_to_coordinates(a), self.id_to_coordinates(b)) else {
            return false;
        };
        let delta = pb - pa;
        let Some(axis) = Axis::of_delta(delta) else {
            unreachable!("2-adjacent voxels {pa} and {pb} differ along no single axis");
        };
        let lower = if delta == axis.unit() { pa } else { pb };
        self.is_critical_2_clique_coord(lower, axis)
    }

    /// K2 test for the clique `{a, a + axis}`.
    ///
    /// Both voxels must be on. The clique is critical when the on voxels of
    /// the two in-plane rings are empty, or not 0-connected, or when every
    /// cardinal in-plane direction holds an on voxel next to `a` or `b`.
    pub fn is_critical_2_clique_coord(&self, a: VoxelCoord, axis: Axis) -> bool {
        let b = a + axis.unit();
        if !self.is_on_coord(a) || !self.is_on_coord(b) {
            return false;
        }

        let mut ring: SmallVec<[VoxelId; 16]> = SmallVec::new();
        for &(da, dc) in &PLANE_RING {
            let d = in_plane(axis, da, dc);
            ring.extend(self.on_id(a + d));
            ring.extend(self.on_id(b + d));
        }

        if ring.is_empty() || !self.is_k_connected(&ring, AdjacencyKind::Zero, 0) {
            return true;
        }

        CARDINALS.iter().all(|&(da, dc)| {
            let d = in_plane(axis, da, dc);
            self.is_on_coord(a + d) || self.is_on_coord(b + d)
        })
    }

    // --- K1 ---

    /// K1 test for a unit square in the plane normal to `axis`.
    ///
    /// Critical when a diagonal pair is on and the layers directly below and
    /// above the square are either both empty or both non-empty. Squares that
    /// are not unit squares normal to `axis` are reported as non-critical.
    pub fn is_critical_1_clique(&self, square: &Square, axis: Axis) -> bool {
        if !square.is_unit_square(axis) {
            tracing::warn!(?square, %axis, "Rejected malformed 1-clique square");
            return false;
        }

        let on = |p: VoxelCoord| self.is_on_coord(p);
        let diagonal = (on(square.a) && on(square.d)) || (on(square.b) && on(square.c));
        if !diagonal {
            return false;
        }

        let n = axis.unit();
        let corners = square.corners();
        let below = corners.iter().any(|&p| on(p - n));
        let above = corners.iter().any(|&p| on(p + n));
        below == above
    }

    // --- K0 ---

    /// K0 test for a unit cube: critical when some opposite pair is on.
    ///
    /// Malformed cubes are reported as non-critical.
    pub fn is_critical_0_clique(&self, cube: &Cube) -> bool {
        if !cube.is_unit_cube() {
            tracing::warn!(?cube, "Rejected malformed 0-clique cube");
            return false;
        }
        cube.opposite_pairs()
            .iter()
            .any(|&(p, q)| self.is_on_coord(p) && self.is_on_coord(q))
    }
}
