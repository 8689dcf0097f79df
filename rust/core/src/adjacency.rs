// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The three voxel adjacency relations.
//!
//! - **2-adjacency**: face-sharing neighbours (6).
//! - **1-adjacency**: 2-adjacency plus edge-sharing neighbours (18).
//! - **0-adjacency**: 1-adjacency plus corner-sharing neighbours (26).
//!
//! The relations are symmetric, irreflexive and nested
//! (2-adj ⊂ 1-adj ⊂ 0-adj). Ids outside the padded grid are never adjacent
//! to anything.

use crate::grid::VoxelGrid;
use crate::voxel::{VoxelCoord, VoxelId};

const fn c(x: i32, y: i32, z: i32) -> VoxelCoord {
    VoxelCoord::new(x, y, z)
}

/// Face-neighbour deltas, ordered `+x, -x, +y, -y, +z, -z`.
pub const FACE_OFFSETS: [VoxelCoord; 6] = [
    c(1, 0, 0),
    c(-1, 0, 0),
    c(0, 1, 0),
    c(0, -1, 0),
    c(0, 0, 1),
    c(0, 0, -1),
];

/// Edge-neighbour deltas (two non-zero components).
pub const EDGE_OFFSETS: [VoxelCoord; 12] = [
    c(1, 1, 0),
    c(1, -1, 0),
    c(-1, 1, 0),
    c(-1, -1, 0),
    c(1, 0, 1),
    c(1, 0, -1),
    c(-1, 0, 1),
    c(-1, 0, -1),
    c(0, 1, 1),
    c(0, 1, -1),
    c(0, -1, 1),
    c(0, -1, -1),
];

/// Corner-neighbour deltas (three non-zero components).
pub const CORNER_OFFSETS: [VoxelCoord; 8] = [
    c(1, 1, 1),
    c(1, 1, -1),
    c(1, -1, 1),
    c(1, -1, -1),
    c(-1, 1, 1),
    c(-1, 1, -1),
    c(-1, -1, 1),
    c(-1, -1, -1),
];

/// All 26 neighbour deltas: faces, then edges, then corners.
pub fn neighborhood_26() -> impl Iterator<Item = VoxelCoord> {
    FACE_OFFSETS
        .into_iter()
        .chain(EDGE_OFFSETS)
        .chain(CORNER_OFFSETS)
}

/// Which adjacency relation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacencyKind {
    /// 26-neighbourhood (corner sharing).
    Zero,
    /// 18-neighbourhood (edge sharing).
    One,
    /// 6-neighbourhood (face sharing).
    Two,
}

impl AdjacencyKind {
    /// Returns `true` if two voxels separated by `delta` are adjacent under
    /// this relation.
    pub fn admits(self, delta: VoxelCoord) -> bool {
        if delta.chebyshev() != 1 {
            return false;
        }
        let max_nonzero = match self {
            AdjacencyKind::Two => 1,
            AdjacencyKind::One => 2,
            AdjacencyKind::Zero => 3,
        };
        delta.nonzero_count() <= max_nonzero
    }

    /// Number of neighbours a voxel has under this relation.
    pub fn neighbor_count(self) -> usize {
        match self {
            AdjacencyKind::Two => 6,
            AdjacencyKind::One => 18,
            AdjacencyKind::Zero => 26,
        }
    }
}

/// A symmetric adjacency relation over voxel ids.
///
/// The connectivity checker takes this capability as a parameter; it is
/// implemented by [`GridAdjacency`] and by any `Fn(VoxelId, VoxelId) -> bool`.
pub trait Adjacency {
    fn adjacent(&self, p: VoxelId, q: VoxelId) -> bool;
}

impl<F> Adjacency for F
where
    F: Fn(VoxelId, VoxelId) -> bool,
{
    fn adjacent(&self, p: VoxelId, q: VoxelId) -> bool {
        self(p, q)
    }
}

/// One of the three grid relations, bound to a grid's id layout.
#[derive(Debug, Clone, Copy)]
pub struct GridAdjacency<'a> {
    grid: &'a VoxelGrid,
    kind: AdjacencyKind,
}

impl<'a> GridAdjacency<'a> {
    pub fn new(grid: &'a VoxelGrid, kind: AdjacencyKind) -> Self {
        Self { grid, kind }
    }

    pub fn kind(&self) -> AdjacencyKind {
        self.kind
    }
}

impl Adjacency for GridAdjacency<'_> {
    fn adjacent(&self, p: VoxelId, q: VoxelId) -> bool {
        self.grid.are_adjacent(p, q, self.kind)
    }
}

impl VoxelGrid {
    /// Returns `true` if `p` and `q` are adjacent under `kind`.
    pub fn are_adjacent(&self, p: VoxelId, q: VoxelId, kind: AdjacencyKind) -> bool {
        match (self.id_to_coordinates(p), self.id_to_coordinates(q)) {
            (Some(a), Some(b)) => kind.admits(b - a),
            _ => false,
        }
    }

    pub fn are_0adjacent(&self, p: VoxelId, q: VoxelId) -> bool {
        self.are_adjacent(p, q, AdjacencyKind::Zero)
    }

    pub fn are_1adjacent(&self, p: VoxelId, q: VoxelId) -> bool {
        self.are_adjacent(p, q, AdjacencyKind::One)
    }

    pub fn are_2adjacent(&self, p: VoxelId, q: VoxelId) -> bool {
        self.are_adjacent(p, q, AdjacencyKind::Two)
    }

    /// Coordinate form of [`are_adjacent`](Self::are_adjacent).
    ///
    /// Both positions must lie inside the padded grid.
    pub fn are_adjacent_at(&self, a: VoxelCoord, b: VoxelCoord, kind: AdjacencyKind) -> bool {
        match (self.coord_to_id(a), self.coord_to_id(b)) {
            (Some(p), Some(q)) => self.are_adjacent(p, q, kind),
            _ => false,
        }
    }
}
