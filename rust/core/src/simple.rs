// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simple-point test.
//!
//! A foreground voxel is *simple* when removing it leaves the topology of
//! the object unchanged. Two local conditions must both hold:
//!
//! 1. The on voxels of its 26-neighbourhood form one non-empty 0-connected
//!    set.
//! 2. Its off face neighbours are 2-connected to each other, using the off
//!    voxels of its 18-neighbourhood as bridges. A voxel with no off face
//!    neighbour passes this condition.
//!
//! A non-simple foreground voxel is a critical 3-clique.

use smallvec::SmallVec;

use crate::adjacency::{neighborhood_26, AdjacencyKind, EDGE_OFFSETS, FACE_OFFSETS};
use crate::grid::VoxelGrid;
use crate::voxel::{VoxelCoord, VoxelId};

impl VoxelGrid {
    /// Returns `true` if the voxel at `(x, y, z)` is on and simple.
    pub fn is_simple(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_simple_coord(VoxelCoord::new(x, y, z))
    }

    /// Returns `true` if voxel `id` is on and simple.
    pub fn is_simple_id(&self, id: VoxelId) -> bool {
        self.id_to_coordinates(id)
            .is_some_and(|c| self.is_simple_coord(c))
    }

    /// Returns `true` if the voxel at `center` is on and simple.
    pub fn is_simple_coord(&self, center: VoxelCoord) -> bool {
        if !self.is_on_coord(center) {
            return false;
        }

        let foreground: SmallVec<[VoxelId; 26]> = neighborhood_26()
            .filter_map(|d| self.on_id(center + d))
            .collect();
        if foreground.is_empty() || !self.is_k_connected(&foreground, AdjacencyKind::Zero, 0) {
            return false;
        }

        let mut background: SmallVec<[VoxelId; 18]> = FACE_OFFSETS
            .iter()
            .filter_map(|&d| self.off_id(center + d))
            .collect();
        let faces = background.len();
        if faces == 0 {
            return true;
        }
        background.extend(EDGE_OFFSETS.iter().filter_map(|&d| self.off_id(center + d)));

        self.is_k_connected(&background, AdjacencyKind::Two, faces)
    }

    /// Returns `true` if the voxel at `(x, y, z)` is on and not simple.
    pub fn is_critical_3_clique(&self, x: i32, y: i32, z: i32) -> bool {
        let c = VoxelCoord::new(x, y, z);
        self.is_on_coord(c) && !self.is_simple_coord(c)
    }

    /// Id of the voxel at `c` if it is on.
    pub(crate) fn on_id(&self, c: VoxelCoord) -> Option<VoxelId> {
        self.coord_to_id(c).filter(|&id| self.voxels[id].on)
    }

    /// Id of the voxel at `c` if it exists in the padded grid and is off.
    fn off_id(&self, c: VoxelCoord) -> Option<VoxelId> {
        self.coord_to_id(c).filter(|&id| !self.voxels[id].on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(dims: [usize; 3], voxels: &[(i32, i32, i32)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new(dims[0], dims[1], dims[2]).unwrap();
        for &(x, y, z) in voxels {
            grid.set_at(x, y, z, true).unwrap();
        }
        grid
    }

    fn filled(n: i32) -> Vec<(i32, i32, i32)> {
        let mut v = Vec::new();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    v.push((x, y, z));
                }
            }
        }
        v
    }

    #[test]
    fn off_voxels_are_not_simple() {
        let grid = grid_with([3, 3, 3], &[(0, 0, 0)]);
        assert!(!grid.is_simple(1, 1, 1));
        assert!(!grid.is_critical_3_clique(1, 1, 1));
    }

    #[test]
    fn isolated_voxel_is_critical() {
        let grid = grid_with([3, 3, 3], &[(1, 1, 1)]);
        assert!(!grid.is_simple(1, 1, 1));
        assert!(grid.is_critical_3_clique(1, 1, 1));
    }

    #[test]
    fn end_of_a_line_is_simple() {
        let grid = grid_with([5, 3, 3], &[(1, 1, 1), (2, 1, 1), (3, 1, 1)]);
        assert!(grid.is_simple(1, 1, 1));
        assert!(grid.is_simple(3, 1, 1));
    }

    #[test]
    fn middle_of_a_line_is_not_simple() {
        let grid = grid_with([5, 3, 3], &[(1, 1, 1), (2, 1, 1), (3, 1, 1)]);
        // Removing it splits the line in two.
        assert!(!grid.is_simple(2, 1, 1));
    }

    #[test]
    fn filled_cube_center_is_simple() {
        let grid = grid_with([3, 3, 3], &filled(3));
        assert!(grid.is_simple(1, 1, 1));
    }

    #[test]
    fn cube_corners_are_simple() {
        let grid = grid_with([3, 3, 3], &filled(3));
        assert!(grid.is_simple(0, 0, 0));
        assert!(grid.is_simple(2, 2, 2));
        assert!(grid.is_simple(1, 0, 0));
    }

    #[test]
    fn ring_edge_midpoints_are_not_simple() {
        // A closed 3x3 ring in the z = 1 plane. Corners can go (their two
        // ring neighbours are 0-adjacent); edge midpoints cannot.
        let ring = [
            (0, 0, 1),
            (1, 0, 1),
            (2, 0, 1),
            (2, 1, 1),
            (2, 2, 1),
            (1, 2, 1),
            (0, 2, 1),
            (0, 1, 1),
        ];
        let grid = grid_with([3, 3, 3], &ring);
        for &(x, y, z) in &ring {
            let corner = x != 1 && y != 1;
            assert_eq!(grid.is_simple(x, y, z), corner, "({x}, {y}, {z})");
        }
    }

    #[test]
    fn simple_by_id_matches_coordinates() {
        let grid = grid_with([4, 3, 3], &[(1, 1, 1), (2, 1, 1)]);
        let id = grid.coordinates_to_id(1, 1, 1).unwrap();
        assert_eq!(grid.is_simple_id(id), grid.is_simple(1, 1, 1));
        assert!(!grid.is_simple_id(grid.physical_len()));
    }
}
