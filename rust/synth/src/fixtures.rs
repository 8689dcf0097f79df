// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hand-built reference grids.

use voxel_kernels_core::VoxelGrid;

use crate::error::Result;

/// The 12 voxels of the Bertrand reference structure.
pub const BERTRAND_VOXELS: [(i32, i32, i32); 12] = [
    (2, 1, 1),
    (2, 2, 1),
    (5, 2, 1),
    (3, 2, 2),
    (4, 2, 2),
    (3, 3, 2),
    (4, 3, 2),
    (1, 2, 3),
    (1, 3, 3),
    (2, 3, 3),
    (4, 3, 3),
    (5, 4, 3),
];

/// Dimensions of the solid block placed by [`interior_block`].
pub const INTERIOR_BLOCK: [i32; 3] = [4, 3, 3];

fn grid_with(dims: [usize; 3], voxels: impl IntoIterator<Item = (i32, i32, i32)>) -> Result<VoxelGrid> {
    let mut grid = VoxelGrid::new(dims[0], dims[1], dims[2])?;
    for (x, y, z) in voxels {
        grid.set_at(x, y, z, true)?;
    }
    Ok(grid)
}

fn solid_box(w: i32, h: i32, s: i32) -> impl Iterator<Item = (i32, i32, i32)> {
    (0..s).flat_map(move |z| (0..h).flat_map(move |y| (0..w).map(move |x| (x, y, z))))
}

/// A 10³ grid holding the Bertrand reference structure, a small shape that
/// exercises every clique dimension.
pub fn bertrand_structure() -> Result<VoxelGrid> {
    grid_with([10, 10, 10], BERTRAND_VOXELS)
}

/// An 8³ grid holding a 4×3×3 solid block at the origin.
pub fn interior_block() -> Result<VoxelGrid> {
    let [w, h, s] = INTERIOR_BLOCK;
    grid_with([8, 8, 8], solid_box(w, h, s))
}

/// An `n`³ grid with every logical voxel on.
pub fn filled_cube(n: usize) -> Result<VoxelGrid> {
    let side = i32::try_from(n).unwrap_or(i32::MAX);
    let mut grid = VoxelGrid::new(n, n, n)?;
    for (x, y, z) in solid_box(side, side, side) {
        grid.set_at(x, y, z, true)?;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bertrand_has_twelve_voxels() {
        let grid = bertrand_structure().unwrap();
        assert_eq!(grid.dimensions(), [10, 10, 10]);
        assert_eq!(grid.len_on(), 12);
        for (x, y, z) in BERTRAND_VOXELS {
            assert!(grid.is_on_at(x, y, z));
        }
    }

    #[test]
    fn block_fills_its_box() {
        let grid = interior_block().unwrap();
        assert_eq!(grid.len_on(), 36);
        assert!(grid.is_on_at(3, 2, 2));
        assert!(!grid.is_on_at(4, 0, 0));
    }

    #[test]
    fn filled_cube_is_full() {
        let grid = filled_cube(3).unwrap();
        assert_eq!(grid.len_on(), grid.logical_len());
        assert!(filled_cube(0).is_err());
    }
}
