// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Random growth generators.
//!
//! Both generators only place voxels inside the logical grid, grow along
//! face directions, and draw every random choice from the caller's RNG, so
//! a fixed seed reproduces the same grid.

use rand::Rng;
use voxel_kernels_core::adjacency::FACE_OFFSETS;
use voxel_kernels_core::{VoxelCoord, VoxelGrid};

use crate::error::{Error, Result};

/// Failed placement attempts tolerated per voxel before giving up.
const MAX_ATTEMPTS: usize = 10_000;

/// Length of the initial `+x` stem of a skeleton, including the root.
const STEM_LENGTH: i32 = 6;

/// Chance (in percent) that the skeleton walker keeps its direction.
const PERSISTENCE_PERCENT: u32 = 80;

/// Failed tries before the skeleton walker jumps to another voxel.
const JUMP_AFTER_TRIES: usize = 6;

/// Index into `FACE_OFFSETS` of the walker's initial direction (`+z`).
const INITIAL_DIRECTION: usize = 4;

fn check_capacity(grid: &VoxelGrid, requested: usize) -> Result<()> {
    let capacity = grid.logical_len();
    if requested > capacity {
        return Err(Error::TooManyVoxels {
            requested,
            capacity,
        });
    }
    Ok(())
}

fn random_logical<R: Rng>(grid: &VoxelGrid, rng: &mut R) -> VoxelCoord {
    let [w, h, s] = grid.dimensions();
    VoxelCoord::new(
        rng.random_range(0..w) as i32,
        rng.random_range(0..h) as i32,
        rng.random_range(0..s) as i32,
    )
}

/// Coordinates of a uniformly chosen on voxel.
fn random_on<R: Rng>(grid: &VoxelGrid, rng: &mut R) -> Option<VoxelCoord> {
    let ids = grid.true_voxel_ids();
    if ids.is_empty() {
        return None;
    }
    grid.id_to_coordinates(ids[rng.random_range(0..ids.len())])
}

fn is_free(grid: &VoxelGrid, c: VoxelCoord) -> bool {
    grid.in_logical_bounds(c) && !grid.is_on_coord(c)
}

/// Adds one voxel face-adjacent to a random on voxel.
fn grow_from_random_voxel<R: Rng>(
    grid: &mut VoxelGrid,
    requested: usize,
    rng: &mut R,
) -> Result<()> {
    let stalled = Error::Stalled {
        placed: grid.len_on(),
        requested,
    };
    for _ in 0..MAX_ATTEMPTS {
        let Some(from) = random_on(grid, rng) else {
            return Err(stalled);
        };
        let target = from + FACE_OFFSETS[rng.random_range(0..FACE_OFFSETS.len())];
        if is_free(grid, target) {
            grid.set_coord(target, true)?;
            return Ok(());
        }
    }
    Err(stalled)
}

/// Fills `grid` with a single face-connected blob of `count` voxels.
///
/// The grid is cleared first. Growth starts from a random logical voxel and
/// repeatedly attaches a voxel to a randomly chosen on voxel.
///
/// # Errors
///
/// Returns [`Error::TooManyVoxels`] if `count` exceeds the logical grid and
/// [`Error::Stalled`] if no free neighbour is found after repeated attempts.
pub fn random_growth<R: Rng>(grid: &mut VoxelGrid, count: usize, rng: &mut R) -> Result<()> {
    check_capacity(grid, count)?;
    grid.clear();
    if count == 0 {
        return Ok(());
    }

    let seed = random_logical(grid, rng);
    grid.set_coord(seed, true)?;
    while grid.len_on() < count {
        grow_from_random_voxel(grid, count, rng)?;
    }

    tracing::debug!(count, %seed, "Generated random growth");
    Ok(())
}

/// Fills `grid` with a branching skeleton thickened to `count` voxels.
///
/// The first phase walks a skeleton of `count / 10` voxels from the grid
/// centre, starting with a short `+x` stem. The walker mostly keeps its
/// direction and periodically restarts from a random on voxel, which
/// produces branches. The second phase thickens the skeleton by random
/// face growth until `count` voxels are on.
///
/// # Errors
///
/// Same as [`random_growth`].
pub fn skeleton_like<R: Rng>(grid: &mut VoxelGrid, count: usize, rng: &mut R) -> Result<()> {
    check_capacity(grid, count)?;
    grid.clear();
    if count == 0 {
        return Ok(());
    }

    let [w, h, s] = grid.dimensions();
    let root = VoxelCoord::new((w / 2) as i32, (h / 2) as i32, (s / 2) as i32);
    for i in 0..STEM_LENGTH {
        let c = root.offset(i, 0, 0);
        if grid.len_on() < count && is_free(grid, c) {
            grid.set_coord(c, true)?;
        }
    }

    let skeleton = count / 10;
    let branch_length = (skeleton / 5).max(1);
    let mut current = root;
    let mut direction = INITIAL_DIRECTION;

    for i in 0..skeleton {
        if grid.len_on() >= count {
            break;
        }

        let mut tries = 0;
        let next = loop {
            let mut face = rng.random_range(0..FACE_OFFSETS.len());
            if rng.random_range(0..100) < PERSISTENCE_PERCENT {
                face = direction;
            }
            direction = face;

            let target = current + FACE_OFFSETS[face];
            if is_free(grid, target) {
                break target;
            }

            tries += 1;
            if tries >= MAX_ATTEMPTS {
                return Err(Error::Stalled {
                    placed: grid.len_on(),
                    requested: count,
                });
            }
            if tries % JUMP_AFTER_TRIES == 0 {
                current = random_on(grid, rng).unwrap_or(root);
            }
        };

        grid.set_coord(next, true)?;
        current = next;

        if i % branch_length == 0 {
            current = random_on(grid, rng).unwrap_or(root);
        }
    }
    let skeleton_voxels = grid.len_on();

    while grid.len_on() < count {
        grow_from_random_voxel(grid, count, rng)?;
    }

    tracing::debug!(count, skeleton_voxels, branch_length, "Generated skeleton-like growth");
    Ok(())
}
