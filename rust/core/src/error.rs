// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for voxel grid operations.

/// Result type alias for voxel grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating a voxel grid.
///
/// Reads never fail: out-of-range queries yield an off voxel instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A voxel id lies past the end of the padded storage.
    #[error("voxel id {id} is out of range (grid holds {len} voxels)")]
    InvalidVoxelId { id: usize, len: usize },

    /// Coordinates lie outside the padded index space.
    #[error("coordinates ({x}, {y}, {z}) are outside the padded grid")]
    InvalidCoordinates { x: i32, y: i32, z: i32 },

    /// Every logical dimension must be at least one voxel.
    #[error("grid dimensions must be positive, got {width}x{height}x{slice}")]
    EmptyDimension {
        width: usize,
        height: usize,
        slice: usize,
    },

    /// The padded grid would not fit the index or coordinate types.
    #[error("grid dimensions {width}x{height}x{slice} are too large")]
    GridTooLarge {
        width: usize,
        height: usize,
        slice: usize,
    },

    /// Raw axis index outside {0, 1, 2}.
    #[error("invalid axis index {0} (expected 0, 1 or 2)")]
    InvalidAxis(u8),
}
