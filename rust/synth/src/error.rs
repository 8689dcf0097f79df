// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for grid generation.

/// Result type alias for grid generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// More voxels were requested than the grid can hold.
    #[error("cannot place {requested} voxels in a grid of {capacity}")]
    TooManyVoxels { requested: usize, capacity: usize },

    /// Growth found no free neighbour after repeated attempts.
    #[error("growth stalled after placing {placed} of {requested} voxels")]
    Stalled { placed: usize, requested: usize },

    /// Unknown generator name.
    #[error("unknown generator '{0}' (expected skeleton, random, bertrand, block or cube)")]
    UnknownGenerator(String),

    /// Grid construction or write failure.
    #[error(transparent)]
    Core(#[from] voxel_kernels_core::Error),
}
