// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named grid sources, selectable from configuration.

use std::str::FromStr;

use rand::Rng;
use voxel_kernels_core::VoxelGrid;

use crate::error::{Error, Result};
use crate::{fixtures, growth};

/// A way of producing a populated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Generator {
    /// Branching skeleton, then thickened ([`growth::skeleton_like`]).
    #[default]
    Skeleton,
    /// Single random blob ([`growth::random_growth`]).
    Random,
    /// [`fixtures::bertrand_structure`]; ignores dimensions and count.
    Bertrand,
    /// [`fixtures::interior_block`]; ignores dimensions and count.
    Block,
    /// [`fixtures::filled_cube`] sized to the smallest dimension.
    Cube,
}

impl Generator {
    pub const ALL: [Generator; 5] = [
        Generator::Skeleton,
        Generator::Random,
        Generator::Bertrand,
        Generator::Block,
        Generator::Cube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::Skeleton => "skeleton",
            Generator::Random => "random",
            Generator::Bertrand => "bertrand",
            Generator::Block => "block",
            Generator::Cube => "cube",
        }
    }

    /// Returns `true` for generators that draw from the RNG.
    pub fn is_random(&self) -> bool {
        matches!(self, Generator::Skeleton | Generator::Random)
    }

    /// Builds a grid of logical size `dims` holding `count` voxels.
    ///
    /// Fixtures have fixed contents and ignore `count`.
    pub fn build<R: Rng>(&self, dims: [usize; 3], count: usize, rng: &mut R) -> Result<VoxelGrid> {
        match self {
            Generator::Skeleton => {
                let mut grid = VoxelGrid::new(dims[0], dims[1], dims[2])?;
                growth::skeleton_like(&mut grid, count, rng)?;
                Ok(grid)
            }
            Generator::Random => {
                let mut grid = VoxelGrid::new(dims[0], dims[1], dims[2])?;
                growth::random_growth(&mut grid, count, rng)?;
                Ok(grid)
            }
            Generator::Bertrand => fixtures::bertrand_structure(),
            Generator::Block => fixtures::interior_block(),
            Generator::Cube => fixtures::filled_cube(dims.into_iter().min().unwrap_or(0)),
        }
    }
}

impl FromStr for Generator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Generator::ALL
            .into_iter()
            .find(|g| g.as_str() == name)
            .ok_or_else(|| Error::UnknownGenerator(s.to_string()))
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
