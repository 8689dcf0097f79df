// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Voxel Kernels Synth
//!
//! Synthetic voxel grids for exercising `voxel-kernels-core`.
//!
//! - **Growth generators**: random blobs and branching skeletons, driven by
//!   a caller-supplied RNG so that a seed reproduces a grid exactly
//! - **Fixtures**: small hand-built grids with known clique structure
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use voxel_kernels_synth::Generator;
//!
//! let mut rng = StdRng::seed_from_u64(15164);
//! let grid = Generator::Skeleton.build([32, 32, 32], 500, &mut rng).unwrap();
//! assert_eq!(grid.len_on(), 500);
//! ```

pub mod error;
pub mod fixtures;
pub mod generator;
pub mod growth;

pub use error::{Error, Result};
pub use fixtures::{bertrand_structure, filled_cube, interior_block};
pub use generator::Generator;
pub use growth::{random_growth, skeleton_like};
