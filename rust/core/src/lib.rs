// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Voxel Kernels Core
//!
//! Critical-kernel classification of binary 3D voxel grids.
//!
//! Given the set of foreground ("on") voxels of a finite grid, this crate
//! decides which voxels can be removed by a thinning step without changing
//! the topology of the object:
//!
//! - **Adjacency**: 0-, 1- and 2-adjacency (26/18/6 neighbours)
//! - **Connectivity**: k-connectedness of small voxel sets
//! - **Simple points**: the local removability test
//! - **Critical cliques**: detectors K3 (single voxel) down to K0 (unit cube)
//!   and a whole-grid extraction pass
//! - **Mask tables**: a precomputed 2¹⁸-entry table for the K2 test
//!
//! ## Quick Start
//!
//! ```rust
//! use voxel_kernels_core::{Axis, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(4, 3, 3).unwrap();
//! grid.set_at(1, 1, 1, true).unwrap();
//! grid.set_at(2, 1, 1, true).unwrap();
//!
//! // Each voxel of an isolated pair is removable on its own...
//! assert!(grid.is_simple(1, 1, 1));
//! // ...but the pair as a whole is a critical 2-clique.
//! assert!(grid.is_critical_2_clique(1, 1, 1, Axis::X));
//!
//! let cliques = grid.extract_all_cliques();
//! assert_eq!(cliques.counts(), [0, 1, 0, 0]);
//! ```
//!
//! ## Cached K2 Lookup
//!
//! ```rust,no_run
//! use voxel_kernels_core::{precompute_k2_masks, Axis, VoxelGrid};
//!
//! let table = precompute_k2_masks();
//! let grid = VoxelGrid::new(10, 10, 10).unwrap();
//! assert!(!grid.is_critical_2_clique_cached(&table, 1, 1, 1, Axis::Z));
//! ```
//!
//! ## Coordinates
//!
//! Logical coordinates run from `0` to `dim - 1` on each axis. The grid pads
//! every axis with one ghost voxel on each side, so `-1` and `dim` are also
//! addressable; reads further out return an off voxel.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of voxels, coordinates and clique lists

pub mod adjacency;
pub mod axis;
pub mod cliques;
pub mod connectivity;
pub mod error;
pub mod extraction;
pub mod grid;
pub mod masks;
pub mod simple;
pub mod voxel;

pub use adjacency::{Adjacency, AdjacencyKind, GridAdjacency};
pub use axis::Axis;
pub use cliques::{CliqueMembers, Cube, Square};
pub use connectivity::is_k_connected;
pub use error::{Error, Result};
pub use extraction::{CliqueDimension, CriticalCliques};
pub use grid::VoxelGrid;
pub use masks::{evaluate_k2_configuration, precompute_k2_masks, K2MaskTable, K2_CONFIGURATIONS};
pub use voxel::{TopologicalClass, Voxel, VoxelCoord, VoxelId};
