// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Precomputed K2 lookup table.
//!
//! The K2 test only reads a 3×2×3 window around the clique: the two clique
//! voxels and their in-plane rings. In the canonical frame (clique along
//! local `y`) the window has 18 positions, so every possible neighbourhood
//! is one of 2¹⁸ configurations. Precomputing the answer for each turns the
//! live test into a single bit lookup.
//!
//! Configuration bit `a + 3·c + 9·b` holds the voxel at canonical offset
//! `(a - 1, b, c - 1)` from the lower clique voxel, for `a, c ∈ {0, 1, 2}`
//! and `b ∈ {0, 1}`. The clique voxels themselves are bits 4 and 13.

use std::time::Instant;

use rayon::prelude::*;

use crate::axis::Axis;
use crate::grid::VoxelGrid;
use crate::voxel::{Voxel, VoxelCoord};

/// Number of distinct K2 window configurations.
pub const K2_CONFIGURATIONS: usize = 1 << 18;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = K2_CONFIGURATIONS / WORD_BITS;

const LOWER_CENTER_BIT: u32 = 4;
const UPPER_CENTER_BIT: u32 = 13;

/// Canonical position of configuration bit `bit`.
fn window_offset(bit: u32) -> (i32, i32, i32) {
    let bit = bit as i32;
    (bit % 3, bit / 9, (bit / 3) % 3)
}

/// One bit per K2 configuration; set when the configuration is critical.
#[derive(Clone, PartialEq, Eq)]
pub struct K2MaskTable {
    words: Vec<u64>,
}

impl K2MaskTable {
    pub fn is_critical(&self, config: u32) -> bool {
        let index = config as usize;
        if index >= K2_CONFIGURATIONS {
            return false;
        }
        self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 == 1
    }

    pub fn count_critical(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Raw table words; bit `i % 64` of word `i / 64` is configuration `i`.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Number of configurations covered by the table.
    pub fn len(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl std::fmt::Debug for K2MaskTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K2MaskTable")
            .field("configurations", &self.len())
            .field("critical", &self.count_critical())
            .finish()
    }
}

/// Scratch grid holding exactly one canonical K2 window.
fn scratch_window() -> VoxelGrid {
    VoxelGrid::with_dimensions(3, 2, 3)
}

/// Evaluates `config` with the live K2 detector in a reusable scratch grid.
fn evaluate_in(scratch: &mut VoxelGrid, config: u32) -> bool {
    if config >> LOWER_CENTER_BIT & 1 == 0 || config >> UPPER_CENTER_BIT & 1 == 0 {
        return false;
    }

    scratch.voxels.fill(Voxel::default());
    for bit in 0..18 {
        if config >> bit & 1 == 0 {
            continue;
        }
        let (a, b, c) = window_offset(bit);
        if let Some(id) = scratch.coordinates_to_id(a, b, c) {
            scratch.voxels[id].on = true;
        }
    }

    scratch.is_critical_2_clique(1, 0, 1, Axis::Y)
}

/// Runs the live K2 detector on a single configuration.
///
/// Configurations that do not contain both clique voxels are never critical.
pub fn evaluate_k2_configuration(config: u32) -> bool {
    if config as usize >= K2_CONFIGURATIONS {
        return false;
    }
    evaluate_in(&mut scratch_window(), config)
}

/// Builds the K2 lookup table by evaluating every configuration.
///
/// Work is split into 64-configuration words across the rayon pool, with one
/// scratch grid per worker. The result does not depend on the pool size.
pub fn precompute_k2_masks() -> K2MaskTable {
    let start = Instant::now();

    let words: Vec<u64> = (0..WORDS)
        .into_par_iter()
        .map_init(scratch_window, |scratch, word| {
            let base = word * WORD_BITS;
            (0..WORD_BITS).fold(0u64, |bits, bit| {
                if evaluate_in(scratch, (base + bit) as u32) {
                    bits | 1 << bit
                } else {
                    bits
                }
            })
        })
        .collect();

    let table = K2MaskTable { words };
    tracing::info!(
        critical = table.count_critical(),
        configurations = K2_CONFIGURATIONS,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Precomputed K2 mask table"
    );
    table
}

impl VoxelGrid {
    /// Reads the K2 window of the clique `{(x, y, z), (x, y, z) + axis}`
    /// as a configuration index.
    pub fn k2_configuration(&self, x: i32, y: i32, z: i32, axis: Axis) -> u32 {
        let anchor = VoxelCoord::new(x, y, z);
        (0..18u32).fold(0, |config, bit| {
            let (a, b, c) = window_offset(bit);
            let p = anchor + axis.to_world(VoxelCoord::new(a - 1, b, c - 1));
            if self.is_on_coord(p) {
                config | 1 << bit
            } else {
                config
            }
        })
    }

    /// K2 test through a precomputed table.
    ///
    /// Agrees with [`is_critical_2_clique`](Self::is_critical_2_clique) for
    /// every grid and axis.
    pub fn is_critical_2_clique_cached(
        &self,
        table: &K2MaskTable,
        x: i32,
        y: i32,
        z: i32,
        axis: Axis,
    ) -> bool {
        table.is_critical(self.k2_configuration(x, y, z, axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(positions: &[(i32, i32, i32)]) -> u32 {
        positions
            .iter()
            .map(|&(a, b, c)| 1u32 << (a + 3 * c + 9 * b))
            .fold(0, |acc, bit| acc | bit)
    }

    #[test]
    fn window_layout() {
        assert_eq!(window_offset(LOWER_CENTER_BIT), (1, 0, 1));
        assert_eq!(window_offset(UPPER_CENTER_BIT), (1, 1, 1));
        assert_eq!(window_offset(17), (2, 1, 2));
        for bit in 0..18 {
            let (a, b, c) = window_offset(bit);
            assert_eq!(bits(&[(a, b, c)]), 1 << bit);
        }
    }

    #[test]
    fn missing_centre_is_never_critical() {
        assert!(!evaluate_k2_configuration(0));
        assert!(!evaluate_k2_configuration(1 << LOWER_CENTER_BIT));
        assert!(!evaluate_k2_configuration(1 << UPPER_CENTER_BIT));
        assert!(!evaluate_k2_configuration(u32::MAX));
    }

    #[test]
    fn known_configurations() {
        let pair = bits(&[(1, 0, 1), (1, 1, 1)]);
        assert!(evaluate_k2_configuration(pair));

        let side = pair | bits(&[(2, 0, 1)]);
        assert!(!evaluate_k2_configuration(side));

        let split = pair | bits(&[(2, 0, 1), (0, 0, 1)]);
        assert!(evaluate_k2_configuration(split));

        let full = (1 << 18) - 1;
        assert!(evaluate_k2_configuration(full));
    }

    #[test]
    fn configuration_follows_axis() {
        let mut grid = VoxelGrid::new(5, 5, 5).unwrap();
        grid.set_at(2, 2, 2, true).unwrap();
        grid.set_at(2, 2, 3, true).unwrap();
        grid.set_at(2, 3, 2, true).unwrap();

        let pair = bits(&[(1, 0, 1), (1, 1, 1)]);
        let z = grid.k2_configuration(2, 2, 2, Axis::Z);
        assert_eq!(z & pair, pair);
        assert_eq!(z.count_ones(), 3);

        // Along Y the upper voxel is (2, 3, 2); (2, 2, 3) is in A's ring.
        let y = grid.k2_configuration(2, 2, 2, Axis::Y);
        assert_eq!(y, pair | bits(&[(1, 0, 2)]));
    }

    #[test]
    fn table_matches_sequential_evaluation() {
        let table = precompute_k2_masks();
        assert_eq!(table.len(), K2_CONFIGURATIONS);
        assert!(table.count_critical() > 0);

        let mut scratch = scratch_window();
        for config in 0..K2_CONFIGURATIONS as u32 {
            assert_eq!(
                table.is_critical(config),
                evaluate_in(&mut scratch, config),
                "configuration {config:#x}"
            );
        }
        assert!(!table.is_critical(K2_CONFIGURATIONS as u32));
    }

    #[test]
    fn cached_matches_live_on_a_block() {
        let table = precompute_k2_masks();
        let mut grid = VoxelGrid::new(6, 6, 6).unwrap();
        for x in 1..4 {
            for y in 1..3 {
                for z in 1..5 {
                    grid.set_at(x, y, z, true).unwrap();
                }
            }
        }
        grid.set_at(4, 4, 4, true).unwrap();

        for &id in grid.true_voxel_ids() {
            let c = grid.id_to_coordinates(id).unwrap();
            for axis in Axis::ALL {
                assert_eq!(
                    grid.is_critical_2_clique_cached(&table, c.x, c.y, c.z, axis),
                    grid.is_critical_2_clique(c.x, c.y, c.z, axis),
                    "{c} along {axis}"
                );
            }
        }
    }
}
