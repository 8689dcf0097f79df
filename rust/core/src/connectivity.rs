// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! k-connectedness of small voxel sets.
//!
//! The checker treats a slice of ids as the vertex set of a graph whose
//! edges come from an [`Adjacency`] relation, and decides whether the
//! required elements all fall into the component of the first element.
//!
//! The algorithm is a mark-and-sweep over two flag vectors: an element is
//! *visited* once it is known to be reachable and *explored* once its own
//! neighbours have been marked. Each sweep is O(n), so a call is O(n²).
//! Call sites only ever pass local neighbourhoods (at most 26 ids); never
//! use this on a whole grid.

use crate::adjacency::{Adjacency, AdjacencyKind, GridAdjacency};
use crate::grid::VoxelGrid;
use crate::voxel::VoxelId;

/// Returns `true` if the first `required` elements of `ids` are connected.
///
/// All elements may serve as bridges between required ones. `required == 0`
/// (or `required >= ids.len()`) requires every element. An empty set is not
/// connected.
pub fn is_k_connected<A>(ids: &[VoxelId], adjacency: &A, required: usize) -> bool
where
    A: Adjacency + ?Sized,
{
    if ids.is_empty() {
        return false;
    }
    let required = if required == 0 || required > ids.len() {
        ids.len()
    } else {
        required
    };

    let mut visited = vec![false; ids.len()];
    let mut explored = vec![false; ids.len()];

    visited[0] = true;
    let mut current = 0;
    loop {
        explored[current] = true;
        for i in 0..ids.len() {
            if !visited[i] && adjacency.adjacent(ids[current], ids[i]) {
                visited[i] = true;
            }
        }

        match (0..ids.len()).find(|&i| visited[i] && !explored[i]) {
            Some(next) => current = next,
            None => break,
        }
    }

    visited[..required].iter().all(|&v| v)
}

impl VoxelGrid {
    /// Checks k-connectedness of `ids` under one of the grid relations.
    ///
    /// See [`is_k_connected`] for the meaning of `required`.
    pub fn is_k_connected(&self, ids: &[VoxelId], kind: AdjacencyKind, required: usize) -> bool {
        is_k_connected(ids, &GridAdjacency::new(self, kind), required)
    }
}
