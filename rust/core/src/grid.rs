// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dense voxel storage over a padded 3D index space.
//!
//! The [`VoxelGrid`] stores `(width + 2) * (height + 2) * (slice + 2)` voxels:
//! every logical axis is padded by one ghost voxel on each side, so physical
//! id `0` is logical `(-1, -1, -1)`. Neighbour probes one step past any
//! logical boundary therefore land on a real (off) voxel, and probes further
//! out are answered with a default voxel by [`VoxelGrid::get`].
//!
//! Alongside the dense storage the grid keeps the *true-voxel index*: the
//! ids of every voxel currently on, in insertion order. Whole-grid passes
//! iterate this list instead of scanning the padded volume.

use rustc_hash::FxHashMap;

use crate::adjacency::FACE_OFFSETS;
use crate::error::{Error, Result};
use crate::voxel::{TopologicalClass, Voxel, VoxelCoord, VoxelId};

/// A finite binary voxel grid with a one-voxel ghost border.
///
/// # Example
///
/// ```
/// use voxel_kernels_core::VoxelGrid;
///
/// let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
/// grid.set_at(1, 2, 3, true).unwrap();
///
/// let id = grid.coordinates_to_id(1, 2, 3).unwrap();
/// assert!(grid.get(id).on);
/// assert_eq!(grid.true_voxel_ids(), &[id]);
///
/// // Reads past the padded border never fail.
/// assert!(!grid.get_at(-7, 0, 0).on);
/// ```
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    slice: usize,

    // Padded strides
    stride_y: usize,
    stride_z: usize,

    pub(crate) voxels: Vec<Voxel>,
    pub(crate) true_voxels: Vec<VoxelId>,
    classification_stale: bool,
}

impl VoxelGrid {
    /// Creates an empty grid with the given logical dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDimension`] if any dimension is zero and
    /// [`Error::GridTooLarge`] if the padded grid does not fit in memory
    /// indices or `i32` coordinates.
    pub fn new(width: usize, height: usize, slice: usize) -> Result<Self> {
        if width == 0 || height == 0 || slice == 0 {
            return Err(Error::EmptyDimension {
                width,
                height,
                slice,
            });
        }

        let too_large = Error::GridTooLarge {
            width,
            height,
            slice,
        };
        let max_axis = (i32::MAX - 2) as usize;
        if width > max_axis || height > max_axis || slice > max_axis {
            return Err(too_large);
        }
        (width + 2)
            .checked_mul(height + 2)
            .and_then(|n| n.checked_mul(slice + 2))
            .ok_or(too_large)?;

        Ok(Self::with_dimensions(width, height, slice))
    }

    /// Builds a grid without validating the dimensions.
    pub(crate) fn with_dimensions(width: usize, height: usize, slice: usize) -> Self {
        let stride_y = width + 2;
        let stride_z = stride_y * (height + 2);
        Self {
            width,
            height,
            slice,
            stride_y,
            stride_z,
            voxels: vec![Voxel::default(); stride_z * (slice + 2)],
            true_voxels: Vec::new(),
            classification_stale: false,
        }
    }

    // --- Dimensions ---

    /// Returns the logical `[width, height, slice]`.
    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.slice]
    }

    /// Returns the number of voxels in the padded storage.
    pub fn physical_len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns the number of voxels in the logical (unpadded) volume.
    pub fn logical_len(&self) -> usize {
        self.width * self.height * self.slice
    }

    /// Returns `true` if `c` lies inside the logical volume.
    pub fn in_logical_bounds(&self, c: VoxelCoord) -> bool {
        (0..self.width as i32).contains(&c.x)
            && (0..self.height as i32).contains(&c.y)
            && (0..self.slice as i32).contains(&c.z)
    }

    /// Returns `true` if `c` lies on the outermost logical layer.
    pub fn on_logical_boundary(&self, c: VoxelCoord) -> bool {
        self.in_logical_bounds(c)
            && (c.x == 0
                || c.y == 0
                || c.z == 0
                || c.x == self.width as i32 - 1
                || c.y == self.height as i32 - 1
                || c.z == self.slice as i32 - 1)
    }

    fn in_padded_bounds(&self, c: VoxelCoord) -> bool {
        (-1..=self.width as i32).contains(&c.x)
            && (-1..=self.height as i32).contains(&c.y)
            && (-1..=self.slice as i32).contains(&c.z)
    }

    // --- Coordinate <-> id ---

    /// Converts logical coordinates to a physical id.
    ///
    /// Returns `None` outside the padded range `[-1, dim]` on any axis.
    pub fn coordinates_to_id(&self, x: i32, y: i32, z: i32) -> Option<VoxelId> {
        self.coord_to_id(VoxelCoord::new(x, y, z))
    }

    /// Same as [`coordinates_to_id`](Self::coordinates_to_id) for a [`VoxelCoord`].
    pub fn coord_to_id(&self, c: VoxelCoord) -> Option<VoxelId> {
        if !self.in_padded_bounds(c) {
            return None;
        }
        let px = (c.x + 1) as usize;
        let py = (c.y + 1) as usize;
        let pz = (c.z + 1) as usize;
        Some(px + py * self.stride_y + pz * self.stride_z)
    }

    /// Converts a physical id back to logical coordinates.
    ///
    /// Returns `None` for ids past the end of the padded storage.
    pub fn id_to_coordinates(&self, id: VoxelId) -> Option<VoxelCoord> {
        if id >= self.voxels.len() {
            return None;
        }
        let pz = id / self.stride_z;
        let rem = id % self.stride_z;
        let py = rem / self.stride_y;
        let px = rem % self.stride_y;
        Some(VoxelCoord::new(
            px as i32 - 1,
            py as i32 - 1,
            pz as i32 - 1,
        ))
    }

    // --- Reads ---

    /// Returns a snapshot of voxel `id`, or an off voxel if `id` is out of range.
    pub fn get(&self, id: VoxelId) -> Voxel {
        self.voxels.get(id).copied().unwrap_or_default()
    }

    /// Returns a snapshot of the voxel at `(x, y, z)`; never fails.
    pub fn get_at(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.voxel(VoxelCoord::new(x, y, z))
    }

    /// Returns a snapshot of the voxel at `c`; never fails.
    pub fn voxel(&self, c: VoxelCoord) -> Voxel {
        self.coord_to_id(c).map(|id| self.get(id)).unwrap_or_default()
    }

    /// Returns `true` if voxel `id` exists and is on.
    pub fn is_on(&self, id: VoxelId) -> bool {
        self.voxels.get(id).is_some_and(|v| v.on)
    }

    /// Returns `true` if the voxel at `(x, y, z)` exists and is on.
    pub fn is_on_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_on_coord(VoxelCoord::new(x, y, z))
    }

    /// Returns `true` if the voxel at `c` exists and is on.
    pub fn is_on_coord(&self, c: VoxelCoord) -> bool {
        self.coord_to_id(c).is_some_and(|id| self.voxels[id].on)
    }

    /// Ids of every voxel currently on, in insertion order.
    pub fn true_voxel_ids(&self) -> &[VoxelId] {
        &self.true_voxels
    }

    /// Number of voxels currently on.
    pub fn len_on(&self) -> usize {
        self.true_voxels.len()
    }

    // --- Writes ---

    /// Switches voxel `id` on or off.
    ///
    /// The voxel's topological class is reset and the grid's classification
    /// is marked stale, even when the value does not change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVoxelId`] if `id` is past the padded storage;
    /// the grid is left untouched.
    pub fn set(&mut self, id: VoxelId, value: bool) -> Result<()> {
        let len = self.voxels.len();
        let voxel = self
            .voxels
            .get_mut(id)
            .ok_or(Error::InvalidVoxelId { id, len })?;

        let was_on = voxel.on;
        voxel.on = value;
        voxel.class = TopologicalClass::Unclassified;
        self.classification_stale = true;

        if value && !was_on {
            self.true_voxels.push(id);
        } else if !value && was_on {
            self.true_voxels.retain(|&other| other != id);
        }

        Ok(())
    }

    /// Switches the voxel at `(x, y, z)` on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] outside the padded range.
    pub fn set_at(&mut self, x: i32, y: i32, z: i32, value: bool) -> Result<()> {
        self.set_coord(VoxelCoord::new(x, y, z), value)
    }

    /// Switches the voxel at `c` on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinates`] outside the padded range.
    pub fn set_coord(&mut self, c: VoxelCoord, value: bool) -> Result<()> {
        let id = self.coord_to_id(c).ok_or(Error::InvalidCoordinates {
            x: c.x,
            y: c.y,
            z: c.z,
        })?;
        self.set(id, value)
    }

    /// Sets the transient selection marker of voxel `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVoxelId`] if `id` is past the padded storage.
    pub fn select(&mut self, id: VoxelId, selected: bool) -> Result<()> {
        let len = self.voxels.len();
        let voxel = self
            .voxels
            .get_mut(id)
            .ok_or(Error::InvalidVoxelId { id, len })?;
        voxel.selected = selected;
        Ok(())
    }

    /// Switches every voxel off.
    pub fn clear(&mut self) {
        self.voxels.fill(Voxel::default());
        self.true_voxels.clear();
        self.classification_stale = true;
    }

    // --- Classification ---

    /// Returns `true` if voxels were written since the last call to
    /// [`compute_voxel_attributes`](Self::compute_voxel_attributes).
    pub fn classification_is_stale(&self) -> bool {
        self.classification_stale
    }

    /// Tags every on voxel as [`Border`](TopologicalClass::Border) or
    /// [`Interior`](TopologicalClass::Interior).
    ///
    /// A voxel is a border point if it sits on the logical boundary (or in
    /// the ghost border) or if any of its six face neighbours is off.
    /// Curve and surface classes are not computed.
    pub fn compute_voxel_attributes(&mut self) {
        let classes: Vec<(VoxelId, TopologicalClass)> = self
            .true_voxels
            .iter()
            .filter_map(|&id| {
                let c = self.id_to_coordinates(id)?;
                let border = !self.in_logical_bounds(c)
                    || self.on_logical_boundary(c)
                    || FACE_OFFSETS.iter().any(|&d| !self.is_on_coord(c + d));
                let class = if border {
                    TopologicalClass::Border
                } else {
                    TopologicalClass::Interior
                };
                Some((id, class))
            })
            .collect();

        for (id, class) in classes {
            self.voxels[id].class = class;
        }
        self.classification_stale = false;
    }

    /// Counts on voxels per topological class.
    pub fn class_counts(&self) -> FxHashMap<TopologicalClass, usize> {
        let mut counts = FxHashMap::default();
        for &id in &self.true_voxels {
            *counts.entry(self.voxels[id].class).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            VoxelGrid::new(0, 3, 3),
            Err(Error::EmptyDimension { .. })
        ));
        assert!(VoxelGrid::new(1, 1, 1).is_ok());
    }

    #[test]
    fn padded_layout() {
        let grid = VoxelGrid::new(3, 4, 5).unwrap();
        assert_eq!(grid.physical_len(), 5 * 6 * 7);
        assert_eq!(grid.logical_len(), 60);
        assert_eq!(grid.coordinates_to_id(-1, -1, -1), Some(0));
        assert_eq!(grid.id_to_coordinates(0), Some(VoxelCoord::new(-1, -1, -1)));
        // id = (x+1) + ((y+1) + (z+1)*H)*W with W = 5, H = 6
        assert_eq!(grid.coordinates_to_id(0, 0, 0), Some(1 + (1 + 6) * 5));
        assert_eq!(grid.coordinates_to_id(3, 4, 5), Some(grid.physical_len() - 1));
    }

    #[test]
    fn coordinates_outside_padding_do_not_wrap() {
        let grid = VoxelGrid::new(3, 3, 3).unwrap();
        assert_eq!(grid.coordinates_to_id(4, 0, 0), None);
        assert_eq!(grid.coordinates_to_id(0, -2, 0), None);
        assert_eq!(grid.id_to_coordinates(grid.physical_len()), None);
    }

    #[test]
    fn round_trip_over_padded_range() {
        let grid = VoxelGrid::new(2, 3, 2).unwrap();
        for id in 0..grid.physical_len() {
            let c = grid.id_to_coordinates(id).unwrap();
            assert_eq!(grid.coord_to_id(c), Some(id));
        }
    }

    #[test]
    fn set_and_clear_maintain_true_voxel_index() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        grid.set_at(0, 0, 0, true).unwrap();
        grid.set_at(1, 0, 0, true).unwrap();
        grid.set_at(0, 0, 0, true).unwrap();
        assert_eq!(grid.len_on(), 2);

        grid.set_at(0, 0, 0, false).unwrap();
        let remaining = grid.coordinates_to_id(1, 0, 0).unwrap();
        assert_eq!(grid.true_voxel_ids(), &[remaining]);
        assert!(!grid.is_on_at(0, 0, 0));

        grid.set_at(0, 0, 0, false).unwrap();
        assert_eq!(grid.true_voxel_ids(), &[remaining]);
    }

    #[test]
    fn invalid_writes_leave_grid_unchanged() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        let len = grid.physical_len();
        assert_eq!(
            grid.set(len, true),
            Err(Error::InvalidVoxelId { id: len, len })
        );
        assert!(matches!(
            grid.set_at(5, 0, 0, true),
            Err(Error::InvalidCoordinates { x: 5, y: 0, z: 0 })
        ));
        assert_eq!(grid.len_on(), 0);
        assert!(!grid.classification_is_stale());
    }

    #[test]
    fn out_of_range_reads_are_default() {
        let grid = VoxelGrid::new(2, 2, 2).unwrap();
        assert_eq!(grid.get(usize::MAX), Voxel::default());
        assert_eq!(grid.get_at(100, -100, 3), Voxel::default());
        assert!(!grid.is_on(grid.physical_len() + 10));
    }

    #[test]
    fn writes_invalidate_classification() {
        let mut grid = VoxelGrid::new(3, 3, 3).unwrap();
        grid.set_at(1, 1, 1, true).unwrap();
        grid.compute_voxel_attributes();
        assert!(!grid.classification_is_stale());
        assert_eq!(grid.get_at(1, 1, 1).class, TopologicalClass::Border);

        grid.set_at(1, 1, 1, true).unwrap();
        assert!(grid.classification_is_stale());
        assert_eq!(grid.get_at(1, 1, 1).class, TopologicalClass::Unclassified);
    }

    #[test]
    fn filled_cube_center_is_interior() {
        let mut grid = VoxelGrid::new(3, 3, 3).unwrap();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    grid.set_at(x, y, z, true).unwrap();
                }
            }
        }
        grid.compute_voxel_attributes();

        assert_eq!(grid.get_at(1, 1, 1).class, TopologicalClass::Interior);
        assert_eq!(grid.get_at(0, 1, 1).class, TopologicalClass::Border);
        let counts = grid.class_counts();
        assert_eq!(counts.get(&TopologicalClass::Interior), Some(&1));
        assert_eq!(counts.get(&TopologicalClass::Border), Some(&26));
    }

    #[test]
    fn hollow_neighbourhood_makes_border() {
        let mut grid = VoxelGrid::new(5, 5, 5).unwrap();
        for x in 1..4 {
            for y in 1..4 {
                for z in 1..4 {
                    grid.set_at(x, y, z, true).unwrap();
                }
            }
        }
        grid.set_at(2, 2, 3, false).unwrap();
        grid.compute_voxel_attributes();
        assert_eq!(grid.get_at(2, 2, 2).class, TopologicalClass::Border);
    }

    #[test]
    fn selection_marker() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        let id = grid.coordinates_to_id(1, 1, 1).unwrap();
        grid.select(id, true).unwrap();
        assert!(grid.get(id).selected);
        assert!(!grid.get(id).on);
        assert!(grid.select(grid.physical_len(), true).is_err());
    }

    #[test]
    fn clear_switches_everything_off() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        grid.set_at(0, 1, 0, true).unwrap();
        grid.clear();
        assert_eq!(grid.len_on(), 0);
        assert!(!grid.is_on_at(0, 1, 0));
    }
}
