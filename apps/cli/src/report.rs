// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run summary and its text/JSON rendering.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use voxel_kernels_core::{precompute_k2_masks, Axis, CliqueDimension, CriticalCliques, VoxelGrid};

use crate::config::{Config, OutputFormat};

/// Clique counts per dimension.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CliqueCounts {
    pub k3: usize,
    pub k2: usize,
    pub k1: usize,
    pub k0: usize,
    pub total: usize,
}

impl From<&CriticalCliques> for CliqueCounts {
    fn from(cliques: &CriticalCliques) -> Self {
        let [k3, k2, k1, k0] = cliques.counts();
        Self {
            k3,
            k2,
            k1,
            k0,
            total: cliques.total(),
        }
    }
}

/// Outcome of building the K2 table and checking it against the live test.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MaskCheck {
    pub critical_configurations: usize,
    pub checked: usize,
    pub mismatches: usize,
    pub precompute_ms: u64,
}

/// Builds the K2 table and compares it with the live detector for every on
/// voxel of `grid` along every axis.
pub fn check_masks(grid: &VoxelGrid) -> MaskCheck {
    let start = Instant::now();
    let table = precompute_k2_masks();
    let precompute_ms = start.elapsed().as_millis() as u64;

    let mut checked = 0;
    let mut mismatches = 0;
    for &id in grid.true_voxel_ids() {
        let Some(c) = grid.id_to_coordinates(id) else {
            continue;
        };
        for axis in Axis::ALL {
            checked += 1;
            let live = grid.is_critical_2_clique(c.x, c.y, c.z, axis);
            let cached = grid.is_critical_2_clique_cached(&table, c.x, c.y, c.z, axis);
            if live != cached {
                mismatches += 1;
                tracing::error!(%c, %axis, live, cached, "K2 table disagrees with live detector");
            }
        }
    }

    MaskCheck {
        critical_configurations: table.count_critical(),
        checked,
        mismatches,
        precompute_ms,
    }
}

/// Everything a run reports.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generator: String,
    pub dimensions: [usize; 3],
    pub seed: Option<u64>,
    pub voxels: usize,
    pub classes: BTreeMap<String, usize>,
    pub cliques: CliqueCounts,
    pub extraction_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masks: Option<MaskCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<CriticalCliques>,
}

impl Report {
    pub fn new(
        config: &Config,
        grid: &VoxelGrid,
        cliques: CriticalCliques,
        extraction_ms: u64,
        masks: Option<MaskCheck>,
    ) -> Self {
        let classes = grid
            .class_counts()
            .into_iter()
            .map(|(class, n)| (class.to_string(), n))
            .collect();

        Self {
            generator: config.generator.to_string(),
            dimensions: grid.dimensions(),
            seed: config.generator.is_random().then_some(config.seed),
            voxels: grid.len_on(),
            classes,
            cliques: CliqueCounts::from(&cliques),
            extraction_ms,
            masks,
            members: config.list_cliques.then_some(cliques),
        }
    }

    pub fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Text => self.write_text(out)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let [w, h, s] = self.dimensions;
        writeln!(out, "generator   : {}", self.generator)?;
        if let Some(seed) = self.seed {
            writeln!(out, "seed        : {seed}")?;
        }
        writeln!(out, "grid        : {w} x {h} x {s}")?;
        writeln!(out, "voxels on   : {}", self.voxels)?;
        for (class, n) in &self.classes {
            writeln!(out, "  {class:<10}: {n}")?;
        }

        let c = &self.cliques;
        writeln!(
            out,
            "cliques     : K3={} K2={} K1={} K0={} (total {}, {} ms)",
            c.k3, c.k2, c.k1, c.k0, c.total, self.extraction_ms
        )?;

        if let Some(m) = &self.masks {
            writeln!(
                out,
                "k2 masks    : {} critical configurations, {} checks, {} mismatches ({} ms)",
                m.critical_configurations, m.checked, m.mismatches, m.precompute_ms
            )?;
        }

        if let Some(cliques) = &self.members {
            for dimension in CliqueDimension::ALL {
                for members in cliques.of_dimension(dimension) {
                    writeln!(out, "{dimension} {:?}", members.as_slice())?;
                }
            }
        }
        Ok(())
    }
}
