// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Voxel Kernels CLI - builds a voxel grid and reports its critical cliques.
//!
//! The run is configured entirely through environment variables:
//!
//! - `GRID_WIDTH`, `GRID_HEIGHT`, `GRID_SLICE` - logical grid size (100)
//! - `GENERATOR` - `skeleton`, `random`, `bertrand`, `block` or `cube`
//! - `VOXEL_COUNT` - voxels placed by the random generators (5000)
//! - `SEED` - RNG seed (15164)
//! - `WORKER_THREADS` - rayon pool size (CPU count)
//! - `PRECOMPUTE_MASKS` - build and cross-check the K2 table
//! - `LIST_CLIQUES` - include clique members in the report
//! - `OUTPUT_FORMAT` - `text` or `json`
//!
//! Logs go to stderr and are filtered by `RUST_LOG`; the report goes to
//! stdout.

use std::time::Instant;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod config;
mod report;

use config::Config;
use report::Report;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,voxel_kernels_core=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();

    tracing::info!(
        generator = %config.generator,
        width = config.width,
        height = config.height,
        slice = config.slice,
        voxel_count = config.voxel_count,
        seed = config.seed,
        worker_threads = config.worker_threads,
        "Starting voxel kernel classification"
    );

    // Initialize rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut grid = config
        .generator
        .build(config.dimensions(), config.voxel_count, &mut rng)
        .with_context(|| format!("Failed to build grid with the {} generator", config.generator))?;
    grid.compute_voxel_attributes();

    let start = Instant::now();
    let cliques = grid.extract_all_cliques();
    let extraction_ms = start.elapsed().as_millis() as u64;

    let masks = config.precompute_masks.then(|| report::check_masks(&grid));
    if let Some(check) = &masks {
        if check.mismatches > 0 {
            tracing::warn!(mismatches = check.mismatches, "K2 table cross-check failed");
        }
    }

    let report = Report::new(&config, &grid, cliques, extraction_ms, masks);
    report.write(config.output, &mut std::io::stdout().lock())?;

    Ok(())
}
