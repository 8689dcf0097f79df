// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for whole-grid classification.
//!
//! Compares:
//! 1. Simple-point test over every on voxel
//! 2. Full clique extraction (K3..K0)
//! 3. Live vs. table-driven K2 tests
//! 4. K2 mask table precomputation
//!
//! Run with: cargo bench -p voxel-kernels-core --bench classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use voxel_kernels_core::{precompute_k2_masks, Axis, VoxelGrid};

/// Solid ball of radius `n / 2` with a deterministic scatter of holes.
fn perforated_ball(n: usize) -> VoxelGrid {
    let mut grid = VoxelGrid::new(n, n, n).unwrap();
    let r = n as i32 / 2;
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            for z in 0..n as i32 {
                let (dx, dy, dz) = (x - r, y - r, z - r);
                let inside = dx * dx + dy * dy + dz * dz <= r * r;
                let hole = (x * 7 + y * 13 + z * 31) % 11 == 0;
                if inside && !hole {
                    grid.set_at(x, y, z, true).unwrap();
                }
            }
        }
    }
    grid
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    for n in [16usize, 32, 48] {
        let grid = perforated_ball(n);
        group.throughput(Throughput::Elements(grid.len_on() as u64));

        group.bench_with_input(BenchmarkId::new("simple_points", n), &grid, |b, grid| {
            b.iter(|| {
                grid.true_voxel_ids()
                    .iter()
                    .filter(|&&id| grid.is_simple_id(black_box(id)))
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("extract_all_cliques", n), &grid, |b, grid| {
            b.iter(|| black_box(grid).extract_all_cliques())
        });
    }

    group.finish();
}

fn bench_k2_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("k2_lookup");
    let grid = perforated_ball(32);
    let table = precompute_k2_masks();
    let anchors: Vec<_> = grid
        .true_voxel_ids()
        .iter()
        .filter_map(|&id| grid.id_to_coordinates(id))
        .collect();
    group.throughput(Throughput::Elements((anchors.len() * 3) as u64));

    group.bench_function("live", |b| {
        b.iter(|| {
            anchors
                .iter()
                .flat_map(|c| Axis::ALL.map(|axis| (c, axis)))
                .filter(|(c, axis)| grid.is_critical_2_clique(c.x, c.y, c.z, *axis))
                .count()
        })
    });

    group.bench_function("cached", |b| {
        b.iter(|| {
            anchors
                .iter()
                .flat_map(|c| Axis::ALL.map(|axis| (c, axis)))
                .filter(|(c, axis)| {
                    grid.is_critical_2_clique_cached(&table, c.x, c.y, c.z, *axis)
                })
                .count()
        })
    });

    group.finish();
}

fn bench_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("k2_masks");
    group.sample_size(10);
    group.bench_function("precompute", |b| b.iter(precompute_k2_masks));
    group.finish();
}

criterion_group!(benches, bench_classification, bench_k2_lookup, bench_precompute);
criterion_main!(benches);
