// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use commute::geometry::Point;
use commute::model::{ArrowStyle, Diagram, EntityId};
use commute::nav::Navigator;
use commute::ops::{apply_command, Command, CommandSettings};

// Benchmark identity (keep stable):
// - Group names: `nav.next`, `ops.extend_out`
// - Case IDs after the `/` (`grid_8`, `grid_32`, ...) stay stable across refactors.

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(env_usize("BENCH_SAMPLE_SIZE", 60).clamp(10, 200))
        .warm_up_time(Duration::from_secs(2))
}

/// `size x size` objects with spacing 2, each joined to its right and lower neighbour.
fn grid(size: usize) -> Diagram {
    let mut diagram = Diagram::new();
    let mut ids = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let pos = Point::new(col as f64 * 2.0, row as f64 * 2.0);
            ids.push(diagram.add_object("", pos).expect("grid cell"));
        }
    }
    for row in 0..size {
        for col in 0..size {
            let here = &ids[row * size + col];
            if col + 1 < size {
                let right = &ids[row * size + col + 1];
                diagram
                    .add_arrow("", here, right, ArrowStyle::Solid)
                    .expect("add")
                    .expect("right");
            }
            if row + 1 < size {
                let below = &ids[(row + 1) * size + col];
                diagram
                    .add_arrow("", here, below, ArrowStyle::Solid)
                    .expect("add")
                    .expect("below");
            }
        }
    }
    diagram
}

fn center_of(diagram: &Diagram, size: usize) -> EntityId {
    let mid = (size / 2) as f64 * 2.0;
    let obj = diagram
        .objects()
        .find(|obj| obj.position() == Point::new(mid, mid))
        .expect("center cell");
    EntityId::Obj(obj.id().clone())
}

fn benches_nav(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav.next");
    let navigator = Navigator::default();

    for size in [8usize, 32] {
        let diagram = grid(size);
        let focused = vec![center_of(&diagram, size)];
        let directions = [
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, -1.0),
            Point::new(-1.0, 0.5),
        ];

        group.throughput(Throughput::Elements(diagram.pieces().count() as u64));
        group.bench_function(format!("grid_{size}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for direction in directions {
                    let next = navigator
                        .next(&diagram, black_box(&focused), direction)
                        .expect("navigate");
                    hits += next.len();
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

fn benches_extend_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.extend_out");
    let settings = CommandSettings::default();

    for size in [8usize, 32] {
        let template = grid(size);
        let start = center_of(&template, size);

        // the new objects land off-grid, between existing cells
        group.bench_function(format!("grid_{size}"), |b| {
            b.iter_batched(
                || (template.clone(), vec![start.clone()]),
                |(mut diagram, mut selection)| {
                    apply_command(
                        &mut diagram,
                        &mut selection,
                        black_box(&Command::ExtendOut(Point::new(1.0, 1.0))),
                        &settings,
                        &mut || {},
                    )
                    .expect("extend");
                    black_box(diagram.stats())
                },
                BatchSize::SmallInput,
            )
        });

        // an edge extends both endpoints: four new pieces per call
        let edge = template
            .edges()
            .next()
            .map(|edge| EntityId::Edge(edge.id().clone()))
            .expect("edge");
        group.bench_function(format!("grid_{size}_edge"), |b| {
            b.iter_batched(
                || (template.clone(), vec![edge.clone()]),
                |(mut diagram, mut selection)| {
                    apply_command(
                        &mut diagram,
                        &mut selection,
                        black_box(&Command::ExtendOut(Point::new(0.5, 1.5))),
                        &settings,
                        &mut || {},
                    )
                    .expect("extend");
                    black_box(diagram.stats())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = benches_nav, benches_extend_out
}
criterion_main!(benches);
