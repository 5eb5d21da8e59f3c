// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lithoframe::geometry::{blend_curves, nearest_edge, simplify};
use lithoframe::model::CornerValues;
use lithoframe::{InterpolationMethod, Lithology, RoofProfile, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ring(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut xs, mut ys): (Vec<f64>, Vec<f64>) = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let radius = rng.gen_range(30.0..45.0);
            (50.0 + radius * angle.cos(), 50.0 + radius * angle.sin())
        })
        .unzip();
    xs.push(xs[0]);
    ys.push(ys[0]);
    (xs, ys)
}

fn bench_height_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("height_grid");

    let mut rng = StdRng::seed_from_u64(1);
    let mut roof = RoofProfile::with_corners(CornerValues::new(0.0, 1.0, 2.0, 3.0));
    for _ in 0..50 {
        roof.add(
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..10.0),
        );
    }

    for method in InterpolationMethod::all() {
        roof.set_method(method);
        for resolution in [25, 100] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), resolution),
                &resolution,
                |b, &resolution| b.iter(|| roof.height_grid(black_box(resolution), 100.0)),
            );
        }
    }

    group.finish();
}

fn bench_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("curves");

    for n in [100, 1_000] {
        let (xs, ys) = ring(n, n as u64);
        group.bench_with_input(BenchmarkId::new("simplify", n), &n, |b, _| {
            b.iter(|| simplify(black_box(&xs), black_box(&ys), 50))
        });
        group.bench_with_input(BenchmarkId::new("nearest_edge", n), &n, |b, _| {
            b.iter(|| nearest_edge(&xs, &ys, black_box(12.0), black_box(70.0)))
        });
    }

    let outer = ring(400, 7);
    let inner = ring(250, 8);
    group.bench_function("blend_curves", |b| {
        b.iter(|| blend_curves((&outer.0, &outer.1), (&inner.0, &inner.1), black_box(0.5)))
    });

    group.finish();
}

fn bench_intermediate_layers(c: &mut Criterion) {
    let mut lithology = Lithology::new(Size::new(50.0, 50.0));
    for k in 0..4u64 {
        let (xs, ys) = ring(200, k);
        if k > 0 {
            lithology.insert_layer(k as usize - 1);
        }
        if let Some(layer) = lithology.layer_mut(k as usize) {
            layer.set_curve(xs, ys);
            layer.z = k as f64 * 10.0;
        }
    }

    c.bench_function("intermediate_layers_x3", |b| {
        b.iter(|| {
            let mut stack = lithology.clone();
            stack.calc_intermediate_layers_with(black_box(3))
        })
    });
}

criterion_group!(benches, bench_height_grid, bench_curves, bench_intermediate_layers);
criterion_main!(benches);
