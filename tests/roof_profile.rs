// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Roof interpolation checks

use approx::assert_relative_eq;
use lithoframe::interpolation::{sample_grid, Interpolator};
use lithoframe::model::CornerValues;
use lithoframe::{Corner, InterpolationMethod, RoofProfile};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn plane(x: f64, y: f64) -> f64 {
    0.3 * x - 0.1 * y + 4.0
}

#[test]
fn test_corner_gradient_is_monotonic() {
    let roof = RoofProfile::with_corners(CornerValues::new(0.0, 0.0, 10.0, 10.0));
    let grid = roof.height_grid(25, 100.0);

    let rows: Vec<&[f64]> = grid.rows().collect();
    assert_eq!(rows.len(), 25);
    for value in rows[0] {
        assert_relative_eq!(*value, 0.0, epsilon = 1e-9);
    }
    for value in rows[24] {
        assert_relative_eq!(*value, 10.0, epsilon = 1e-9);
    }
    for pair in rows.windows(2) {
        for (lower, upper) in pair[0].iter().zip(pair[1]) {
            assert!(upper > lower);
        }
    }
}

#[test]
fn test_linear_and_cubic_reproduce_planes() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut roof = RoofProfile::with_corners(CornerValues::new(
        plane(0.0, 0.0),
        plane(100.0, 0.0),
        plane(0.0, 100.0),
        plane(100.0, 100.0),
    ));
    for _ in 0..30 {
        let (x, y) = (rng.gen_range(5.0..95.0), rng.gen_range(5.0..95.0));
        roof.add(x, y, plane(x, y));
    }

    for method in [InterpolationMethod::Linear, InterpolationMethod::Cubic] {
        roof.set_method(method);
        let grid = roof.height_grid(11, 100.0);
        let coords = grid.coordinates();
        for (iy, y) in coords.iter().enumerate() {
            for (ix, x) in coords.iter().enumerate() {
                let value = grid.get(ix, iy).unwrap_or(f64::NAN);
                assert_relative_eq!(value, plane(*x, *y), epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn test_interpolation_stays_within_sample_range_for_linear() {
    let mut rng = StdRng::seed_from_u64(9);
    let samples: Vec<Point3<f64>> = (0..40)
        .map(|_| {
            Point3::new(
                rng.gen_range(0.0..50.0),
                rng.gen_range(0.0..50.0),
                rng.gen_range(-3.0..3.0),
            )
        })
        .collect();

    let grid = sample_grid(samples, InterpolationMethod::Linear, 20, 50.0);
    for value in &grid.values {
        assert!(value.is_finite());
        assert!((-3.0..=3.0).contains(value));
    }
}

#[test]
fn test_collinear_samples_fall_back_to_nearest() {
    let samples = vec![
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(5.0, 5.0, 2.0),
        Point3::new(10.0, 10.0, 3.0),
    ];
    let interpolator = Interpolator::new(samples, InterpolationMethod::Cubic);
    assert_eq!(interpolator.value_at(9.0, 10.0), Some(3.0));
}

#[test]
fn test_removing_points_and_changing_corners() {
    let mut roof = RoofProfile::new();
    roof.add(50.0, 50.0, 20.0);
    let peak = roof.height_grid(3, 100.0).get(1, 1).unwrap_or(f64::NAN);
    assert_relative_eq!(peak, 20.0, epsilon = 1e-9);

    roof.remove_near(40.0, 40.0);
    roof.set_corner(Corner::LowerLeft, 4.0);
    roof.set_corner(Corner::LowerRight, 4.0);
    let grid = roof.height_grid(3, 100.0);
    assert_relative_eq!(grid.get(0, 0).unwrap_or(f64::NAN), 4.0, epsilon = 1e-9);
    assert_relative_eq!(grid.get(1, 1).unwrap_or(f64::NAN), 2.0, epsilon = 1e-9);
}
