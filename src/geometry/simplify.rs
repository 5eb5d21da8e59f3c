// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyline decimation for closed boundaries
//!
//! Uses Visvalingam-Whyatt thinning: the vertex spanning the smallest
//! triangle with its two ring neighbours is removed until the target count
//! is reached. A curve whose last vertex repeats the first is treated as a
//! ring with an explicit closing point, which is kept.

use nalgebra::Point2;

/// Default number of vertices kept by [`simplify`]
pub const DEFAULT_TARGET_COUNT: usize = 50;

/// A closed curve never drops below this many distinct vertices
pub const MIN_CLOSED_POINTS: usize = 3;

/// Decimate a closed polyline to roughly `target_count` points.
///
/// The result is never longer than the input, keeps at least
/// [`MIN_CLOSED_POINTS`] distinct vertices and is returned unchanged when
/// `target_count` already covers the input.
pub fn simplify(xs: &[f64], ys: &[f64], target_count: usize) -> (Vec<f64>, Vec<f64>) {
    let n = xs.len().min(ys.len());
    let target = target_count.max(MIN_CLOSED_POINTS);
    if n <= target {
        return (xs[..n].to_vec(), ys[..n].to_vec());
    }

    let closed = xs[0] == xs[n - 1] && ys[0] == ys[n - 1];
    let ring_len = if closed { n - 1 } else { n };
    let ring_target = if closed {
        (target - 1).max(MIN_CLOSED_POINTS)
    } else {
        target
    };

    let ring: Vec<Point2<f64>> = (0..ring_len).map(|i| Point2::new(xs[i], ys[i])).collect();
    let kept = thin_ring(&ring, ring_target);

    let mut out_x: Vec<f64> = kept.iter().map(|p| p.x).collect();
    let mut out_y: Vec<f64> = kept.iter().map(|p| p.y).collect();
    if closed {
        out_x.push(out_x[0]);
        out_y.push(out_y[0]);
    }
    (out_x, out_y)
}

/// Default-target convenience wrapper
pub fn simplify_default(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    simplify(xs, ys, DEFAULT_TARGET_COUNT)
}

fn thin_ring(ring: &[Point2<f64>], target: usize) -> Vec<Point2<f64>> {
    let mut points = ring.to_vec();
    while points.len() > target {
        let len = points.len();
        let weakest = (0..len)
            .map(|i| {
                let prev = &points[(i + len - 1) % len];
                let next = &points[(i + 1) % len];
                (i, triangle_area(prev, &points[i], next))
            })
            .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
        points.remove(weakest.0);
    }
    points
}

fn triangle_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    ((b - a).perp(&(c - a)) * 0.5).abs()
}
