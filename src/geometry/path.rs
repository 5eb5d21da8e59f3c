// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Split line rendering path

use super::Point;

/// Build the plot-space polyline of a split running from `a` to `b`.
///
/// Endpoints are given in normalized `[0, 1]` surface space and are stretched
/// by `scale_x`/`scale_y` to the surface's aspect ratio. The line is sampled
/// at unit steps along its dominant axis. Both endpoints are always part of
/// the result.
pub fn build_split_path(a: &Point, b: &Point, scale_x: f64, scale_y: f64) -> (Vec<f64>, Vec<f64>) {
    let span = ((b.x - a.x) * scale_x).abs().max(((b.y - a.y) * scale_y).abs());
    let steps = if span.is_finite() { span.ceil().max(1.0) as usize } else { 1 };
    build_split_path_with_steps(a, b, scale_x, scale_y, steps)
}

/// Same as [`build_split_path`] with an explicit number of segments, e.g. one
/// per grid cell crossed by the split.
pub fn build_split_path_with_steps(
    a: &Point,
    b: &Point,
    scale_x: f64,
    scale_y: f64,
    steps: usize,
) -> (Vec<f64>, Vec<f64>) {
    let steps = steps.max(1);
    let (ax, ay) = (a.x * scale_x, a.y * scale_y);
    let (bx, by) = (b.x * scale_x, b.y * scale_y);

    let mut xs = Vec::with_capacity(steps + 1);
    let mut ys = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        xs.push(ax + (bx - ax) * t);
        ys.push(ay + (by - ay) * t);
    }
    (xs, ys)
}
