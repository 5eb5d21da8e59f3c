// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Picking queries over polylines: nearest vertex, nearest edge, border clamp

use super::BoundingBox;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Default pick radius in plot units
pub const DEFAULT_PICK_RADIUS: f64 = 5.0;

/// Edge of a closed polyline, `end == (start + 1) % n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Index at which a vertex splitting this edge has to be inserted
    pub fn insertion_index(&self) -> usize {
        if self.end > self.start {
            self.end
        } else {
            self.start + 1
        }
    }
}

/// Index of the vertex closest to `(qx, qy)` within [`DEFAULT_PICK_RADIUS`]
pub fn nearest_vertex(xs: &[f64], ys: &[f64], qx: f64, qy: f64) -> Option<usize> {
    nearest_vertex_within(xs, ys, qx, qy, DEFAULT_PICK_RADIUS)
}

/// Index of the vertex closest to `(qx, qy)`, or `None` when the sequence is
/// empty or the closest vertex lies farther than `radius`.
pub fn nearest_vertex_within(xs: &[f64], ys: &[f64], qx: f64, qy: f64, radius: f64) -> Option<usize> {
    let query = Point2::new(qx, qy);
    let (index, distance) = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| nalgebra::distance(&Point2::new(x, y), &query))
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })?;

    (distance <= radius).then_some(index)
}

/// Edge of the closed polyline closest to `(qx, qy)`. Edges wrap from the
/// last vertex back to the first. Returns `None` for fewer than two vertices.
pub fn nearest_edge(xs: &[f64], ys: &[f64], qx: f64, qy: f64) -> Option<Edge> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let query = Point2::new(qx, qy);
    let mut best: Option<(Edge, f64)> = None;
    for start in 0..n {
        let end = (start + 1) % n;
        let a = Point2::new(xs[start], ys[start]);
        let b = Point2::new(xs[end], ys[end]);
        let d = point_segment_distance(&query, &a, &b);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((Edge::new(start, end), d));
        }
    }
    best.map(|(edge, _)| edge)
}

/// Project a point lying outside `[0, scale] x [0, scale]` onto the nearest
/// boundary. Points inside are returned unchanged.
pub fn clamp_to_border(x: f64, y: f64, scale: f64) -> (f64, f64) {
    let p = BoundingBox::square(scale).clamp(&Point2::new(x, y));
    (p.x, p.y)
}

/// Round a coordinate to the nearest multiple of `step`
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

pub(crate) fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab: Vector2<f64> = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return nalgebra::distance(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    nalgebra::distance(p, &(a + ab * t))
}
