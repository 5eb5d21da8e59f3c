// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Resampling and blending of closed boundaries

use nalgebra::Point2;

fn ring_points(xs: &[f64], ys: &[f64]) -> Vec<Point2<f64>> {
    let n = xs.len().min(ys.len());
    let mut ring: Vec<Point2<f64>> = (0..n).map(|i| Point2::new(xs[i], ys[i])).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn signed_area(ring: &[Point2<f64>]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

fn resample_ring(ring: &[Point2<f64>], count: usize) -> Vec<Point2<f64>> {
    if ring.is_empty() || count == 0 {
        return Vec::new();
    }
    let n = ring.len();
    let lengths: Vec<f64> = (0..n)
        .map(|i| nalgebra::distance(&ring[i], &ring[(i + 1) % n]))
        .collect();
    let perimeter: f64 = lengths.iter().sum();
    if n == 1 || perimeter == 0.0 {
        return vec![ring[0]; count];
    }

    let step = perimeter / count as f64;
    let mut out = Vec::with_capacity(count);
    let mut edge = 0;
    let mut edge_start = 0.0;
    for k in 0..count {
        let target = k as f64 * step;
        while edge + 1 < n && edge_start + lengths[edge] < target {
            edge_start += lengths[edge];
            edge += 1;
        }
        let a = ring[edge];
        let b = ring[(edge + 1) % n];
        let t = if lengths[edge] > 0.0 {
            ((target - edge_start) / lengths[edge]).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(a + (b - a) * t);
    }
    out
}

/// Resample a closed boundary to `count` points evenly spaced by arc length.
/// A repeated closing point in the input is ignored; the output has none.
pub fn resample_closed(xs: &[f64], ys: &[f64], count: usize) -> (Vec<f64>, Vec<f64>) {
    let ring = resample_ring(&ring_points(xs, ys), count);
    (ring.iter().map(|p| p.x).collect(), ring.iter().map(|p| p.y).collect())
}

/// Linear blend between two closed boundaries, `t = 0` giving `from` and
/// `t = 1` giving `to`. Both rings are resampled to a common vertex count,
/// oriented the same way and aligned at the vertex of `to` nearest to the
/// start of `from`. The result is explicitly closed.
pub fn blend_curves(from: (&[f64], &[f64]), to: (&[f64], &[f64]), t: f64) -> (Vec<f64>, Vec<f64>) {
    let ring_a = ring_points(from.0, from.1);
    let mut ring_b = ring_points(to.0, to.1);

    let source = match (ring_a.is_empty(), ring_b.is_empty()) {
        (true, true) => return (Vec::new(), Vec::new()),
        (false, true) => Some(&ring_a),
        (true, false) => Some(&ring_b),
        (false, false) => None,
    };
    if let Some(ring) = source {
        let mut xs: Vec<f64> = ring.iter().map(|p| p.x).collect();
        let mut ys: Vec<f64> = ring.iter().map(|p| p.y).collect();
        xs.push(xs[0]);
        ys.push(ys[0]);
        return (xs, ys);
    }

    if signed_area(&ring_a) * signed_area(&ring_b) < 0.0 {
        ring_b.reverse();
    }

    let count = ring_a.len().max(ring_b.len());
    let a = resample_ring(&ring_a, count);
    let b = resample_ring(&ring_b, count);

    let offset = b
        .iter()
        .enumerate()
        .map(|(i, p)| (i, nalgebra::distance_squared(p, &a[0])))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
        .0;

    let mut xs = Vec::with_capacity(count + 1);
    let mut ys = Vec::with_capacity(count + 1);
    for (i, &pa) in a.iter().enumerate() {
        let pb = b[(i + offset) % count];
        let p = pa + (pb - pa) * t;
        xs.push(p.x);
        ys.push(p.y);
    }
    xs.push(xs[0]);
    ys.push(ys[0]);
    (xs, ys)
}
