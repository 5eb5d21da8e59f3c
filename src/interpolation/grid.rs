// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sampling scattered heights onto a regular grid

use super::{triangulation::xy, InterpolationMethod, SampleMesh};
use crate::utils::linspace;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Square grid of heights over `[0, extent] x [0, extent]`.
///
/// Values are stored row by row: row `iy` holds the samples at
/// `y = ys[iy]` for every `x` in `xs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightGrid {
    pub resolution: usize,
    pub extent: f64,
    pub values: Vec<f64>,
}

impl HeightGrid {
    pub fn coordinates(&self) -> Vec<f64> {
        linspace(0.0, self.extent, self.resolution)
    }

    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.resolution || iy >= self.resolution {
            return None;
        }
        self.values.get(iy * self.resolution + ix).copied()
    }

    pub fn row(&self, iy: usize) -> Option<&[f64]> {
        let start = iy.checked_mul(self.resolution)?;
        self.values.get(start..start + self.resolution)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.resolution.max(1))
    }

    /// Copy of the grid with every height shifted by `delta`
    pub fn offset(&self, delta: f64) -> HeightGrid {
        HeightGrid {
            resolution: self.resolution,
            extent: self.extent,
            values: self.values.iter().map(|v| v + delta).collect(),
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

/// Evaluates one interpolation kernel over a fixed sample set
pub struct Interpolator {
    mesh: SampleMesh,
    method: InterpolationMethod,
}

impl Interpolator {
    pub fn new(samples: Vec<Point3<f64>>, method: InterpolationMethod) -> Self {
        Self {
            mesh: SampleMesh::new(samples),
            method,
        }
    }

    /// Interpolated height at `(x, y)`. Points outside the triangulated hull,
    /// or any point when the samples do not span a triangle, fall back to the
    /// nearest sample. `None` only when there are no samples at all.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        let p = Point2::new(x, y);
        let located = match self.method {
            InterpolationMethod::Nearest => None,
            InterpolationMethod::Linear => self.linear(&p),
            InterpolationMethod::Cubic => self.cubic(&p),
        };
        located.or_else(|| self.nearest(&p))
    }

    fn nearest(&self, p: &Point2<f64>) -> Option<f64> {
        self.mesh.nearest(p).map(|i| self.mesh.samples()[i].z)
    }

    fn linear(&self, p: &Point2<f64>) -> Option<f64> {
        let (tri, bary) = self.mesh.locate(p)?;
        let samples = self.mesh.samples();
        Some(
            tri.indices
                .iter()
                .zip(bary)
                .map(|(&i, l)| samples[i].z * l)
                .sum(),
        )
    }

    /// Cubic Bezier triangle built from sample values and estimated gradients
    fn cubic(&self, p: &Point2<f64>) -> Option<f64> {
        let (tri, [u, v, w]) = self.mesh.locate(p)?;
        let samples = self.mesh.samples();
        let [i0, i1, i2] = tri.indices;
        let (p0, p1, p2) = (xy(&samples[i0]), xy(&samples[i1]), xy(&samples[i2]));
        let (f0, f1, f2) = (samples[i0].z, samples[i1].z, samples[i2].z);
        let (g0, g1, g2) = (
            self.mesh.gradient(i0),
            self.mesh.gradient(i1),
            self.mesh.gradient(i2),
        );

        let b210 = f0 + g0.dot(&(p1 - p0)) / 3.0;
        let b201 = f0 + g0.dot(&(p2 - p0)) / 3.0;
        let b120 = f1 + g1.dot(&(p0 - p1)) / 3.0;
        let b021 = f1 + g1.dot(&(p2 - p1)) / 3.0;
        let b102 = f2 + g2.dot(&(p0 - p2)) / 3.0;
        let b012 = f2 + g2.dot(&(p1 - p2)) / 3.0;

        let edge_mean = (b210 + b201 + b120 + b021 + b102 + b012) / 6.0;
        let vertex_mean = (f0 + f1 + f2) / 3.0;
        let b111 = edge_mean + (edge_mean - vertex_mean) / 2.0;

        Some(
            f0 * u * u * u
                + f1 * v * v * v
                + f2 * w * w * w
                + 3.0 * (b210 * u * u * v + b201 * u * u * w)
                + 3.0 * (b120 * u * v * v + b021 * v * v * w)
                + 3.0 * (b102 * u * w * w + b012 * v * w * w)
                + 6.0 * b111 * u * v * w,
        )
    }
}

/// Sample `samples` on a `resolution x resolution` grid spanning
/// `[0, extent]` on both axes.
pub fn sample_grid(
    samples: Vec<Point3<f64>>,
    method: InterpolationMethod,
    resolution: usize,
    extent: f64,
) -> HeightGrid {
    let interpolator = Interpolator::new(samples, method);
    let coords = linspace(0.0, extent, resolution);

    let mut values = Vec::with_capacity(resolution * resolution);
    for &y in &coords {
        for &x in &coords {
            values.push(interpolator.value_at(x, y).unwrap_or(f64::NAN));
        }
    }

    tracing::debug!(resolution, extent, method = %method, "sampled height grid");
    HeightGrid {
        resolution,
        extent,
        values,
    }
}
