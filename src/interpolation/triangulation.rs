// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Delaunay triangulation of scattered height samples

use nalgebra::{Matrix2, Point2, Point3, Vector2};

const BARYCENTRIC_EPSILON: f64 = 1e-9;

/// Triangle of a sample mesh with precomputed data for point location
#[derive(Debug, Clone)]
pub(crate) struct SampleTriangle {
    pub indices: [usize; 3],
    det: f64,
}

/// Triangulated sample set in the XY plane
#[derive(Debug, Clone)]
pub struct SampleMesh {
    samples: Vec<Point3<f64>>,
    triangles: Vec<SampleTriangle>,
    gradients: Vec<Vector2<f64>>,
}

impl SampleMesh {
    /// Triangulate samples on their XY projection. Collinear input yields a
    /// mesh without triangles.
    pub fn new(samples: Vec<Point3<f64>>) -> Self {
        let coords: Vec<delaunator::Point> = samples
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&coords);

        let triangles: Vec<SampleTriangle> = triangulation
            .triangles
            .chunks(3)
            .filter(|chunk| chunk.len() == 3)
            .filter_map(|chunk| {
                let [a, b, c] = [chunk[0], chunk[1], chunk[2]];
                let det = (xy(&samples[b]) - xy(&samples[a])).perp(&(xy(&samples[c]) - xy(&samples[a])));
                (det.abs() > f64::EPSILON).then_some(SampleTriangle {
                    indices: [a, b, c],
                    det,
                })
            })
            .collect();

        let gradients = vertex_gradients(&samples, &triangles);
        Self {
            samples,
            triangles,
            gradients,
        }
    }

    pub fn samples(&self) -> &[Point3<f64>] {
        &self.samples
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub(crate) fn gradient(&self, index: usize) -> Vector2<f64> {
        self.gradients[index]
    }

    /// Triangle containing `p` together with its barycentric coordinates
    pub(crate) fn locate(&self, p: &Point2<f64>) -> Option<(&SampleTriangle, [f64; 3])> {
        self.triangles.iter().find_map(|tri| {
            let bary = self.barycentric(tri, p);
            bary.iter()
                .all(|&l| l >= -BARYCENTRIC_EPSILON)
                .then_some((tri, bary))
        })
    }

    fn barycentric(&self, tri: &SampleTriangle, p: &Point2<f64>) -> [f64; 3] {
        let [a, b, c] = tri.indices.map(|i| xy(&self.samples[i]));
        let l1 = (*p - a).perp(&(c - a)) / tri.det;
        let l2 = (b - a).perp(&(*p - a)) / tri.det;
        [1.0 - l1 - l2, l1, l2]
    }

    /// Index of the sample nearest to `p` in the XY plane
    pub fn nearest(&self, p: &Point2<f64>) -> Option<usize> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i, nalgebra::distance_squared(&xy(s), p)))
            .fold(None, |best: Option<(usize, f64)>, cur| match best {
                Some(b) if b.1 <= cur.1 => Some(b),
                _ => Some(cur),
            })
            .map(|(i, _)| i)
    }
}

pub(crate) fn xy(p: &Point3<f64>) -> Point2<f64> {
    Point2::new(p.x, p.y)
}

/// Gradient of the plane through a triangle's three samples
fn plane_gradient(samples: &[Point3<f64>], tri: &SampleTriangle) -> Option<Vector2<f64>> {
    let [a, b, c] = tri.indices.map(|i| samples[i]);
    let e1 = xy(&b) - xy(&a);
    let e2 = xy(&c) - xy(&a);
    let m = Matrix2::new(e1.x, e1.y, e2.x, e2.y);
    m.try_inverse().map(|inv| inv * Vector2::new(b.z - a.z, c.z - a.z))
}

/// Per-sample gradient estimate: area-weighted mean of adjacent triangle planes
fn vertex_gradients(samples: &[Point3<f64>], triangles: &[SampleTriangle]) -> Vec<Vector2<f64>> {
    let mut sums = vec![Vector2::zeros(); samples.len()];
    let mut weights = vec![0.0; samples.len()];
    for tri in triangles {
        if let Some(g) = plane_gradient(samples, tri) {
            let area = tri.det.abs() * 0.5;
            for &i in &tri.indices {
                sums[i] += g * area;
                weights[i] += area;
            }
        }
    }
    sums.into_iter()
        .zip(weights)
        .map(|(s, w)| if w > 0.0 { s / w } else { s })
        .collect()
}
