// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Basic spatial types: points, segments and grid sizes

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in plot or normalized surface space with an optional elevation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Update coordinates in place. Absent components leave that axis unchanged.
    pub fn change(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
        if let Some(z) = z {
            self.z = Some(z);
        }
    }

    pub fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.xy() - other.xy()).norm()
    }

    /// Ordering key used to normalize segment endpoints: y first, then x
    pub(crate) fn is_lower_than(&self, other: &Point) -> bool {
        self.y < other.y || (self.y == other.y && self.x < other.x)
    }
}

/// Ordered pair of points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSegment {
    pub a: Point,
    pub b: Point,
}

impl LineSegment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Uniform scaling of both endpoints
    pub fn scale(&self, factor: f64) -> Self {
        self.scaled(factor, factor)
    }

    /// Per-axis scaling of both endpoints. Elevations are preserved.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        let scale_point = |p: &Point| Point {
            x: p.x * sx,
            y: p.y * sy,
            z: p.z,
        };
        Self {
            a: scale_point(&self.a),
            b: scale_point(&self.b),
        }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    /// Copy with endpoints ordered so that `a` is the lower point (y, then x)
    pub fn normalized(&self) -> Self {
        if self.b.is_lower_than(&self.a) {
            Self {
                a: self.b,
                b: self.a,
            }
        } else {
            *self
        }
    }
}

/// Grid dimensions spanned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub x: f64,
    pub y: f64,
}

impl Size {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn max(&self) -> f64 {
        self.x.max(self.y)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}
