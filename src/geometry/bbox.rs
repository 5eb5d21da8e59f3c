// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in the drawing plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingBox {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self { min, max }
    }

    /// The square drawing area `[0, scale] x [0, scale]`
    pub fn square(scale: f64) -> Self {
        Self::new(Point2::origin(), Point2::new(scale, scale))
    }

    /// Nearest point of the box. Points inside are returned unchanged,
    /// points outside land on the closest boundary edge or corner.
    pub fn clamp(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}
