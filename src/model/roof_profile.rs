// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Roof height profile from scattered control points

use crate::geometry::{nearest_vertex_within, Point};
use crate::interpolation::{sample_grid, HeightGrid, InterpolationMethod};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corners of the drawing area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "ll")]
    LowerLeft,
    #[serde(rename = "lr")]
    LowerRight,
    #[serde(rename = "ul")]
    UpperLeft,
    #[serde(rename = "ur")]
    UpperRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::LowerLeft,
        Corner::LowerRight,
        Corner::UpperLeft,
        Corner::UpperRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::LowerLeft => "ll",
            Corner::LowerRight => "lr",
            Corner::UpperLeft => "ul",
            Corner::UpperRight => "ur",
        }
    }

    /// Position of the corner on a square of side `extent`
    pub fn position(&self, extent: f64) -> (f64, f64) {
        match self {
            Corner::LowerLeft => (0.0, 0.0),
            Corner::LowerRight => (extent, 0.0),
            Corner::UpperLeft => (0.0, extent),
            Corner::UpperRight => (extent, extent),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ll" => Ok(Corner::LowerLeft),
            "lr" => Ok(Corner::LowerRight),
            "ul" => Ok(Corner::UpperLeft),
            "ur" => Ok(Corner::UpperRight),
            other => Err(format!("unknown corner: {}", other)),
        }
    }
}

/// Pinned heights at the four corners. Every corner always has a value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerValues {
    pub ll: f64,
    pub lr: f64,
    pub ul: f64,
    pub ur: f64,
}

impl CornerValues {
    pub fn new(ll: f64, lr: f64, ul: f64, ur: f64) -> Self {
        Self { ll, lr, ul, ur }
    }

    pub fn get(&self, corner: Corner) -> f64 {
        match corner {
            Corner::LowerLeft => self.ll,
            Corner::LowerRight => self.lr,
            Corner::UpperLeft => self.ul,
            Corner::UpperRight => self.ur,
        }
    }

    pub fn set(&mut self, corner: Corner, value: f64) {
        match corner {
            Corner::LowerLeft => self.ll = value,
            Corner::LowerRight => self.lr = value,
            Corner::UpperLeft => self.ul = value,
            Corner::UpperRight => self.ur = value,
        }
    }
}

/// Scattered `(x, y, z)` control points plus corner heights, interpolated
/// into a roof height grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofProfile {
    pub points: Vec<Point>,
    pub values_corner_points: CornerValues,
    pub interpolate_method: InterpolationMethod,
}

impl RoofProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corners(corners: CornerValues) -> Self {
        Self {
            values_corner_points: corners,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn add(&mut self, x: f64, y: f64, z: f64) {
        self.points.push(Point::with_z(x, y, z));
    }

    /// Remove the control point nearest to `(x, y)`
    pub fn remove_near(&mut self, x: f64, y: f64) -> Option<Point> {
        self.remove_within(x, y, f64::INFINITY)
    }

    /// Remove the control point nearest to `(x, y)` if it lies within `radius`
    pub fn remove_within(&mut self, x: f64, y: f64, radius: f64) -> Option<Point> {
        let index = self.pick(x, y, radius)?;
        Some(self.points.remove(index))
    }

    pub fn pick(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        let (xs, ys) = self.xy();
        nearest_vertex_within(&xs, &ys, x, y, radius)
    }

    /// Move a control point in the plane, keeping its height
    pub fn move_point(&mut self, index: Option<usize>, x: Option<f64>, y: Option<f64>) -> bool {
        let (Some(x), Some(y)) = (x, y) else {
            return false;
        };
        match index.and_then(|i| self.points.get_mut(i)) {
            Some(point) => {
                point.change(Some(x), Some(y), None);
                true
            }
            None => false,
        }
    }

    pub fn set_height(&mut self, index: Option<usize>, z: f64) -> bool {
        match index.and_then(|i| self.points.get_mut(i)) {
            Some(point) => {
                point.z = Some(z);
                true
            }
            None => false,
        }
    }

    pub fn corner(&self, corner: Corner) -> f64 {
        self.values_corner_points.get(corner)
    }

    pub fn set_corner(&mut self, corner: Corner, value: f64) {
        self.values_corner_points.set(corner, value);
    }

    pub fn set_method(&mut self, method: InterpolationMethod) {
        self.interpolate_method = method;
    }

    /// Planar projections of the control points
    pub fn xy(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.x, p.y)).unzip()
    }

    /// Interpolation input: the four corners of `[0, extent]^2` followed by
    /// the control points. Points without a height count as zero.
    pub fn samples(&self, extent: f64) -> Vec<Point3<f64>> {
        Corner::ALL
            .iter()
            .map(|corner| {
                let (x, y) = corner.position(extent);
                Point3::new(x, y, self.corner(*corner))
            })
            .chain(
                self.points
                    .iter()
                    .map(|p| Point3::new(p.x, p.y, p.z.unwrap_or(0.0))),
            )
            .collect()
    }

    /// Sample the roof on a `resolution x resolution` grid over `[0, extent]^2`
    pub fn height_grid(&self, resolution: usize, extent: f64) -> HeightGrid {
        sample_grid(self.samples(extent), self.interpolate_method, resolution, extent)
    }
}
