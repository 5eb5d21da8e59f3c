// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Split planes cutting across a surface

use crate::geometry::{LineSegment, Point};
use crate::utils::lerp;
use serde::{Deserialize, Serialize};

/// A depth/angle tagged segment across a surface, in normalized `[0, 1]`
/// surface coordinates.
///
/// Endpoints are stored in placement order. [`Split::line`] always hands out
/// the normalized segment (lower point first, by y then x); the ordering is
/// computed on each read because endpoints are edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Split {
    /// Position in the layer stack, from 0.0 to 1.0
    pub depth: f64,
    /// Dip angle in degrees
    pub angle: i32,
    #[serde(rename = "_line")]
    line: LineSegment,
    /// Whether endpoint `a` was placed first
    pub from_start: bool,
    pub a_offset_z: f64,
    pub b_offset_z: f64,
}

impl Default for Split {
    fn default() -> Self {
        Self {
            depth: 0.0,
            angle: 0,
            line: LineSegment::default(),
            from_start: true,
            a_offset_z: 0.0,
            b_offset_z: 0.0,
        }
    }
}

impl Split {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_line(line: LineSegment) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    /// Endpoints ordered so that `a` is the lower point
    pub fn line(&self) -> LineSegment {
        self.line.normalized()
    }

    /// Endpoints in the order they were placed
    pub fn raw_line(&self) -> &LineSegment {
        &self.line
    }

    pub fn set_line(&mut self, line: LineSegment) {
        self.line = line;
    }

    /// Move endpoint `a` (`first == true`) or `b`
    pub fn set_endpoint(&mut self, first: bool, point: Point) {
        if first {
            self.line.a = point;
        } else {
            self.line.b = point;
        }
    }

    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth.clamp(0.0, 1.0);
    }

    /// Copy of this split with a uniformly scaled line, e.g. to project it
    /// from normalized surface space into plot space.
    pub fn scale(&self, factor: f64) -> Split {
        Split {
            line: self.line().scale(factor),
            ..self.clone()
        }
    }

    /// Z offset at parameter `t` along the line, `0` at `a` and `1` at `b`
    pub fn offset_at(&self, t: f64) -> f64 {
        lerp(self.a_offset_z, self.b_offset_z, t.clamp(0.0, 1.0))
    }

    pub fn is_degenerate(&self) -> bool {
        self.line.length() == 0.0
    }
}
